mod model;
mod server;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    bot, config::Config, error::AppError, scheduler::ticket_sweep, startup, state::AppState,
    util::concurrency::ConcurrencyGuard,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,trident=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let cors = startup::setup_cors(&config)?;

    // Bot and API share the database, the bot's HTTP client and the concurrency guard
    let concurrency = ConcurrencyGuard::new();
    let (bot_client, discord_http) =
        bot::start::init_bot(&config, db.clone(), concurrency.clone()).await?;

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    ticket_sweep::start_scheduler(db.clone(), discord_http.clone()).await?;

    let router = server::router::router()
        .with_state(AppState::new(
            db,
            http_client,
            oauth_client,
            discord_http,
            concurrency,
        ))
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_address).await?;
    tracing::info!("Dashboard API listening on {}", config.bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}
