use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents, Http};

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError, util::concurrency::ConcurrencyGuard,
};

/// Builds the Discord client without connecting it.
///
/// The returned [`Http`] client is handed to the dashboard API and the
/// scheduler before the gateway connection starts.
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its REST client
/// - `Err(AppError)` - Invalid token or client construction failed
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    concurrency: ConcurrencyGuard,
) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(db, concurrency, config.owner_id, config.debug_guilds.clone());

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Connects to the gateway. Blocks until the client shuts down, so run it
/// inside `tokio::spawn`.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
