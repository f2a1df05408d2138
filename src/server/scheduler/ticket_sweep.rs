use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::ticket::TicketRepository, error::AppError, service::discord::DiscordService,
};

/// Starts the orphaned ticket sweep.
///
/// Runs every 15 minutes and deletes ticket rows whose channel no longer
/// exists, e.g. because it was removed while the bot was offline.
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 */15 * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            match sweep_orphaned_tickets(&db, &http).await {
                Ok(0) => tracing::debug!("Ticket sweep found no orphaned tickets"),
                Ok(removed) => tracing::info!("Ticket sweep removed {} orphaned tickets", removed),
                Err(e) => tracing::error!("Error sweeping orphaned tickets: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Ticket sweep scheduler started");

    Ok(())
}

/// Deletes every ticket whose channel returns 404.
///
/// A failed lookup for one ticket is logged and the sweep moves on.
///
/// # Returns
/// - `Ok(usize)` - Number of ticket rows deleted
/// - `Err(AppError::DbErr)` - Tickets could not be listed
async fn sweep_orphaned_tickets(db: &DatabaseConnection, http: &Http) -> Result<usize, AppError> {
    let repo = TicketRepository::new(db);
    let discord = DiscordService::new(http);
    let mut removed = 0;

    for ticket in repo.get_all().await? {
        match discord.channel_exists(ticket.channel_id).await {
            Ok(true) => {}
            Ok(false) => {
                if repo.delete(ticket.id).await? {
                    tracing::info!(
                        "Deleted ticket #{} in guild {}: channel {} no longer exists",
                        ticket.number,
                        ticket.guild_id,
                        ticket.channel_id
                    );
                    removed += 1;
                }
            }
            Err(e) => tracing::warn!(
                "Could not check channel {} of ticket {}: {}",
                ticket.channel_id,
                ticket.id,
                e
            ),
        }
    }

    Ok(removed)
}
