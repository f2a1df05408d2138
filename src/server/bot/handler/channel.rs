//! Channel event handlers.
//!
//! Deleting a ticket channel by hand, instead of through `/ticket close`,
//! would leave the member unable to open a new ticket. The delete event
//! drops the ticket row so the channel and the row disappear together.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildChannel, Message};

use crate::server::data::ticket::TicketRepository;

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// Removes the ticket bound to the channel, if there is one. Channels that
/// were never tickets are ignored.
///
/// # Arguments
/// - `db` - Database connection for deleting the ticket record
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `channel` - The deleted guild channel from Discord
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let guild_id = channel.guild_id.get();
    let channel_id = channel.id.get();

    match TicketRepository::new(db)
        .delete_by_channel_id(channel_id)
        .await
    {
        Ok(true) => tracing::info!(
            "Deleted ticket bound to removed channel {} in guild {}",
            channel_id,
            guild_id
        ),
        Ok(false) => {}
        Err(e) => tracing::error!(
            "Failed to delete ticket for channel {} in guild {}: {:?}",
            channel_id,
            guild_id,
            e
        ),
    }
}
