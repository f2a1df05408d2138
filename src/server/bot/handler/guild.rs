//! Guild availability events.
//!
//! Configuration is never deleted when the bot leaves a guild: re-adding
//! the bot picks up the old settings, tickets and tags. These handlers only
//! log so joins, removals and outages show up in the server logs.

use serenity::all::{Context, Guild, UnavailableGuild};

/// Handles the guild_create event when a guild becomes available or the bot joins a new guild.
pub async fn handle_guild_create(_ctx: Context, guild: Guild, is_new: Option<bool>) {
    if is_new == Some(true) {
        tracing::info!(
            "Joined guild {} ({}) with {} members",
            guild.name,
            guild.id,
            guild.member_count
        );
    } else {
        tracing::debug!("Guild available: {} ({})", guild.name, guild.id);
    }
}

/// Handles the guild_delete event.
///
/// `unavailable` is set when the guild went down in an outage rather than
/// the bot being removed.
pub async fn handle_guild_delete(_ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
    let name = full
        .map(|guild| guild.name)
        .unwrap_or_else(|| "unknown".to_string());

    if incomplete.unavailable {
        tracing::warn!("Guild {} ({}) became unavailable", name, incomplete.id);
    } else {
        tracing::info!(
            "Removed from guild {} ({}), keeping its configuration",
            name,
            incomplete.id
        );
    }
}
