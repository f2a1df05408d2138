//! Ready event handler for bot initialization.
//!
//! The ready event fires after every gateway (re)connect. Command
//! registration is idempotent on Discord's side, so re-registering on each
//! ready keeps the command set in sync with the running binary.

use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::server::bot::{command, handler::Handler};

/// Handles the ready event when the bot connects to Discord.
///
/// Registers the command set globally, or in each debug guild when any are
/// configured. Guild commands update instantly while global ones can take
/// up to an hour to propagate.
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord, serving {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::watching("for /ticket new")));

    if handler.debug_guilds.is_empty() {
        match Command::set_global_commands(&ctx.http, command::all()).await {
            Ok(commands) => tracing::info!("Registered {} global commands", commands.len()),
            Err(e) => tracing::error!("Failed to register global commands: {:?}", e),
        }
        return;
    }

    for guild_id in &handler.debug_guilds {
        match GuildId::new(*guild_id)
            .set_commands(&ctx.http, command::all())
            .await
        {
            Ok(commands) => tracing::info!(
                "Registered {} commands in debug guild {}",
                commands.len(),
                guild_id
            ),
            Err(e) => tracing::error!(
                "Failed to register commands in debug guild {}: {:?}",
                guild_id,
                e
            ),
        }
    }
}
