use serenity::all::{ChannelId, EditChannel};

use crate::server::{
    data::ticket::TicketRepository, error::AppError, model::ticket::Ticket,
    service::{discord::DiscordService, ticket::TicketService},
};

impl<'a> TicketService<'a> {
    /// Sets the lock flag and renames the channel to match.
    ///
    /// The rename only happens when the bot has Manage Channels in the ticket
    /// channel; the flag is stored either way.
    pub async fn set_locked(&self, ticket: &Ticket, locked: bool) -> Result<Ticket, AppError> {
        let updated = TicketRepository::new(self.db)
            .set_locked(ticket.id, locked)
            .await?
            .ok_or_else(|| AppError::NotFound("Unknown ticket.".to_string()))?;

        if let Err(e) = self.rename_channel(&updated).await {
            tracing::warn!(
                "Failed to rename channel of ticket #{} in guild {}: {}",
                updated.number,
                updated.guild_id,
                e
            );
        }

        Ok(updated)
    }

    /// Flips the lock flag.
    pub async fn toggle_lock(&self, ticket: &Ticket) -> Result<Ticket, AppError> {
        self.set_locked(ticket, !ticket.locked).await
    }

    async fn rename_channel(&self, ticket: &Ticket) -> Result<(), AppError> {
        let discord = DiscordService::new(self.http);
        let Some(channel) = discord.channel(ticket.channel_id).await? else {
            return Ok(());
        };

        let name = ticket.channel_name();
        if channel.name == name {
            return Ok(());
        }
        if !discord.bot_permissions_in(&channel).await?.manage_channels() {
            return Ok(());
        }

        ChannelId::new(ticket.channel_id)
            .edit(self.http, EditChannel::new().name(name))
            .await?;

        Ok(())
    }
}

/// Reply announcing the new lock state.
pub fn lock_reply(locked: bool) -> &'static str {
    if locked {
        "🔒 Ticket is now locked, so only administrators can close it. Run this command again to unlock it."
    } else {
        "🔓 Ticket is now unlocked, so anyone can close it. Run this command again to lock it."
    }
}
