use serenity::all::{ChannelId, CreateAllowedMentions, CreateMessage, User};

use crate::server::{
    data::{guild_config::GuildConfigRepository, ticket::TicketRepository},
    error::AppError,
    model::ticket::Ticket,
    service::{discord::DiscordService, ticket::message, ticket::TicketService},
    util::discord::is_not_found,
};

/// Reason recorded when the closer gives none.
pub const DEFAULT_CLOSE_REASON: &str = "No reason provided.";

impl<'a> TicketService<'a> {
    /// Posts the close record to the guild's log channel.
    ///
    /// # Returns
    /// - `Ok(true)` - Logged
    /// - `Ok(false)` - No usable log channel
    pub async fn send_close_log(
        &self,
        ticket: &Ticket,
        closer: &User,
        reason: &str,
    ) -> Result<bool, AppError> {
        let Some(config) = GuildConfigRepository::new(self.db)
            .find_by_guild_id(ticket.guild_id)
            .await?
        else {
            return Ok(false);
        };

        let discord = DiscordService::new(self.http);
        let Some(log_channel) = discord.usable_log_channel(config.log_channel).await? else {
            return Ok(false);
        };

        log_channel
            .id
            .send_message(
                self.http,
                CreateMessage::new()
                    .content(format!(
                        "Ticket #{} closed by <@{}>.",
                        ticket.number, closer.id
                    ))
                    .embed(message::log_closed(ticket, closer, reason))
                    .allowed_mentions(CreateAllowedMentions::new()),
            )
            .await?;

        Ok(true)
    }

    /// Deletes the ticket row and then its channel.
    ///
    /// A channel that is already gone is not an error.
    pub async fn finish_close(&self, ticket: &Ticket, closer: &User) -> Result<(), AppError> {
        TicketRepository::new(self.db).delete(ticket.id).await?;

        let reason = format!("Closed by {}.", closer.name);
        match self
            .http
            .delete_channel(ChannelId::new(ticket.channel_id), Some(&reason))
            .await
        {
            Ok(_) => {}
            Err(e) if is_not_found(&e) => {}
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            "Closed ticket #{} in guild {} by {}",
            ticket.number,
            ticket.guild_id,
            closer.id
        );

        Ok(())
    }

    /// Logs and closes a ticket in one go.
    ///
    /// # Returns
    /// - `Ok(true)` - Closed and logged
    /// - `Ok(false)` - Closed without a log entry
    pub async fn close(&self, ticket: &Ticket, closer: &User, reason: &str) -> Result<bool, AppError> {
        let logged = match self.send_close_log(ticket, closer, reason).await {
            Ok(logged) => logged,
            Err(e) => {
                tracing::warn!("Failed to log closing of ticket #{}: {}", ticket.number, e);
                false
            }
        };

        self.finish_close(ticket, closer).await?;

        Ok(logged)
    }
}
