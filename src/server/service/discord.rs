//! Discord REST lookups shared by the bot and the web API.
//!
//! Effective permissions are resolved by serenity from a fetched
//! [`PartialGuild`] and [`Member`], with channel overwrites applied through
//! [`PartialGuild::user_permissions_in`].

use serenity::all::{
    ChannelId, GuildChannel, GuildId, Http, Member, PartialGuild, Permissions, RoleId, UserId,
};

use crate::server::{
    error::AppError,
    util::{discord::is_not_found, permissions::log_channel_required},
};

pub struct DiscordService<'a> {
    http: &'a Http,
}

impl<'a> DiscordService<'a> {
    pub fn new(http: &'a Http) -> Self {
        Self { http }
    }

    /// Fetches a guild with its roles using the bot token.
    ///
    /// # Returns
    /// - `Ok(Some(PartialGuild))` - The bot is in the guild
    /// - `Ok(None)` - Unknown guild, or the bot was removed
    pub async fn guild(&self, guild_id: u64) -> Result<Option<PartialGuild>, AppError> {
        match self.http.get_guild(GuildId::new(guild_id)).await {
            Ok(guild) => Ok(Some(guild)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches a guild channel, mapping Discord's 404 to `None`.
    pub async fn channel(&self, channel_id: u64) -> Result<Option<GuildChannel>, AppError> {
        match self.http.get_channel(ChannelId::new(channel_id)).await {
            Ok(channel) => Ok(channel.guild()),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a channel still exists.
    pub async fn channel_exists(&self, channel_id: u64) -> Result<bool, AppError> {
        Ok(self.channel(channel_id).await?.is_some())
    }

    /// Gets every channel of a guild.
    pub async fn guild_channels(&self, guild_id: u64) -> Result<Vec<GuildChannel>, AppError> {
        let channels = GuildId::new(guild_id).channels(self.http).await?;

        Ok(channels.into_values().collect())
    }

    /// Fetches a guild member, mapping Discord's 404 to `None`.
    pub async fn member(&self, guild_id: u64, user_id: u64) -> Result<Option<Member>, AppError> {
        match self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await
        {
            Ok(member) => Ok(Some(member)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a user is a member of a guild.
    pub async fn is_member(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        Ok(self.member(guild_id, user_id).await?.is_some())
    }

    /// Role IDs of a guild member, or `None` if they are not in the guild.
    pub async fn member_roles(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<Vec<RoleId>>, AppError> {
        Ok(self
            .member(guild_id, user_id)
            .await?
            .map(|member| member.roles))
    }

    /// Whether a member can see `channel`, taking its overwrites into account.
    pub async fn member_can_view(
        &self,
        channel: &GuildChannel,
        user_id: u64,
    ) -> Result<bool, AppError> {
        Ok(self
            .permissions_in(channel, user_id)
            .await?
            .view_channel())
    }

    /// Computes what the bot itself may do in `channel`.
    pub async fn bot_permissions_in(&self, channel: &GuildChannel) -> Result<Permissions, AppError> {
        let bot_id = self.http.get_current_user().await?.id.get();

        self.permissions_in(channel, bot_id).await
    }

    /// Permissions of `user_id` in `channel`; empty when the guild or the
    /// member cannot be found.
    async fn permissions_in(
        &self,
        channel: &GuildChannel,
        user_id: u64,
    ) -> Result<Permissions, AppError> {
        let guild_id = channel.guild_id.get();
        let Some(guild) = self.guild(guild_id).await? else {
            return Ok(Permissions::empty());
        };
        let Some(member) = self.member(guild_id, user_id).await? else {
            return Ok(Permissions::empty());
        };

        Ok(guild.user_permissions_in(channel, &member))
    }

    /// Returns the log channel if the bot can post embeds there.
    pub async fn usable_log_channel(
        &self,
        log_channel: Option<u64>,
    ) -> Result<Option<GuildChannel>, AppError> {
        let Some(channel_id) = log_channel else {
            return Ok(None);
        };
        let Some(channel) = self.channel(channel_id).await? else {
            return Ok(None);
        };

        let permissions = self.bot_permissions_in(&channel).await?;
        if !permissions.contains(log_channel_required()) {
            return Ok(None);
        }

        Ok(Some(channel))
    }
}
