use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, EventHandler, Guild, GuildChannel, Interaction, Message, Ready, UnavailableGuild,
};
use serenity::async_trait;

use crate::server::{
    bot::command::setup::SetupDraft,
    util::{concurrency::ConcurrencyGuard, expiring::ExpiringMap},
};

pub mod channel;
pub mod guild;
pub mod interaction;
pub mod ready;

/// How long a `/setup` draft or a pending ticket topic survives without activity.
pub const DRAFT_TTL: Duration = Duration::from_secs(10 * 60);

/// Discord bot event handler and the state shared by all interactions.
pub struct Handler {
    pub db: DatabaseConnection,
    /// Shared with the dashboard API.
    pub concurrency: ConcurrencyGuard,
    /// Setup wizard drafts keyed by `(guild_id, user_id)`.
    pub setup_drafts: ExpiringMap<(u64, u64), SetupDraft>,
    /// Topics of `/ticket new` invocations waiting on the question modal.
    pub pending_topics: ExpiringMap<(u64, u64), Option<String>>,
    pub started_at: DateTime<Utc>,
    pub owner_id: Option<u64>,
    /// Guilds to register commands in instead of globally.
    pub debug_guilds: Vec<u64>,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        concurrency: ConcurrencyGuard,
        owner_id: Option<u64>,
        debug_guilds: Vec<u64>,
    ) -> Self {
        Self {
            db,
            concurrency,
            setup_drafts: ExpiringMap::new(DRAFT_TTL),
            pending_topics: ExpiringMap::new(DRAFT_TTL),
            started_at: Utc::now(),
            owner_id,
            debug_guilds,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called for every slash command, autocomplete, component and modal
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(ctx, guild, is_new).await;
    }

    /// Called when the bot is removed from a guild or the guild goes down
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(ctx, incomplete, full).await;
    }

    /// Called when a channel is deleted from a guild
    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(&self.db, ctx, channel, messages).await;
    }
}
