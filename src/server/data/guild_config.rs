//! Guild configuration repository.
//!
//! Owns the `guild_config` row and, for setup and reset, the support roles
//! that belong to it. Setup and reset run in a transaction so a guild is
//! never left half configured.

use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::guild_config::{GuildConfig, GuildConfigUpdate, SetupGuildParam, MAX_TICKETS_LIMIT},
};

pub struct GuildConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the configuration of a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildConfig))` - Guild has been set up
    /// - `Ok(None)` - Guild has never run `/setup` or was reset
    /// - `Err(AppError)` - Database error or malformed stored snowflake
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildConfig>, AppError> {
        let entity = find_model(self.db, guild_id).await?;

        entity.map(GuildConfig::from_entity).transpose()
    }

    /// Returns which of `guild_ids` have a configuration row.
    pub async fn filter_configured(&self, guild_ids: &[u64]) -> Result<Vec<u64>, AppError> {
        if guild_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = guild_ids.iter().map(u64::to_string).collect();
        let entities = entity::prelude::GuildConfig::find()
            .filter(entity::guild_config::Column::GuildId.is_in(ids))
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|e| GuildConfig::from_entity(e).map(|config| config.guild_id))
            .collect()
    }

    /// Number of configured guilds.
    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(entity::prelude::GuildConfig::find().count(self.db).await?)
    }

    /// Stores the result of the setup wizard.
    ///
    /// Inserts the configuration or updates the category, log channel and ping
    /// flag of an existing one, then replaces the guild's support roles. The
    /// ticket counter and other settings of an existing configuration are kept.
    ///
    /// # Returns
    /// - `Ok((GuildConfig, true))` - Guild was configured for the first time
    /// - `Ok((GuildConfig, false))` - Existing configuration was updated
    /// - `Err(AppError)` - Database error; nothing was written
    pub async fn setup(&self, param: SetupGuildParam) -> Result<(GuildConfig, bool), AppError> {
        let txn = self.db.begin().await?;
        let guild_id = param.guild_id.to_string();

        let is_new = find_model(&txn, param.guild_id).await?.is_none();

        let entity = entity::prelude::GuildConfig::insert(entity::guild_config::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.clone()),
            ticket_counter: ActiveValue::Set(1),
            ticket_category: ActiveValue::Set(Some(param.ticket_category.to_string())),
            log_channel: ActiveValue::Set(Some(param.log_channel.to_string())),
            ping_support_roles: ActiveValue::Set(param.ping_support_roles),
            max_tickets: ActiveValue::Set(MAX_TICKETS_LIMIT),
            support_enabled: ActiveValue::Set(true),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::guild_config::Column::GuildId)
                .update_columns([
                    entity::guild_config::Column::TicketCategory,
                    entity::guild_config::Column::LogChannel,
                    entity::guild_config::Column::PingSupportRoles,
                ])
                .to_owned(),
        )
        .exec_with_returning(&txn)
        .await?;

        entity::prelude::SupportRole::delete_many()
            .filter(entity::support_role::Column::GuildId.eq(guild_id.as_str()))
            .exec(&txn)
            .await?;

        if !param.support_roles.is_empty() {
            let roles = param
                .support_roles
                .iter()
                .map(|role_id| entity::support_role::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.clone()),
                    role_id: ActiveValue::Set(role_id.to_string()),
                    ..Default::default()
                });
            entity::prelude::SupportRole::insert_many(roles)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok((GuildConfig::from_entity(entity)?, is_new))
    }

    /// Applies a single settings change.
    ///
    /// # Returns
    /// - `Ok(Some(GuildConfig))` - Updated configuration
    /// - `Ok(None)` - Guild is not configured
    /// - `Err(AppError)` - Database error
    pub async fn update(
        &self,
        guild_id: u64,
        update: GuildConfigUpdate,
    ) -> Result<Option<GuildConfig>, AppError> {
        let Some(entity) = find_model(self.db, guild_id).await? else {
            return Ok(None);
        };

        let mut active: entity::guild_config::ActiveModel = entity.into();
        match update {
            GuildConfigUpdate::LogChannel(channel) => {
                active.log_channel = ActiveValue::Set(channel.map(|id| id.to_string()));
            }
            GuildConfigUpdate::TicketCategory(category) => {
                active.ticket_category = ActiveValue::Set(category.map(|id| id.to_string()));
            }
            GuildConfigUpdate::MaxTickets(max) => {
                active.max_tickets = ActiveValue::Set(max);
            }
            GuildConfigUpdate::SupportEnabled(enabled) => {
                active.support_enabled = ActiveValue::Set(enabled);
            }
            GuildConfigUpdate::PingSupportRoles(ping) => {
                active.ping_support_roles = ActiveValue::Set(ping);
            }
        }

        let entity = active.update(self.db).await?;

        Ok(Some(GuildConfig::from_entity(entity)?))
    }

    /// Deletes a guild's configuration and everything owned by it.
    ///
    /// Children are removed explicitly rather than relying on the foreign key
    /// cascade, which SQLite only honours with `foreign_keys` enabled.
    ///
    /// # Returns
    /// - `Ok(true)` - Configuration existed and was removed
    /// - `Ok(false)` - Guild was not configured
    pub async fn delete(&self, guild_id: u64) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;
        let id = guild_id.to_string();

        entity::prelude::SupportRole::delete_many()
            .filter(entity::support_role::Column::GuildId.eq(id.as_str()))
            .exec(&txn)
            .await?;
        entity::prelude::TicketQuestion::delete_many()
            .filter(entity::ticket_question::Column::GuildId.eq(id.as_str()))
            .exec(&txn)
            .await?;
        entity::prelude::Ticket::delete_many()
            .filter(entity::ticket::Column::GuildId.eq(id.as_str()))
            .exec(&txn)
            .await?;
        entity::prelude::Tag::delete_many()
            .filter(entity::tag::Column::GuildId.eq(id.as_str()))
            .exec(&txn)
            .await?;
        let result = entity::prelude::GuildConfig::delete_many()
            .filter(entity::guild_config::Column::GuildId.eq(id.as_str()))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}

async fn find_model<C: ConnectionTrait>(
    db: &C,
    guild_id: u64,
) -> Result<Option<entity::guild_config::Model>, AppError> {
    Ok(entity::prelude::GuildConfig::find()
        .filter(entity::guild_config::Column::GuildId.eq(guild_id.to_string()))
        .one(db)
        .await?)
}
