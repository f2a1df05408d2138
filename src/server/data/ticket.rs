//! Ticket repository.
//!
//! Ticket numbers come from `guild_config.ticket_counter`. Creating a ticket
//! reads the counter, inserts the row and bumps the counter in one
//! transaction, so numbers are never reused within a guild.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::ticket::{CreateTicketParam, Ticket},
};

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the ticket whose channel is `channel_id`.
    pub async fn find_by_channel_id(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Finds the open ticket of a member in a guild.
    pub async fn find_by_author(
        &self,
        guild_id: u64,
        author_id: u64,
    ) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::AuthorId.eq(author_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Finds a ticket by ID within a guild.
    pub async fn find_by_id(&self, guild_id: u64, id: i32) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find_by_id(id)
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Gets a guild's open tickets, oldest first.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<Ticket>, AppError> {
        let entities = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::ticket::Column::Number)
            .all(self.db)
            .await?;

        entities.into_iter().map(Ticket::from_entity).collect()
    }

    /// Gets every open ticket across all guilds.
    pub async fn get_all(&self) -> Result<Vec<Ticket>, AppError> {
        let entities = entity::prelude::Ticket::find()
            .order_by_asc(entity::ticket::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(Ticket::from_entity).collect()
    }

    /// Inserts a ticket with the guild's next number and advances the counter.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The new ticket
    /// - `Err(AppError::InternalErr(MissingGuildConfig))` - Guild is not configured
    /// - `Err(AppError::DbErr)` - Insert failed, e.g. the channel is already a ticket;
    ///   the counter is left untouched
    pub async fn create(&self, param: CreateTicketParam) -> Result<Ticket, AppError> {
        let txn = self.db.begin().await?;

        let config = entity::prelude::GuildConfig::find()
            .filter(entity::guild_config::Column::GuildId.eq(param.guild_id.to_string()))
            .one(&txn)
            .await?
            .ok_or(InternalError::MissingGuildConfig(param.guild_id))?;
        let number = config.ticket_counter;

        let entity = entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            number: ActiveValue::Set(number),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            subject: ActiveValue::Set(param.subject),
            opened_at: ActiveValue::Set(Utc::now()),
            locked: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut active: entity::guild_config::ActiveModel = config.into();
        active.ticket_counter = ActiveValue::Set(number + 1);
        active.update(&txn).await?;

        txn.commit().await?;

        Ticket::from_entity(entity)
    }

    /// Sets the lock flag of a ticket.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - Updated ticket
    /// - `Ok(None)` - Ticket no longer exists
    pub async fn set_locked(&self, id: i32, locked: bool) -> Result<Option<Ticket>, AppError> {
        let Some(entity) = entity::prelude::Ticket::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::ticket::ActiveModel = entity.into();
        active.locked = ActiveValue::Set(locked);
        let entity = active.update(self.db).await?;

        Ok(Some(Ticket::from_entity(entity)?))
    }

    /// # Returns
    /// - `Ok(true)` - Ticket deleted
    /// - `Ok(false)` - Ticket was already gone
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Ticket::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes the ticket bound to a channel, if any.
    pub async fn delete_by_channel_id(&self, channel_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::Ticket::delete_many()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
