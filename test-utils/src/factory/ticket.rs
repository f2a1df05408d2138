//! Ticket factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for `ticket` rows.
///
/// Defaults to an unlocked ticket with a fresh author, channel and number.
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    number: i64,
    author_id: String,
    channel_id: String,
    subject: Option<String>,
    locked: bool,
}

impl<'a> TicketFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            number: 1,
            author_id: next_id().to_string(),
            channel_id: next_id().to_string(),
            subject: None,
            locked: false,
        }
    }

    pub fn number(mut self, number: i64) -> Self {
        self.number = number;
        self
    }

    pub fn author_id(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = author_id.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            number: ActiveValue::Set(self.number),
            author_id: ActiveValue::Set(self.author_id),
            channel_id: ActiveValue::Set(self.channel_id),
            subject: ActiveValue::Set(self.subject),
            opened_at: ActiveValue::Set(Utc::now()),
            locked: ActiveValue::Set(self.locked),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a ticket in `guild_id` with default values.
pub async fn create_ticket(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, guild_id).build().await
}
