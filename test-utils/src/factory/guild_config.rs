//! Guild configuration factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for `guild_config` rows.
///
/// Defaults mirror a guild that has just finished `/setup`: counter at 1, a
/// ticket category and log channel set, pings on, 50 max tickets, creation enabled.
pub struct GuildConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    ticket_counter: i64,
    ticket_category: Option<String>,
    log_channel: Option<String>,
    ping_support_roles: bool,
    max_tickets: i32,
    support_enabled: bool,
}

impl<'a> GuildConfigFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            ticket_counter: 1,
            ticket_category: Some(next_id().to_string()),
            log_channel: Some(next_id().to_string()),
            ping_support_roles: true,
            max_tickets: 50,
            support_enabled: true,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn ticket_counter(mut self, ticket_counter: i64) -> Self {
        self.ticket_counter = ticket_counter;
        self
    }

    pub fn ticket_category(mut self, ticket_category: Option<&str>) -> Self {
        self.ticket_category = ticket_category.map(str::to_string);
        self
    }

    pub fn log_channel(mut self, log_channel: Option<&str>) -> Self {
        self.log_channel = log_channel.map(str::to_string);
        self
    }

    pub fn ping_support_roles(mut self, ping_support_roles: bool) -> Self {
        self.ping_support_roles = ping_support_roles;
        self
    }

    pub fn max_tickets(mut self, max_tickets: i32) -> Self {
        self.max_tickets = max_tickets;
        self
    }

    pub fn support_enabled(mut self, support_enabled: bool) -> Self {
        self.support_enabled = support_enabled;
        self
    }

    /// Inserts the configuration row.
    pub async fn build(self) -> Result<entity::guild_config::Model, DbErr> {
        entity::guild_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            ticket_counter: ActiveValue::Set(self.ticket_counter),
            ticket_category: ActiveValue::Set(self.ticket_category),
            log_channel: ActiveValue::Set(self.log_channel),
            ping_support_roles: ActiveValue::Set(self.ping_support_roles),
            max_tickets: ActiveValue::Set(self.max_tickets),
            support_enabled: ActiveValue::Set(self.support_enabled),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild configuration with default values.
pub async fn create_guild_config(
    db: &DatabaseConnection,
) -> Result<entity::guild_config::Model, DbErr> {
    GuildConfigFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_config_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(GuildConfig).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let config = create_guild_config(db).await?;

        assert_eq!(config.ticket_counter, 1);
        assert_eq!(config.max_tickets, 50);
        assert!(config.support_enabled);
        assert!(config.ticket_category.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn creates_distinct_guilds() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(GuildConfig).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_guild_config(db).await?;
        let second = GuildConfigFactory::new(db)
            .guild_id("42")
            .support_enabled(false)
            .build()
            .await?;

        assert_ne!(first.guild_id, second.guild_id);
        assert_eq!(second.guild_id, "42");
        assert!(!second.support_enabled);

        Ok(())
    }
}
