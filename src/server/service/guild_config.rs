//! Guild configuration changes made through `/setup` and `/settings`.

use std::fmt;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        guild_config::GuildConfigRepository, support_role::SupportRoleRepository,
        ticket_question::TicketQuestionRepository,
    },
    error::AppError,
    model::guild_config::{
        GuildConfig, GuildConfigDetails, GuildConfigUpdate, SetupGuildParam, MAX_SUPPORT_ROLES,
        MAX_TICKETS_LIMIT,
    },
};

/// Reply for every settings command on a guild that never ran `/setup`.
pub const NOT_CONFIGURED: &str = "This server has not yet been configured. Please use /setup.";

/// Outcome of adding or removing a support role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportRoleChange {
    Added(u64),
    Removed(u64),
    AlreadyListed,
    NotListed,
    LimitReached,
}

impl fmt::Display for SupportRoleChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(role_id) => write!(f, "Added <@&{}> to the support roles.", role_id),
            Self::Removed(role_id) => write!(f, "Removed <@&{}> from the support roles.", role_id),
            Self::AlreadyListed => write!(f, "That role is already in the list."),
            Self::NotListed => write!(f, "That role is not in the list."),
            Self::LimitReached => write!(
                f,
                "You can only have up to {} support roles.",
                MAX_SUPPORT_ROLES
            ),
        }
    }
}

pub struct GuildConfigService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<GuildConfig>, AppError> {
        GuildConfigRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await
    }

    /// Gets a configuration together with its support roles and questions.
    ///
    /// # Returns
    /// - `Ok(Some(GuildConfigDetails))` - Guild is configured
    /// - `Ok(None)` - Guild never ran `/setup`
    pub async fn details(&self, guild_id: u64) -> Result<Option<GuildConfigDetails>, AppError> {
        let Some(config) = self.get(guild_id).await? else {
            return Ok(None);
        };

        let support_roles = SupportRoleRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?;
        let questions = TicketQuestionRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?;

        Ok(Some(GuildConfigDetails {
            config,
            support_roles,
            questions,
        }))
    }

    /// Stores the result of the setup wizard.
    ///
    /// # Returns
    /// - `Ok(true)` - Guild was configured for the first time
    /// - `Ok(false)` - Existing configuration was updated
    pub async fn setup(&self, param: SetupGuildParam) -> Result<bool, AppError> {
        let guild_id = param.guild_id;
        let (_, is_new) = GuildConfigRepository::new(self.db).setup(param).await?;

        tracing::info!(
            "{} configuration of guild {}",
            if is_new { "Created" } else { "Updated" },
            guild_id
        );

        Ok(is_new)
    }

    /// Applies one settings change.
    ///
    /// # Returns
    /// - `Ok(Some(GuildConfig))` - Updated configuration
    /// - `Ok(None)` - Guild is not configured
    /// - `Err(AppError::BadRequest)` - Max tickets outside `1..=50`
    pub async fn update(
        &self,
        guild_id: u64,
        update: GuildConfigUpdate,
    ) -> Result<Option<GuildConfig>, AppError> {
        if let GuildConfigUpdate::MaxTickets(max) = update {
            if !(1..=MAX_TICKETS_LIMIT).contains(&max) {
                return Err(AppError::BadRequest(format!(
                    "Max tickets must be between 1 and {}.",
                    MAX_TICKETS_LIMIT
                )));
            }
        }

        GuildConfigRepository::new(self.db)
            .update(guild_id, update)
            .await
    }

    /// Deletes a configuration and everything under it.
    pub async fn reset(&self, guild_id: u64) -> Result<bool, AppError> {
        let deleted = GuildConfigRepository::new(self.db).delete(guild_id).await?;
        if deleted {
            tracing::info!("Reset configuration of guild {}", guild_id);
        }

        Ok(deleted)
    }

    pub async fn add_support_role(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<SupportRoleChange, AppError> {
        let repo = SupportRoleRepository::new(self.db);

        let roles = repo.get_by_guild_id(guild_id).await?;
        if roles.contains(&role_id) {
            return Ok(SupportRoleChange::AlreadyListed);
        }
        if roles.len() >= MAX_SUPPORT_ROLES {
            return Ok(SupportRoleChange::LimitReached);
        }

        repo.add(guild_id, role_id).await?;

        Ok(SupportRoleChange::Added(role_id))
    }

    pub async fn remove_support_role(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<SupportRoleChange, AppError> {
        if SupportRoleRepository::new(self.db)
            .remove(guild_id, role_id)
            .await?
        {
            Ok(SupportRoleChange::Removed(role_id))
        } else {
            Ok(SupportRoleChange::NotListed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Expected: the 26th role is refused and duplicates are reported
    #[tokio::test]
    async fn enforces_support_role_rules() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::guild_config::GuildConfigFactory::new(db)
            .guild_id("1")
            .build()
            .await?;
        for role_id in 1..=25 {
            factory::support_role::create_support_role(db, "1", &role_id.to_string()).await?;
        }

        let service = GuildConfigService::new(db);

        assert_eq!(
            service.add_support_role(1, 5).await?,
            SupportRoleChange::AlreadyListed
        );
        assert_eq!(
            service.add_support_role(1, 99).await?,
            SupportRoleChange::LimitReached
        );
        assert_eq!(
            service.remove_support_role(1, 5).await?,
            SupportRoleChange::Removed(5)
        );
        assert_eq!(
            service.add_support_role(1, 99).await?,
            SupportRoleChange::Added(99)
        );
        assert_eq!(
            service.remove_support_role(1, 5).await?,
            SupportRoleChange::NotListed
        );

        Ok(())
    }

    /// Expected: BadRequest for 0 and 51, stored value for 10
    #[tokio::test]
    async fn validates_max_tickets() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::guild_config::GuildConfigFactory::new(db)
            .guild_id("1")
            .build()
            .await?;

        let service = GuildConfigService::new(db);

        assert!(matches!(
            service.update(1, GuildConfigUpdate::MaxTickets(0)).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.update(1, GuildConfigUpdate::MaxTickets(51)).await,
            Err(AppError::BadRequest(_))
        ));
        let config = service
            .update(1, GuildConfigUpdate::MaxTickets(10))
            .await?
            .unwrap();
        assert_eq!(config.max_tickets, 10);

        Ok(())
    }

    #[test]
    fn support_role_messages() {
        assert_eq!(
            SupportRoleChange::LimitReached.to_string(),
            "You can only have up to 25 support roles."
        );
        assert_eq!(
            SupportRoleChange::AlreadyListed.to_string(),
            "That role is already in the list."
        );
    }
}
