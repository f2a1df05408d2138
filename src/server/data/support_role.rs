use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Repository for the roles that count as ticket staff in a guild.
pub struct SupportRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SupportRoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the support role IDs of a guild in insertion order.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<u64>, AppError> {
        let entities = entity::prelude::SupportRole::find()
            .filter(entity::support_role::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::support_role::Column::Id)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|e| parse_u64_from_string(e.role_id))
            .collect()
    }

    pub async fn count(&self, guild_id: u64) -> Result<u64, AppError> {
        Ok(entity::prelude::SupportRole::find()
            .filter(entity::support_role::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await?)
    }

    /// Adds a support role.
    ///
    /// # Returns
    /// - `Ok(true)` - Role added
    /// - `Ok(false)` - Role was already a support role
    pub async fn add(&self, guild_id: u64, role_id: u64) -> Result<bool, AppError> {
        if self.exists(guild_id, role_id).await? {
            return Ok(false);
        }

        entity::support_role::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            role_id: ActiveValue::Set(role_id.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Removes a support role.
    ///
    /// # Returns
    /// - `Ok(true)` - Role removed
    /// - `Ok(false)` - Role was not a support role
    pub async fn remove(&self, guild_id: u64, role_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::SupportRole::delete_many()
            .filter(entity::support_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::support_role::Column::RoleId.eq(role_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, guild_id: u64, role_id: u64) -> Result<bool, AppError> {
        let count = entity::prelude::SupportRole::find()
            .filter(entity::support_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::support_role::Column::RoleId.eq(role_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
