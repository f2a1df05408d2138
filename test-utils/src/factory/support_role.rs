//! Support role factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Registers `role_id` as a support role of `guild_id`.
///
/// # Returns
/// - `Ok(entity::support_role::Model)` - Inserted row
/// - `Err(DbErr)` - Insert failed (for example a missing guild configuration)
pub async fn create_support_role(
    db: &DatabaseConnection,
    guild_id: &str,
    role_id: impl Into<String>,
) -> Result<entity::support_role::Model, DbErr> {
    entity::support_role::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        role_id: ActiveValue::Set(role_id.into()),
        ..Default::default()
    }
    .insert(db)
    .await
}
