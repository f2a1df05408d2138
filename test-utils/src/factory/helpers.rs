//! Shared helpers for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique snowflake-like IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Returns the next unique value, starting well above any hard-coded test ID.
pub fn next_id() -> u64 {
    1_000_000_000 + COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a guild configuration and one open ticket inside it.
///
/// # Returns
/// - `Ok((config, ticket))` - Both inserted rows
/// - `Err(DbErr)` - Insert failed
pub async fn create_ticket_with_config(
    db: &DatabaseConnection,
) -> Result<(entity::guild_config::Model, entity::ticket::Model), DbErr> {
    let config = crate::factory::guild_config::create_guild_config(db).await?;
    let ticket = crate::factory::ticket::create_ticket(db, &config.guild_id).await?;

    Ok((config, ticket))
}

/// Creates a guild configuration with the given support roles attached.
///
/// # Arguments
/// - `role_ids` - Role IDs to register as support roles
///
/// # Returns
/// - `Ok(config)` - Inserted configuration
/// - `Err(DbErr)` - Insert failed
pub async fn create_guild_config_with_roles(
    db: &DatabaseConnection,
    role_ids: &[&str],
) -> Result<entity::guild_config::Model, DbErr> {
    let config = crate::factory::guild_config::create_guild_config(db).await?;

    for role_id in role_ids {
        crate::factory::support_role::create_support_role(db, &config.guild_id, *role_id).await?;
    }

    Ok(config)
}
