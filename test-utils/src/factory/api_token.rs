//! API token factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a bearer token owned by `user_discord_id`.
///
/// The token is a unique 64 character hex string derived from the factory counter.
pub async fn create_api_token(
    db: &DatabaseConnection,
    user_discord_id: &str,
) -> Result<entity::api_token::Model, DbErr> {
    entity::api_token::ActiveModel {
        token: ActiveValue::Set(format!("{:064x}", next_id())),
        user_discord_id: ActiveValue::Set(user_discord_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
