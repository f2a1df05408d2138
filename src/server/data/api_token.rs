use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{error::AppError, model::api_token::ApiToken};

pub struct ApiTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApiTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a token secret for a user.
    pub async fn create(&self, user_id: u64, token: String) -> Result<ApiToken, AppError> {
        let entity = entity::api_token::ActiveModel {
            token: ActiveValue::Set(token),
            user_discord_id: ActiveValue::Set(user_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ApiToken::from_entity(entity)
    }

    /// Looks a token up by its secret.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<ApiToken>, AppError> {
        let entity = entity::prelude::ApiToken::find()
            .filter(entity::api_token::Column::Token.eq(token))
            .one(self.db)
            .await?;

        entity.map(ApiToken::from_entity).transpose()
    }

    /// Gets a user's tokens, newest first.
    pub async fn get_by_user(&self, user_id: u64) -> Result<Vec<ApiToken>, AppError> {
        let entities = entity::prelude::ApiToken::find()
            .filter(entity::api_token::Column::UserDiscordId.eq(user_id.to_string()))
            .order_by_desc(entity::api_token::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(ApiToken::from_entity).collect()
    }

    /// Revokes one of a user's tokens.
    ///
    /// # Returns
    /// - `Ok(true)` - Token revoked
    /// - `Ok(false)` - No such token owned by the user
    pub async fn delete(&self, user_id: u64, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::ApiToken::delete_many()
            .filter(entity::api_token::Column::Id.eq(id))
            .filter(entity::api_token::Column::UserDiscordId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
