//! User data repository for database operations.
//!
//! Stores dashboard users and their Discord OAuth token pairs.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::server::{
    error::AppError,
    model::user::{TokenPair, UpsertUserParam, User},
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a user or refreshes the name and tokens of an existing one.
    ///
    /// # Arguments
    /// - `param` - Discord ID, current username and the token pair from the login
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            name: ActiveValue::Set(param.name),
            access_token: ActiveValue::Set(param.tokens.access_token),
            refresh_token: ActiveValue::Set(param.tokens.refresh_token),
            token_expires_at: ActiveValue::Set(param.tokens.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_columns([
                    entity::user::Column::Name,
                    entity::user::Column::AccessToken,
                    entity::user::Column::RefreshToken,
                    entity::user::Column::TokenExpiresAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by their Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - User never logged in
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_discord_id(&self, user_id: u64) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Stores a refreshed token pair.
    ///
    /// A refresh response without a new refresh token keeps the old one.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - User does not exist
    pub async fn update_tokens(
        &self,
        user_id: u64,
        tokens: TokenPair,
    ) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        active.access_token = ActiveValue::Set(tokens.access_token);
        if let Some(refresh_token) = tokens.refresh_token {
            active.refresh_token = ActiveValue::Set(Some(refresh_token));
        }
        active.token_expires_at = ActiveValue::Set(tokens.expires_at);
        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)?))
    }
}
