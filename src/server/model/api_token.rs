//! Personal API tokens used as `Authorization: Bearer` credentials.

use chrono::{DateTime, Utc};

use crate::{
    model::token::{ApiTokenDto, CreatedApiTokenDto},
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Characters of the secret shown when listing tokens.
const PREFIX_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiToken {
    pub id: i32,
    pub token: String,
    pub user_discord_id: u64,
    pub created_at: DateTime<Utc>,
}

impl ApiToken {
    pub fn from_entity(entity: entity::api_token::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            token: entity.token,
            user_discord_id: parse_u64_from_string(entity.user_discord_id)?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ApiTokenDto {
        ApiTokenDto {
            id: self.id,
            prefix: self.token.chars().take(PREFIX_LENGTH).collect(),
            created_at: self.created_at,
        }
    }

    /// DTO carrying the full secret, returned once at creation.
    pub fn into_created_dto(self) -> CreatedApiTokenDto {
        CreatedApiTokenDto {
            id: self.id,
            token: self.token,
            created_at: self.created_at,
        }
    }
}
