//! Tag domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::tag::TagDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

pub const MAX_TAG_NAME_LENGTH: usize = 64;
pub const MAX_TAG_CONTENT_LENGTH: usize = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i32,
    pub guild_id: u64,
    pub name: String,
    pub content: String,
    pub author_id: u64,
    pub owner_id: u64,
    pub uses: i32,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn from_entity(entity: entity::tag::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            name: entity.name,
            content: entity.content,
            author_id: parse_u64_from_string(entity.author_id)?,
            owner_id: parse_u64_from_string(entity.owner_id)?,
            uses: entity.uses,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> TagDto {
        TagDto {
            id: self.id,
            name: self.name,
            content: self.content,
            author_id: self.author_id,
            owner_id: self.owner_id,
            uses: self.uses,
            created_at: self.created_at,
        }
    }
}

/// Canonical form of a tag name: trimmed and lower-cased.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct CreateTagParam {
    pub guild_id: u64,
    pub name: String,
    pub content: String,
    pub author_id: u64,
}

/// Changes submitted through the tag edit modal. `None` keeps the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditTagParam {
    pub name: Option<String>,
    pub content: Option<String>,
}
