//! Tag factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for `tag` rows. Author and owner default to the same member.
pub struct TagFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    content: String,
    author_id: String,
    owner_id: String,
    uses: i32,
}

impl<'a> TagFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        let id = next_id();
        let author = next_id().to_string();
        Self {
            db,
            guild_id: guild_id.to_string(),
            name: format!("tag-{}", id),
            content: format!("Content of tag {}", id),
            author_id: author.clone(),
            owner_id: author,
            uses: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    pub fn uses(mut self, uses: i32) -> Self {
        self.uses = uses;
        self
    }

    pub async fn build(self) -> Result<entity::tag::Model, DbErr> {
        entity::tag::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            content: ActiveValue::Set(self.content),
            author_id: ActiveValue::Set(self.author_id),
            owner_id: ActiveValue::Set(self.owner_id),
            uses: ActiveValue::Set(self.uses),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a tag in `guild_id` with default values.
pub async fn create_tag(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::tag::Model, DbErr> {
    TagFactory::new(db, guild_id).build().await
}
