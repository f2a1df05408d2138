use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::tag::{CreateTagParam, Tag},
};

/// Repository for per-guild tags. Names passed in must already be normalized.
pub struct TagRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, guild_id: u64, name: &str) -> Result<Option<Tag>, AppError> {
        let entity = entity::prelude::Tag::find()
            .filter(entity::tag::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::tag::Column::Name.eq(name))
            .one(self.db)
            .await?;

        entity.map(Tag::from_entity).transpose()
    }

    pub async fn find_by_id(&self, guild_id: u64, id: i32) -> Result<Option<Tag>, AppError> {
        let entity = entity::prelude::Tag::find_by_id(id)
            .filter(entity::tag::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Tag::from_entity).transpose()
    }

    /// Names of tags containing `query`, most used first.
    pub async fn search_names(
        &self,
        guild_id: u64,
        query: &str,
        limit: u64,
    ) -> Result<Vec<String>, AppError> {
        let entities = entity::prelude::Tag::find()
            .filter(entity::tag::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::tag::Column::Name.contains(query))
            .order_by_desc(entity::tag::Column::Uses)
            .order_by_asc(entity::tag::Column::Name)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|e| e.name).collect())
    }

    /// Gets one page of tags, most used first, optionally filtered by name.
    ///
    /// # Arguments
    /// - `search` - Substring the name must contain
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Tags per page
    ///
    /// # Returns
    /// - `Ok((Vec<Tag>, u64))` - Tags on the page and the total number of matches
    pub async fn get_page(
        &self,
        guild_id: u64,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Tag>, u64), AppError> {
        let mut query = entity::prelude::Tag::find()
            .filter(entity::tag::Column::GuildId.eq(guild_id.to_string()));
        if let Some(search) = search {
            query = query.filter(entity::tag::Column::Name.contains(search));
        }

        let paginator = query
            .order_by_desc(entity::tag::Column::Uses)
            .order_by_asc(entity::tag::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let tags = entities
            .into_iter()
            .map(Tag::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((tags, total))
    }

    /// Gets all tags of a guild, most used first.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<Tag>, AppError> {
        let entities = entity::prelude::Tag::find()
            .filter(entity::tag::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::tag::Column::Uses)
            .order_by_asc(entity::tag::Column::Name)
            .all(self.db)
            .await?;

        entities.into_iter().map(Tag::from_entity).collect()
    }

    /// Creates a tag owned by its author.
    ///
    /// # Returns
    /// - `Ok(Some(Tag))` - Tag created
    /// - `Ok(None)` - A tag with that name already exists in the guild
    pub async fn create(&self, param: CreateTagParam) -> Result<Option<Tag>, AppError> {
        if self.find_by_name(param.guild_id, &param.name).await?.is_some() {
            return Ok(None);
        }

        let entity = entity::tag::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            name: ActiveValue::Set(param.name),
            content: ActiveValue::Set(param.content),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            owner_id: ActiveValue::Set(param.author_id.to_string()),
            uses: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Some(Tag::from_entity(entity)?))
    }

    /// Bumps the use counter of a tag.
    pub async fn increment_uses(&self, id: i32) -> Result<(), AppError> {
        let Some(entity) = entity::prelude::Tag::find_by_id(id).one(self.db).await? else {
            return Ok(());
        };

        let uses = entity.uses;
        let mut active: entity::tag::ActiveModel = entity.into();
        active.uses = ActiveValue::Set(uses.saturating_add(1));
        active.update(self.db).await?;

        Ok(())
    }

    /// Overwrites name and content of a tag.
    pub async fn update(&self, id: i32, name: String, content: String) -> Result<Option<Tag>, AppError> {
        let Some(entity) = entity::prelude::Tag::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::tag::ActiveModel = entity.into();
        active.name = ActiveValue::Set(name);
        active.content = ActiveValue::Set(content);
        let entity = active.update(self.db).await?;

        Ok(Some(Tag::from_entity(entity)?))
    }

    /// Hands a tag to a new owner.
    pub async fn set_owner(&self, id: i32, owner_id: u64) -> Result<Option<Tag>, AppError> {
        let Some(entity) = entity::prelude::Tag::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::tag::ActiveModel = entity.into();
        active.owner_id = ActiveValue::Set(owner_id.to_string());
        let entity = active.update(self.db).await?;

        Ok(Some(Tag::from_entity(entity)?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Tag::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
