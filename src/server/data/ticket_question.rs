use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::question::{QuestionParam, TicketQuestion, MAX_QUESTIONS},
};

pub struct TicketQuestionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketQuestionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a guild's questions in creation order, capped at the modal limit.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<TicketQuestion>, AppError> {
        let entities = entity::prelude::TicketQuestion::find()
            .filter(entity::ticket_question::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::ticket_question::Column::Id)
            .limit(MAX_QUESTIONS as u64)
            .all(self.db)
            .await?;

        entities.into_iter().map(TicketQuestion::from_entity).collect()
    }

    /// Finds a question, scoped to its guild so IDs from other guilds miss.
    pub async fn find_by_id(
        &self,
        guild_id: u64,
        id: i32,
    ) -> Result<Option<TicketQuestion>, AppError> {
        let entity = entity::prelude::TicketQuestion::find_by_id(id)
            .filter(entity::ticket_question::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(TicketQuestion::from_entity).transpose()
    }

    pub async fn count(&self, guild_id: u64) -> Result<u64, AppError> {
        Ok(entity::prelude::TicketQuestion::find()
            .filter(entity::ticket_question::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await?)
    }

    pub async fn create(
        &self,
        guild_id: u64,
        param: QuestionParam,
    ) -> Result<TicketQuestion, AppError> {
        let entity = entity::ticket_question::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            label: ActiveValue::Set(param.label),
            placeholder: ActiveValue::Set(param.placeholder),
            min_length: ActiveValue::Set(param.min_length),
            max_length: ActiveValue::Set(param.max_length),
            required: ActiveValue::Set(param.required),
            default_value: ActiveValue::Set(param.default_value),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        TicketQuestion::from_entity(entity)
    }

    /// Replaces every field of a question.
    ///
    /// # Returns
    /// - `Ok(Some(TicketQuestion))` - Updated question
    /// - `Ok(None)` - No such question in the guild
    pub async fn update(
        &self,
        guild_id: u64,
        id: i32,
        param: QuestionParam,
    ) -> Result<Option<TicketQuestion>, AppError> {
        let Some(entity) = entity::prelude::TicketQuestion::find_by_id(id)
            .filter(entity::ticket_question::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::ticket_question::ActiveModel = entity.into();
        active.label = ActiveValue::Set(param.label);
        active.placeholder = ActiveValue::Set(param.placeholder);
        active.min_length = ActiveValue::Set(param.min_length);
        active.max_length = ActiveValue::Set(param.max_length);
        active.required = ActiveValue::Set(param.required);
        active.default_value = ActiveValue::Set(param.default_value);

        let entity = active.update(self.db).await?;

        Ok(Some(TicketQuestion::from_entity(entity)?))
    }

    /// # Returns
    /// - `Ok(true)` - Question deleted
    /// - `Ok(false)` - No such question in the guild
    pub async fn delete(&self, guild_id: u64, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::TicketQuestion::delete_many()
            .filter(entity::ticket_question::Column::Id.eq(id))
            .filter(entity::ticket_question::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
