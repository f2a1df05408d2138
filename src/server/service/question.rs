//! Intake question management for the `/settings` question manager.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::ticket_question::TicketQuestionRepository,
    error::AppError,
    model::question::{QuestionError, QuestionParam, TicketQuestion, MAX_QUESTIONS},
};

pub struct QuestionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> QuestionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<TicketQuestion>, AppError> {
        TicketQuestionRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await
    }

    pub async fn find(
        &self,
        guild_id: u64,
        id: i32,
    ) -> Result<Option<TicketQuestion>, AppError> {
        TicketQuestionRepository::new(self.db)
            .find_by_id(guild_id, id)
            .await
    }

    /// Adds a question unless the guild already has the maximum.
    ///
    /// # Returns
    /// - `Ok(Ok(TicketQuestion))` - Question stored
    /// - `Ok(Err(QuestionError))` - Limit reached or invalid fields
    pub async fn create(
        &self,
        guild_id: u64,
        param: QuestionParam,
    ) -> Result<Result<TicketQuestion, QuestionError>, AppError> {
        let repo = TicketQuestionRepository::new(self.db);

        if repo.count(guild_id).await? >= MAX_QUESTIONS as u64 {
            return Ok(Err(QuestionError::LimitReached));
        }
        if let Err(e) = param.validate() {
            return Ok(Err(e));
        }

        Ok(Ok(repo.create(guild_id, param).await?))
    }

    /// Replaces a question's fields.
    ///
    /// # Returns
    /// - `Ok(Ok(Some(_)))` - Updated
    /// - `Ok(Ok(None))` - No such question in the guild
    /// - `Ok(Err(QuestionError))` - Invalid fields
    pub async fn update(
        &self,
        guild_id: u64,
        id: i32,
        param: QuestionParam,
    ) -> Result<Result<Option<TicketQuestion>, QuestionError>, AppError> {
        if let Err(e) = param.validate() {
            return Ok(Err(e));
        }

        Ok(Ok(TicketQuestionRepository::new(self.db)
            .update(guild_id, id, param)
            .await?))
    }

    pub async fn delete(&self, guild_id: u64, id: i32) -> Result<bool, AppError> {
        TicketQuestionRepository::new(self.db).delete(guild_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn param(label: &str) -> QuestionParam {
        QuestionParam {
            label: label.to_string(),
            placeholder: String::new(),
            min_length: 0,
            max_length: 100,
            required: false,
            default_value: None,
        }
    }

    /// Expected: sixth question is refused with LimitReached
    #[tokio::test]
    async fn refuses_sixth_question() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::guild_config::GuildConfigFactory::new(db)
            .guild_id("1")
            .build()
            .await?;

        let service = QuestionService::new(db);
        for n in 0..MAX_QUESTIONS {
            assert!(service.create(1, param(&format!("Q{}", n))).await?.is_ok());
        }

        assert_eq!(
            service.create(1, param("One too many")).await?,
            Err(QuestionError::LimitReached)
        );
        assert_eq!(service.list(1).await?.len(), MAX_QUESTIONS);

        Ok(())
    }

    /// Expected: min above max is rejected before touching the row
    #[tokio::test]
    async fn validates_update() -> Result<(), AppError> {
        let test = TestBuilder::new().with_guild_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::guild_config::GuildConfigFactory::new(db)
            .guild_id("1")
            .build()
            .await?;
        let question = factory::ticket_question::create_ticket_question(db, "1").await?;

        let mut invalid = param("Order ID");
        invalid.min_length = 50;
        invalid.max_length = 10;

        let service = QuestionService::new(db);
        assert_eq!(
            service.update(1, question.id, invalid).await?,
            Err(QuestionError::MinAboveMax)
        );
        let unchanged = service.find(1, question.id).await?.unwrap();
        assert_eq!(unchanged.label, question.label);

        Ok(())
    }
}
