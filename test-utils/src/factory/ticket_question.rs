//! Intake question factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for `ticket_question` rows.
pub struct TicketQuestionFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    label: String,
    placeholder: String,
    min_length: i32,
    max_length: i32,
    required: bool,
    default_value: Option<String>,
}

impl<'a> TicketQuestionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: guild_id.to_string(),
            label: format!("Question {}", id),
            placeholder: "Type your answer here".to_string(),
            min_length: 2,
            max_length: 4000,
            required: true,
            default_value: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn lengths(mut self, min_length: i32, max_length: i32) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub async fn build(self) -> Result<entity::ticket_question::Model, DbErr> {
        entity::ticket_question::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            label: ActiveValue::Set(self.label),
            placeholder: ActiveValue::Set(self.placeholder),
            min_length: ActiveValue::Set(self.min_length),
            max_length: ActiveValue::Set(self.max_length),
            required: ActiveValue::Set(self.required),
            default_value: ActiveValue::Set(self.default_value),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an intake question with default values.
pub async fn create_ticket_question(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::ticket_question::Model, DbErr> {
    TicketQuestionFactory::new(db, guild_id).build().await
}
