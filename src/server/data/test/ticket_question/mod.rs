use crate::server::{
    data::ticket_question::TicketQuestionRepository, error::AppError,
    model::question::QuestionParam,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_by_guild_id;
mod update;

fn param(label: &str) -> QuestionParam {
    QuestionParam {
        label: label.to_string(),
        placeholder: "Tell us more".to_string(),
        min_length: 2,
        max_length: 400,
        required: true,
        default_value: None,
    }
}
