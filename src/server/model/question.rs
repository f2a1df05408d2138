//! Ticket intake question models and their validation rules.

use thiserror::Error;

use crate::{
    model::guild::TicketQuestionDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// A ticket modal holds at most five text inputs.
pub const MAX_QUESTIONS: usize = 5;
/// Discord's limit on a modal text input label.
pub const MAX_LABEL_LENGTH: usize = 45;
pub const MAX_PLACEHOLDER_LENGTH: usize = 100;
/// Discord's limit on a modal text input value.
pub const MAX_ANSWER_LENGTH: i32 = 4000;
/// Inputs allowing longer answers than this render as paragraphs.
pub const SHORT_ANSWER_LENGTH: i32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct TicketQuestion {
    pub id: i32,
    pub guild_id: u64,
    pub label: String,
    pub placeholder: String,
    pub min_length: i32,
    pub max_length: i32,
    pub required: bool,
    pub default_value: Option<String>,
}

impl TicketQuestion {
    pub fn from_entity(entity: entity::ticket_question::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            label: entity.label,
            placeholder: entity.placeholder,
            min_length: entity.min_length,
            max_length: entity.max_length,
            required: entity.required,
            default_value: entity.default_value,
        })
    }

    pub fn into_dto(self) -> TicketQuestionDto {
        TicketQuestionDto {
            id: self.id,
            label: self.label,
            placeholder: self.placeholder,
            min_length: self.min_length,
            max_length: self.max_length,
            required: self.required,
            default_value: self.default_value,
        }
    }

    /// Whether the modal input should be a paragraph rather than a single line.
    pub fn is_long(&self) -> bool {
        self.max_length > SHORT_ANSWER_LENGTH
    }
}

/// Why a question could not be saved. `Display` is the user-facing reply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestionError {
    #[error("The question must be between 1 and 45 characters long.")]
    LabelLength,
    #[error("The placeholder can be at most 100 characters long.")]
    PlaceholderLength,
    #[error("Answer lengths must be whole numbers between 0 and 4000.")]
    InvalidLength,
    #[error("The minimum answer length cannot be larger than the maximum.")]
    MinAboveMax,
    #[error("You can only have up to 5 questions.")]
    LimitReached,
}

/// Fields of a question being created or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionParam {
    pub label: String,
    pub placeholder: String,
    pub min_length: i32,
    pub max_length: i32,
    pub required: bool,
    pub default_value: Option<String>,
}

impl QuestionParam {
    /// Builds a parameter from raw modal input.
    ///
    /// A blank minimum length makes the question optional; otherwise a
    /// minimum above zero makes it required.
    pub fn from_modal(
        label: &str,
        placeholder: &str,
        min_length: &str,
        max_length: &str,
    ) -> Result<Self, QuestionError> {
        let parse_length = |value: &str| {
            value
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|length| (0..=MAX_ANSWER_LENGTH).contains(length))
                .ok_or(QuestionError::InvalidLength)
        };

        let min_length = match min_length.trim() {
            "" => 0,
            value => parse_length(value)?,
        };
        let max_length = parse_length(max_length)?;

        let param = Self {
            label: label.trim().to_string(),
            placeholder: placeholder.trim().to_string(),
            min_length,
            max_length,
            required: min_length > 0,
            default_value: None,
        };
        param.validate()?;

        Ok(param)
    }

    pub fn validate(&self) -> Result<(), QuestionError> {
        let label_length = self.label.chars().count();
        if label_length == 0 || label_length > MAX_LABEL_LENGTH {
            return Err(QuestionError::LabelLength);
        }
        if self.placeholder.chars().count() > MAX_PLACEHOLDER_LENGTH {
            return Err(QuestionError::PlaceholderLength);
        }
        if !(0..=MAX_ANSWER_LENGTH).contains(&self.min_length)
            || !(1..=MAX_ANSWER_LENGTH).contains(&self.max_length)
        {
            return Err(QuestionError::InvalidLength);
        }
        if self.min_length > self.max_length {
            return Err(QuestionError::MinAboveMax);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modal_input() {
        let param = QuestionParam::from_modal(" Why? ", "", "10", "200").unwrap();

        assert_eq!(param.label, "Why?");
        assert_eq!(param.min_length, 10);
        assert_eq!(param.max_length, 200);
        assert!(param.required);
    }

    /// Expected: blank minimum means optional
    #[test]
    fn blank_minimum_is_optional() {
        let param = QuestionParam::from_modal("Order ID", "e.g. 1234", "", "20").unwrap();

        assert_eq!(param.min_length, 0);
        assert!(!param.required);
    }

    #[test]
    fn rejects_bad_lengths() {
        assert_eq!(
            QuestionParam::from_modal("Q", "", "abc", "10"),
            Err(QuestionError::InvalidLength)
        );
        assert_eq!(
            QuestionParam::from_modal("Q", "", "0", "5000"),
            Err(QuestionError::InvalidLength)
        );
        assert_eq!(
            QuestionParam::from_modal("Q", "", "30", "10"),
            Err(QuestionError::MinAboveMax)
        );
    }

    #[test]
    fn rejects_long_label() {
        let label = "x".repeat(MAX_LABEL_LENGTH + 1);
        assert_eq!(
            QuestionParam::from_modal(&label, "", "", "10"),
            Err(QuestionError::LabelLength)
        );
    }
}
