//! Question manager reached from the settings view.
//!
//! Questions are asked in a modal when a member opens a ticket. Members see
//! them numbered from 1 in creation order, which is also how the manager
//! refers to them.

use serenity::all::{
    ButtonStyle, ComponentInteraction, ComponentInteractionDataKind, Context, CreateActionRow,
    CreateButton, CreateEmbed, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateModal, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, InputTextStyle, ModalInteraction, Permissions,
};

use crate::server::{
    bot::{
        command::{modal_values, reply, reply_embed, require_permissions, settings, update},
        handler::Handler,
    },
    error::AppError,
    model::question::{
        QuestionParam, TicketQuestion, MAX_ANSWER_LENGTH, MAX_LABEL_LENGTH,
        MAX_PLACEHOLDER_LENGTH, MAX_QUESTIONS,
    },
    service::{
        guild_config::{GuildConfigService, NOT_CONFIGURED},
        question::QuestionService,
        ticket::message::BLURPLE,
    },
    util::format::{shorten, yes_no_emoji},
};

const LIMIT_REACHED: &str = "❌ You already have 5 questions, which is the maximum number of \
                             questions we can put in a form. Please remove a question, or edit one.";
const NO_QUESTIONS: &str = "❌ You do not have any questions set. Please create one.";
const GONE: &str = "That question no longer exists.";

/// The manager's text and buttons for a guild with `count` questions.
pub fn manager_message(count: usize) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(format!(
            "Manage the questions asked when a ticket is opened. ({}/{})",
            count, MAX_QUESTIONS
        ))
        .embeds(Vec::new())
        .components(manager_buttons(count))
}

fn manager_buttons(count: usize) -> Vec<CreateActionRow> {
    let empty = count == 0;

    vec![CreateActionRow::Buttons(vec![
        CreateButton::new("questions:create")
            .label("Create question")
            .style(ButtonStyle::Success)
            .disabled(count >= MAX_QUESTIONS),
        CreateButton::new("questions:preview")
            .label("Preview questions")
            .style(ButtonStyle::Secondary)
            .disabled(empty),
        CreateButton::new("questions:edit")
            .label("Edit question")
            .style(ButtonStyle::Primary)
            .disabled(empty),
        CreateButton::new("questions:remove")
            .label("Remove question")
            .style(ButtonStyle::Danger)
            .disabled(empty),
        CreateButton::new("questions:finish")
            .label("Finish")
            .style(ButtonStyle::Secondary),
    ])]
}

pub async fn component(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    action: &str,
) -> Result<(), AppError> {
    let Some(guild_id) = component.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    if let Some(denied) = require_permissions(component.member.as_ref(), Permissions::MANAGE_GUILD)
    {
        component.create_response(&ctx.http, denied).await?;
        return Ok(());
    }

    let service = QuestionService::new(&handler.db);
    let questions = service.list(guild_id).await?;

    let response = match action {
        "create" if questions.len() >= MAX_QUESTIONS => reply(LIMIT_REACHED, true),
        "create" => CreateInteractionResponse::Modal(question_modal(
            "questions:create".to_string(),
            "Create a question:",
            None,
        )),
        "preview" | "edit" | "remove" if questions.is_empty() => reply(NO_QUESTIONS, true),
        "preview" => reply_embed(preview_embed(&questions), true),
        "edit" => select_message("questions:edit-select", "Pick a question to edit.", &questions),
        "remove" => select_message(
            "questions:remove-select",
            "Pick a question to remove.",
            &questions,
        ),
        "edit-select" => match selected(component).and_then(|id| position(&questions, id)) {
            Some(index) => {
                let question = &questions[index];
                CreateInteractionResponse::Modal(question_modal(
                    format!("questions:edit:{}", question.id),
                    "Edit a question:",
                    Some(question),
                ))
            }
            None => update(GONE),
        },
        "remove-select" => match selected(component).and_then(|id| position(&questions, id)) {
            Some(index) => {
                if service.delete(guild_id, questions[index].id).await? {
                    update(format!("Deleted question #{}.", index + 1))
                } else {
                    update(GONE)
                }
            }
            None => update(GONE),
        },
        "finish" => match GuildConfigService::new(&handler.db).details(guild_id).await? {
            Some(details) => {
                CreateInteractionResponse::UpdateMessage(settings::view_message(&details))
            }
            None => update(NOT_CONFIGURED),
        },
        _ => return Ok(()),
    };

    component.create_response(&ctx.http, response).await?;

    Ok(())
}

pub async fn modal(
    handler: &Handler,
    ctx: &Context,
    modal: &ModalInteraction,
    action: &str,
) -> Result<(), AppError> {
    let Some(guild_id) = modal.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    if let Some(denied) = require_permissions(modal.member.as_ref(), Permissions::MANAGE_GUILD) {
        modal.create_response(&ctx.http, denied).await?;
        return Ok(());
    }

    let values = modal_values(modal);
    let field = |name: &str| values.get(name).map(String::as_str).unwrap_or_default();
    let param = match QuestionParam::from_modal(
        field("label"),
        field("placeholder"),
        field("min_length"),
        field("max_length"),
    ) {
        Ok(param) => param,
        Err(e) => {
            modal.create_response(&ctx.http, reply(e.to_string(), true)).await?;
            return Ok(());
        }
    };

    let service = QuestionService::new(&handler.db);
    let content = match action.split_once(':') {
        None if action == "create" => {
            if GuildConfigService::new(&handler.db)
                .get(guild_id)
                .await?
                .is_none()
            {
                NOT_CONFIGURED.to_string()
            } else {
                match service.create(guild_id, param).await? {
                    Ok(_) => "✅ Added new question!".to_string(),
                    Err(e) => e.to_string(),
                }
            }
        }
        Some(("edit", id)) => match id.parse::<i32>() {
            Ok(id) => match service.update(guild_id, id, param).await? {
                Ok(Some(_)) => {
                    let questions = service.list(guild_id).await?;
                    match position(&questions, id) {
                        Some(index) => format!("Edited question #{}.", index + 1),
                        None => GONE.to_string(),
                    }
                }
                Ok(None) => GONE.to_string(),
                Err(e) => e.to_string(),
            },
            Err(_) => GONE.to_string(),
        },
        _ => return Ok(()),
    };

    modal.create_response(&ctx.http, reply(content, true)).await?;

    Ok(())
}

/// Modal for creating a question, prefilled when editing `existing`.
fn question_modal(
    custom_id: String,
    title: &str,
    existing: Option<&TicketQuestion>,
) -> CreateModal {
    let mut label = CreateInputText::new(InputTextStyle::Short, "The question:", "label")
        .max_length(MAX_LABEL_LENGTH as u16)
        .required(true);
    let mut placeholder =
        CreateInputText::new(InputTextStyle::Paragraph, "Placeholder text:", "placeholder")
            .max_length(MAX_PLACEHOLDER_LENGTH as u16)
            .required(false);
    let mut min_length =
        CreateInputText::new(InputTextStyle::Short, "Minimum answer length:", "min_length")
            .placeholder("0 makes the question optional")
            .max_length(4)
            .required(false);
    let mut max_length =
        CreateInputText::new(InputTextStyle::Short, "Maximum answer length:", "max_length")
            .placeholder(format!("Up to {}", MAX_ANSWER_LENGTH))
            .max_length(4)
            .required(true);

    if let Some(question) = existing {
        label = label.value(&question.label);
        if !question.placeholder.is_empty() {
            placeholder = placeholder.value(&question.placeholder);
        }
        min_length = min_length.value(question.min_length.to_string());
        max_length = max_length.value(question.max_length.to_string());
    }

    CreateModal::new(custom_id, title).components(vec![
        CreateActionRow::InputText(label),
        CreateActionRow::InputText(placeholder),
        CreateActionRow::InputText(min_length),
        CreateActionRow::InputText(max_length),
    ])
}

fn preview_embed(questions: &[TicketQuestion]) -> CreateEmbed {
    questions.iter().enumerate().fold(
        CreateEmbed::new()
            .title("Your ticket questions:")
            .colour(BLURPLE),
        |embed, (index, question)| {
            let placeholder = if question.placeholder.is_empty() {
                "None"
            } else {
                question.placeholder.as_str()
            };
            embed.field(
                format!("{}. {}", index + 1, question.label),
                format!(
                    "Placeholder: {}\nLength: {}-{}\nRequired: {}",
                    placeholder,
                    question.min_length,
                    question.max_length,
                    yes_no_emoji(question.required)
                ),
                false,
            )
        },
    )
}

fn select_message(
    custom_id: &str,
    content: &str,
    questions: &[TicketQuestion],
) -> CreateInteractionResponse {
    let options = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            CreateSelectMenuOption::new(
                option_label(index + 1, &question.label),
                question.id.to_string(),
            )
        })
        .collect();

    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .components(vec![CreateActionRow::SelectMenu(CreateSelectMenu::new(
                custom_id,
                CreateSelectMenuKind::String { options },
            ))])
            .ephemeral(true),
    )
}

/// Select option label, kept within Discord's 100 character limit.
fn option_label(number: usize, label: &str) -> String {
    format!("Question {} ({})", number, shorten(label, 87))
}

/// The question ID picked in a string select.
fn selected(component: &ComponentInteraction) -> Option<i32> {
    match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.first()?.parse().ok(),
        _ => None,
    }
}

fn position(questions: &[TicketQuestion], id: i32) -> Option<usize> {
    questions.iter().position(|question| question.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_labels_fit_select_limit() {
        assert_eq!(option_label(2, "Order ID"), "Question 2 (Order ID)");

        let long = "word ".repeat(40);
        assert!(option_label(5, &long).chars().count() <= 100);
    }

    #[test]
    fn manager_disables_buttons_that_cannot_apply() {
        let rows = serde_json::to_value(manager_buttons(0)).unwrap();
        let buttons = rows[0]["components"].as_array().unwrap();
        assert_eq!(buttons[0]["disabled"], false);
        assert_eq!(buttons[1]["disabled"], true);
        assert_eq!(buttons[4]["disabled"], false);

        let rows = serde_json::to_value(manager_buttons(MAX_QUESTIONS)).unwrap();
        let buttons = rows[0]["components"].as_array().unwrap();
        assert_eq!(buttons[0]["disabled"], true);
        assert_eq!(buttons[3]["disabled"], false);
    }
}
