//! `/ticket` commands and the intake question modal.
//!
//! Authorization is decided by [`crate::server::service::ticket::policy`];
//! this module gathers the facts from the interaction and turns denials into
//! ephemeral replies.

use std::collections::HashMap;

use serenity::all::{
    CommandInteraction, CommandOptionType, CommandType, Context, CreateActionRow, CreateCommand,
    CreateCommandOption, CreateInputText, CreateInteractionResponse, CreateModal,
    EditInteractionResponse, InputTextStyle, InteractionContext, Member, ModalInteraction,
    ResolvedTarget, User,
};

use crate::server::{
    bot::{
        command::{
            concurrency_embed, guild_command, member_permissions, modal_values, reply,
            reply_embed, string_option, subcommand, user_option, GUILD_ONLY, UNKNOWN_COMMAND,
        },
        handler::Handler,
    },
    error::AppError,
    model::question::TicketQuestion,
    service::{
        discord::DiscordService,
        ticket::{
            close::DEFAULT_CLOSE_REASON,
            lock::lock_reply,
            member::{added_reply, removed_reply},
            message,
            open::{OpenPlan, OpenRequest},
            policy::{
                can_add_member, can_close, can_lock, can_remove_member, TicketActor, NOT_A_TICKET,
            },
            TicketService,
        },
    },
    util::concurrency::{ConcurrencyKey, TICKET_CLOSE, TICKET_LOCK, TICKET_NEW},
};

pub const REMOVE_CONTEXT_COMMAND: &str = "Remove from current ticket";

const QUESTIONS_MODAL_ID: &str = "tickets:new";
const QUESTIONS_MODAL_TITLE: &str = "Just a few questions first...";

pub fn register() -> CreateCommand {
    guild_command("ticket", "Open and manage support tickets.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "new", "Open a new ticket.")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "topic",
                        "What do you need help with?",
                    )
                    .max_length(1024),
                ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "info",
            "Show information about this ticket.",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "add-member",
                "Add a member to this ticket.",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "The member to add.")
                    .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "remove-member",
                "Remove a member from this ticket.",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::User,
                    "member",
                    "The member to remove.",
                )
                .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "close", "Close this ticket.")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "reason",
                        "Why the ticket is being closed.",
                    )
                    .max_length(1024),
                ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "lock",
            "Lock or unlock this ticket.",
        ))
}

/// The "Remove from current ticket" user context menu entry.
pub fn register_remove_context() -> CreateCommand {
    CreateCommand::new(REMOVE_CONTEXT_COMMAND)
        .kind(CommandType::User)
        .contexts(vec![InteractionContext::Guild])
}

pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = command.guild_id.map(|id| id.get()) else {
        command.create_response(&ctx.http, reply(GUILD_ONLY, true)).await?;
        return Ok(());
    };

    let (path, options) = subcommand(command.data.options());
    match (path.as_slice(), user_option(&options, "member")) {
        (["new"], _) => new(handler, ctx, command, guild_id, string_option(&options, "topic")).await,
        (["info"], _) => info(handler, ctx, command).await,
        (["add-member"], Some(target)) => add_member(handler, ctx, command, guild_id, target).await,
        (["remove-member"], Some(target)) => {
            remove_member(handler, ctx, command, guild_id, target).await
        }
        (["close"], _) => close(handler, ctx, command, string_option(&options, "reason")).await,
        (["lock"], _) => lock(handler, ctx, command).await,
        _ => {
            command.create_response(&ctx.http, reply(UNKNOWN_COMMAND, true)).await?;
            Ok(())
        }
    }
}

pub async fn run_remove_context(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (Some(guild_id), Some(ResolvedTarget::User(target, _))) =
        (command.guild_id.map(|id| id.get()), command.data.target())
    else {
        command.create_response(&ctx.http, reply(GUILD_ONLY, true)).await?;
        return Ok(());
    };

    remove_member(handler, ctx, command, guild_id, target).await
}

/// Handles the submitted intake question modal.
pub async fn modal(
    handler: &Handler,
    ctx: &Context,
    modal: &ModalInteraction,
    action: &str,
) -> Result<(), AppError> {
    if action != "new" {
        return Ok(());
    }
    let Some(guild_id) = modal.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    let user_id = modal.user.id.get();

    let Some(_permit) = handler
        .concurrency
        .try_acquire(ConcurrencyKey::member(TICKET_NEW, guild_id, user_id))
    else {
        modal
            .create_response(&ctx.http, reply_embed(concurrency_embed(), true))
            .await?;
        return Ok(());
    };

    // The guild may have changed while the member was typing.
    let service = TicketService::new(&handler.db, &ctx.http);
    let plan = match service.prepare_open(guild_id, user_id).await? {
        Ok(plan) => plan,
        Err(denied) => {
            modal
                .create_response(&ctx.http, reply(denied.to_string(), denied.ephemeral()))
                .await?;
            return Ok(());
        }
    };

    let subject = handler
        .pending_topics
        .take(&(guild_id, user_id))
        .await
        .flatten();
    let answers = collect_answers(&plan.questions, &modal_values(modal));

    modal
        .create_response(&ctx.http, reply("Creating ticket...", true))
        .await?;
    let content = open_ticket(&service, plan, &modal.user, subject, answers).await;
    modal
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;

    Ok(())
}

async fn new(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    topic: Option<&str>,
) -> Result<(), AppError> {
    let user_id = command.user.id.get();

    let Some(_permit) = handler
        .concurrency
        .try_acquire(ConcurrencyKey::member(TICKET_NEW, guild_id, user_id))
    else {
        command
            .create_response(&ctx.http, reply_embed(concurrency_embed(), true))
            .await?;
        return Ok(());
    };

    let service = TicketService::new(&handler.db, &ctx.http);
    let plan = match service.prepare_open(guild_id, user_id).await? {
        Ok(plan) => plan,
        Err(denied) => {
            command
                .create_response(&ctx.http, reply(denied.to_string(), denied.ephemeral()))
                .await?;
            return Ok(());
        }
    };

    let subject = topic
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string);

    if !plan.questions.is_empty() {
        handler
            .pending_topics
            .insert((guild_id, user_id), subject)
            .await;
        command
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Modal(questions_modal(&plan.questions)),
            )
            .await?;
        return Ok(());
    }

    command
        .create_response(&ctx.http, reply("Creating ticket...", true))
        .await?;
    let content = open_ticket(&service, plan, &command.user, subject, Vec::new()).await;
    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;

    Ok(())
}

async fn open_ticket(
    service: &TicketService<'_>,
    plan: OpenPlan,
    author: &User,
    subject: Option<String>,
    answers: Vec<(String, String)>,
) -> String {
    let guild_id = plan.config.guild_id;
    let request = OpenRequest {
        author,
        subject,
        answers,
    };

    match service.open(plan, request).await {
        Ok(ticket) => format!("Ticket created! <#{}>", ticket.channel_id),
        Err(e) => {
            tracing::error!(
                "Failed to create ticket for {} in guild {}: {}",
                author.id,
                guild_id,
                e
            );
            format!("Failed to create ticket - {}", e)
        }
    }
}

async fn info(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let service = TicketService::new(&handler.db, &ctx.http);

    let response = match service.find_by_channel(command.channel_id.get()).await? {
        Some(ticket) => reply_embed(message::info(&ticket), true),
        None => reply(NOT_A_TICKET, true),
    };
    command.create_response(&ctx.http, response).await?;

    Ok(())
}

async fn add_member(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    target: &User,
) -> Result<(), AppError> {
    let service = TicketService::new(&handler.db, &ctx.http);
    let Some(ticket) = service.find_by_channel(command.channel_id.get()).await? else {
        command.create_response(&ctx.http, reply(NOT_A_TICKET, true)).await?;
        return Ok(());
    };

    let actor = actor(&service, guild_id, command).await?;
    let discord = DiscordService::new(&ctx.http);
    let target_can_view = match discord.channel(ticket.channel_id).await? {
        Some(channel) => discord.member_can_view(&channel, target.id.get()).await?,
        None => false,
    };

    if let Err(denied) = can_add_member(
        &actor,
        target.id.get(),
        target_can_view,
        bot_can_manage(command),
    ) {
        command
            .create_response(&ctx.http, reply(denied.to_string(), true))
            .await?;
        return Ok(());
    }

    service
        .add_member(ticket.channel_id, target.id.get())
        .await?;
    command
        .create_response(&ctx.http, reply(added_reply(target.id.get()), false))
        .await?;

    Ok(())
}

async fn remove_member(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    target: &User,
) -> Result<(), AppError> {
    let service = TicketService::new(&handler.db, &ctx.http);
    let Some(ticket) = service.find_by_channel(command.channel_id.get()).await? else {
        command.create_response(&ctx.http, reply(NOT_A_TICKET, true)).await?;
        return Ok(());
    };

    let support_roles = service.support_roles(guild_id).await?;
    let actor = actor_with_roles(command, &support_roles);
    let target_is_support = DiscordService::new(&ctx.http)
        .member_roles(guild_id, target.id.get())
        .await?
        .is_some_and(|roles| {
            roles
                .iter()
                .any(|role| support_roles.contains(&role.get()))
        });

    let removal = match can_remove_member(
        &ticket,
        &actor,
        target.id.get(),
        target_is_support,
        bot_can_manage(command),
    ) {
        Ok(removal) => removal,
        Err(denied) => {
            command
                .create_response(&ctx.http, reply(denied.to_string(), true))
                .await?;
            return Ok(());
        }
    };

    service
        .remove_member(ticket.channel_id, target.id.get())
        .await?;
    command
        .create_response(
            &ctx.http,
            reply(removed_reply(target.id.get(), removal), false),
        )
        .await?;

    Ok(())
}

async fn close(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    reason: Option<&str>,
) -> Result<(), AppError> {
    let channel_id = command.channel_id.get();
    let Some(_permit) = handler
        .concurrency
        .try_acquire(ConcurrencyKey::channel(TICKET_CLOSE, channel_id))
    else {
        command
            .create_response(&ctx.http, reply_embed(concurrency_embed(), true))
            .await?;
        return Ok(());
    };

    let service = TicketService::new(&handler.db, &ctx.http);
    let Some(ticket) = service.find_by_channel(channel_id).await? else {
        command.create_response(&ctx.http, reply(NOT_A_TICKET, true)).await?;
        return Ok(());
    };

    let actor = actor(&service, ticket.guild_id, command).await?;
    if let Err(denied) = can_close(&ticket, &actor) {
        command
            .create_response(&ctx.http, reply(denied.to_string(), true))
            .await?;
        return Ok(());
    }

    let reason = reason
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(DEFAULT_CLOSE_REASON);
    let logged = match service.send_close_log(&ticket, &command.user, reason).await {
        Ok(logged) => logged,
        Err(e) => {
            tracing::warn!("Failed to log closing of ticket #{}: {}", ticket.number, e);
            false
        }
    };

    let content = if logged {
        "Logged ticket. Closing now!"
    } else {
        "Closing now!"
    };
    command.create_response(&ctx.http, reply(content, false)).await?;

    service.finish_close(&ticket, &command.user).await
}

async fn lock(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let channel_id = command.channel_id.get();
    let Some(_permit) = handler
        .concurrency
        .try_acquire(ConcurrencyKey::channel(TICKET_LOCK, channel_id))
    else {
        command
            .create_response(&ctx.http, reply_embed(concurrency_embed(), true))
            .await?;
        return Ok(());
    };

    let service = TicketService::new(&handler.db, &ctx.http);
    let Some(ticket) = service.find_by_channel(channel_id).await? else {
        command.create_response(&ctx.http, reply(NOT_A_TICKET, true)).await?;
        return Ok(());
    };

    let actor = actor(&service, ticket.guild_id, command).await?;
    if let Err(denied) = can_lock(&actor) {
        command
            .create_response(&ctx.http, reply(denied.to_string(), true))
            .await?;
        return Ok(());
    }

    // Renaming a channel is rate limited and can take a while.
    command.defer(&ctx.http).await?;
    let updated = service.toggle_lock(&ticket).await?;
    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(lock_reply(updated.locked)),
        )
        .await?;

    Ok(())
}

async fn actor(
    service: &TicketService<'_>,
    guild_id: u64,
    command: &CommandInteraction,
) -> Result<TicketActor, AppError> {
    let support_roles = service.support_roles(guild_id).await?;

    Ok(actor_with_roles(command, &support_roles))
}

fn actor_with_roles(command: &CommandInteraction, support_roles: &[u64]) -> TicketActor {
    let member: Option<&Member> = command.member.as_deref();
    let roles = member.map(|member| member.roles.as_slice()).unwrap_or(&[]);

    TicketActor::new(
        command.user.id.get(),
        support_roles,
        roles,
        member_permissions(member),
    )
}

/// Whether the bot may edit overwrites in the invoking channel.
fn bot_can_manage(command: &CommandInteraction) -> bool {
    command
        .app_permissions
        .is_some_and(|permissions| permissions.manage_roles())
}

/// Builds the modal asking a guild's intake questions. Input IDs are the
/// question IDs.
pub fn questions_modal(questions: &[TicketQuestion]) -> CreateModal {
    let rows = questions
        .iter()
        .map(|question| {
            let style = if question.is_long() {
                InputTextStyle::Paragraph
            } else {
                InputTextStyle::Short
            };

            let mut input = CreateInputText::new(style, &question.label, question.id.to_string())
                .min_length(u16::try_from(question.min_length).unwrap_or(0))
                .max_length(u16::try_from(question.max_length).unwrap_or(u16::MAX))
                .required(question.required);
            if !question.placeholder.is_empty() {
                input = input.placeholder(&question.placeholder);
            }
            if let Some(value) = &question.default_value {
                input = input.value(value);
            }

            CreateActionRow::InputText(input)
        })
        .collect();

    CreateModal::new(QUESTIONS_MODAL_ID, QUESTIONS_MODAL_TITLE).components(rows)
}

/// Pairs each question with its non-blank answer, in question order.
fn collect_answers(
    questions: &[TicketQuestion],
    values: &HashMap<String, String>,
) -> Vec<(String, String)> {
    questions
        .iter()
        .filter_map(|question| {
            let answer = values.get(&question.id.to_string())?.trim();
            if answer.is_empty() {
                None
            } else {
                Some((question.label.clone(), answer.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i32, label: &str, max_length: i32) -> TicketQuestion {
        TicketQuestion {
            id,
            guild_id: 1,
            label: label.to_string(),
            placeholder: String::new(),
            min_length: 0,
            max_length,
            required: false,
            default_value: None,
        }
    }

    #[test]
    fn answers_skip_blank_inputs() {
        let questions = vec![
            question(1, "Order ID", 20),
            question(2, "Describe the problem", 1000),
            question(3, "Anything else?", 200),
        ];
        let values = HashMap::from([
            ("1".to_string(), " 1234 ".to_string()),
            ("2".to_string(), "It broke".to_string()),
            ("3".to_string(), "   ".to_string()),
        ]);

        assert_eq!(
            collect_answers(&questions, &values),
            vec![
                ("Order ID".to_string(), "1234".to_string()),
                ("Describe the problem".to_string(), "It broke".to_string()),
            ]
        );
    }

    #[test]
    fn modal_renders_one_input_per_question() {
        let questions = vec![question(7, "Order ID", 20), question(8, "Details", 1000)];

        let modal = serde_json::to_value(questions_modal(&questions)).unwrap();

        assert_eq!(modal["custom_id"], "tickets:new");
        assert_eq!(modal["title"], QUESTIONS_MODAL_TITLE);
        let rows = modal["components"].as_array().unwrap();
        assert_eq!(rows.len(), 2);

        let short = &rows[0]["components"][0];
        assert_eq!(short["custom_id"], "7");
        assert_eq!(short["style"], 1);
        let paragraph = &rows[1]["components"][0];
        assert_eq!(paragraph["custom_id"], "8");
        assert_eq!(paragraph["style"], 2);
    }
}
