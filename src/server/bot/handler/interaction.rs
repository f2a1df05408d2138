//! Routes interactions to their command modules.
//!
//! Slash and user commands are routed by name, components and modals by the
//! area prefix of their `custom_id`. Handlers return `Result`; a failure is
//! logged and the member gets a generic ephemeral error instead of Discord's
//! "This interaction failed".

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Interaction,
    ModalInteraction,
};

use crate::server::{
    bot::{
        command::{self, general, question, reply, settings, setup, split_custom_id, tag, ticket},
        handler::Handler,
    },
    error::AppError,
};

const FAILURE: &str = "Something went wrong while handling that. Please try again later.";

pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            if let Err(e) = dispatch_command(handler, &ctx, &command).await {
                tracing::error!(
                    "Command /{} failed in guild {:?}: {}",
                    command.data.name,
                    command.guild_id,
                    e
                );
                report_command_failure(&ctx, &command).await;
            }
        }
        Interaction::Autocomplete(command) => {
            if let Err(e) = dispatch_autocomplete(handler, &ctx, &command).await {
                tracing::warn!("Autocomplete for /{} failed: {}", command.data.name, e);
            }
        }
        Interaction::Component(component) => {
            if let Err(e) = dispatch_component(handler, &ctx, &component).await {
                tracing::error!(
                    "Component {} failed in guild {:?}: {}",
                    component.data.custom_id,
                    component.guild_id,
                    e
                );
                report_component_failure(&ctx, &component).await;
            }
        }
        Interaction::Modal(modal) => {
            if let Err(e) = dispatch_modal(handler, &ctx, &modal).await {
                tracing::error!(
                    "Modal {} failed in guild {:?}: {}",
                    modal.data.custom_id,
                    modal.guild_id,
                    e
                );
                report_modal_failure(&ctx, &modal).await;
            }
        }
        _ => {}
    }
}

async fn dispatch_command(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        "ticket" => ticket::run(handler, ctx, command).await,
        ticket::REMOVE_CONTEXT_COMMAND => ticket::run_remove_context(handler, ctx, command).await,
        "setup" => setup::run(handler, ctx, command).await,
        "settings" => settings::run(handler, ctx, command).await,
        "tag" => tag::run(handler, ctx, command).await,
        "ping" => general::ping(ctx, command).await,
        "invite" => general::invite(ctx, command).await,
        "about" => general::about(handler, ctx, command).await,
        _ => {
            command
                .create_response(&ctx.http, reply(command::UNKNOWN_COMMAND, true))
                .await?;
            Ok(())
        }
    }
}

async fn dispatch_autocomplete(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        "tag" => tag::autocomplete(handler, ctx, command).await,
        _ => Ok(()),
    }
}

async fn dispatch_component(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let (area, action) = split_custom_id(&component.data.custom_id);

    match area {
        "setup" => setup::component(handler, ctx, component, action).await,
        "settings" => settings::component(handler, ctx, component, action).await,
        "questions" => question::component(handler, ctx, component, action).await,
        "tags" => tag::component(handler, ctx, component, action).await,
        _ => {
            tracing::warn!("Unhandled component {}", component.data.custom_id);
            Ok(())
        }
    }
}

async fn dispatch_modal(
    handler: &Handler,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let (area, action) = split_custom_id(&modal.data.custom_id);

    match area {
        "tickets" => ticket::modal(handler, ctx, modal, action).await,
        "questions" => question::modal(handler, ctx, modal, action).await,
        "tags" => tag::modal(handler, ctx, modal, action).await,
        _ => {
            tracing::warn!("Unhandled modal {}", modal.data.custom_id);
            Ok(())
        }
    }
}

fn failure_response() -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(FAILURE)
            .ephemeral(true),
    )
}

fn failure_followup() -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(FAILURE)
        .ephemeral(true)
}

// An interaction that was already acknowledged only accepts followups.

async fn report_command_failure(ctx: &Context, command: &CommandInteraction) {
    if command
        .create_response(&ctx.http, failure_response())
        .await
        .is_err()
    {
        if let Err(e) = command.create_followup(&ctx.http, failure_followup()).await {
            tracing::warn!("Failed to report command failure: {:?}", e);
        }
    }
}

async fn report_component_failure(ctx: &Context, component: &ComponentInteraction) {
    if component
        .create_response(&ctx.http, failure_response())
        .await
        .is_err()
    {
        if let Err(e) = component.create_followup(&ctx.http, failure_followup()).await {
            tracing::warn!("Failed to report component failure: {:?}", e);
        }
    }
}

async fn report_modal_failure(ctx: &Context, modal: &ModalInteraction) {
    if modal
        .create_response(&ctx.http, failure_response())
        .await
        .is_err()
    {
        if let Err(e) = modal.create_followup(&ctx.http, failure_followup()).await {
            tracing::warn!("Failed to report modal failure: {:?}", e);
        }
    }
}
