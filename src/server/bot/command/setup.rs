//! `/setup`: the four-step configuration wizard.
//!
//! Each step is its own component interaction. The answers collected so far
//! live in a [`SetupDraft`] keyed by guild and member, which expires if the
//! wizard is abandoned.

use serenity::all::{
    ButtonStyle, ChannelType, CommandInteraction, ComponentInteraction,
    ComponentInteractionDataKind, Context, CreateActionRow, CreateButton, CreateCommand,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateSelectMenu,
    CreateSelectMenuKind, Permissions,
};

use crate::server::{
    bot::{
        command::{guild_command, reply, require_permissions, update, GUILD_ONLY},
        handler::Handler,
    },
    error::AppError,
    model::guild_config::{SetupGuildParam, MAX_SUPPORT_ROLES},
    service::guild_config::GuildConfigService,
};

const EXPIRED: &str = "This setup session has expired. Please run /setup again.";

/// Answers given so far in a running `/setup` wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupDraft {
    pub category: Option<u64>,
    pub log_channel: Option<u64>,
    pub support_roles: Vec<u64>,
}

impl SetupDraft {
    /// Completes the draft with the answer to the last step.
    ///
    /// # Returns
    /// - `Some(SetupGuildParam)` - Every step was answered
    /// - `None` - A step is still missing
    pub fn finish(self, guild_id: u64, ping_support_roles: bool) -> Option<SetupGuildParam> {
        if self.support_roles.is_empty() {
            return None;
        }

        Some(SetupGuildParam {
            guild_id,
            ticket_category: self.category?,
            log_channel: self.log_channel?,
            support_roles: self.support_roles,
            ping_support_roles,
        })
    }

    /// Reply when the wizard is cancelled, naming the step that was left open.
    pub fn cancel_message(&self) -> &'static str {
        if self.category.is_none() {
            "No category selected."
        } else if self.log_channel.is_none() {
            "No channel selected."
        } else if self.support_roles.is_empty() {
            "No roles selected."
        } else {
            "Setup cancelled."
        }
    }
}

fn required_permissions() -> Permissions {
    Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS | Permissions::MANAGE_ROLES
}

pub fn register() -> CreateCommand {
    guild_command("setup", "Set the bot up for this server.")
        .default_member_permissions(required_permissions())
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
    if let Some(denied) = require_permissions(command.member.as_deref(), required_permissions()) {
        command.create_response(&ctx.http, denied).await?;
        return Ok(());
    }

    handler
        .setup_drafts
        .insert((guild_id, command.user.id.get()), SetupDraft::default())
        .await;

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("Select a category to use for tickets.")
                    .components(step(channel_select("setup:category", ChannelType::Category)))
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
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
    let key = (guild_id, component.user.id.get());

    let response = match (action, &component.data.kind) {
        ("category", ComponentInteractionDataKind::ChannelSelect { values }) => {
            let category = values.first().map(|id| id.get());
            match handler
                .setup_drafts
                .update(&key, |draft| draft.category = category)
                .await
            {
                Some(_) => next_step(
                    "Please select a channel to send logs to.",
                    channel_select("setup:log", ChannelType::Text),
                ),
                None => update(EXPIRED),
            }
        }
        ("log", ComponentInteractionDataKind::ChannelSelect { values }) => {
            let log_channel = values.first().map(|id| id.get());
            match handler
                .setup_drafts
                .update(&key, |draft| draft.log_channel = log_channel)
                .await
            {
                Some(_) => next_step(
                    "Please select roles to assign to tickets. Pick between 1 and 25.",
                    role_select(),
                ),
                None => update(EXPIRED),
            }
        }
        ("roles", ComponentInteractionDataKind::RoleSelect { values }) => {
            let roles: Vec<u64> = values.iter().map(|id| id.get()).collect();
            match handler
                .setup_drafts
                .update(&key, |draft| draft.support_roles = roles)
                .await
            {
                Some(_) => CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .content("Should aforementioned roles be pinged when a ticket is opened?")
                        .components(vec![CreateActionRow::Buttons(vec![
                            CreateButton::new("setup:ping:yes")
                                .label("Yes")
                                .style(ButtonStyle::Success),
                            CreateButton::new("setup:ping:no")
                                .label("No")
                                .style(ButtonStyle::Secondary),
                            cancel_button(),
                        ])]),
                ),
                None => update(EXPIRED),
            }
        }
        ("ping:yes" | "ping:no", _) => {
            let ping = action == "ping:yes";
            match handler.setup_drafts.take(&key).await {
                Some(draft) => finish(handler, guild_id, draft, ping).await?,
                None => update(EXPIRED),
            }
        }
        ("cancel", _) => match handler.setup_drafts.take(&key).await {
            Some(draft) => update(draft.cancel_message()),
            None => update(EXPIRED),
        },
        _ => return Ok(()),
    };

    component.create_response(&ctx.http, response).await?;

    Ok(())
}

async fn finish(
    handler: &Handler,
    guild_id: u64,
    draft: SetupDraft,
    ping: bool,
) -> Result<CreateInteractionResponse, AppError> {
    let cancelled = draft.cancel_message();
    let Some(param) = draft.finish(guild_id, ping) else {
        return Ok(update(cancelled));
    };

    let is_new = GuildConfigService::new(&handler.db).setup(param).await?;

    Ok(update(if is_new {
        "Finished setting up your server!"
    } else {
        "Updated your configuration."
    }))
}

fn cancel_button() -> CreateButton {
    CreateButton::new("setup:cancel")
        .label("Cancel")
        .style(ButtonStyle::Danger)
}

/// A select menu followed by the cancel button.
fn step(menu: CreateSelectMenu) -> Vec<CreateActionRow> {
    vec![
        CreateActionRow::SelectMenu(menu),
        CreateActionRow::Buttons(vec![cancel_button()]),
    ]
}

fn next_step(content: &str, menu: CreateSelectMenu) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content(content)
            .components(step(menu)),
    )
}

fn channel_select(custom_id: &str, kind: ChannelType) -> CreateSelectMenu {
    CreateSelectMenu::new(
        custom_id,
        CreateSelectMenuKind::Channel {
            channel_types: Some(vec![kind]),
            default_channels: None,
        },
    )
    .min_values(1)
    .max_values(1)
}

fn role_select() -> CreateSelectMenu {
    CreateSelectMenu::new("setup:roles", CreateSelectMenuKind::Role { default_roles: None })
        .min_values(1)
        .max_values(MAX_SUPPORT_ROLES as u8)
}
