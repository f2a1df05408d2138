//! Slash command definitions and the helpers shared by their handlers.
//!
//! Each submodule exposes `register` functions building its
//! [`CreateCommand`]s and `run`/`component`/`modal` entry points called by
//! the interaction router.

use std::collections::HashMap;

use serenity::all::{
    ActionRowComponent, CreateCommand, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, InteractionContext, Member, ModalInteraction,
    PartialChannel, Permissions, ResolvedOption, ResolvedValue, Role, User,
};

use crate::server::util::concurrency::CONCURRENCY_REACHED;

pub mod general;
pub mod question;
pub mod settings;
pub mod setup;
pub mod tag;
pub mod ticket;

pub const RED: u32 = 0xE74C3C;

pub const UNKNOWN_COMMAND: &str = "Unknown command.";
pub const GUILD_ONLY: &str = "This command can only be used in a server.";

/// Every command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    vec![
        ticket::register(),
        ticket::register_remove_context(),
        setup::register(),
        settings::register(),
        tag::register(),
        general::register_ping(),
        general::register_invite(),
        general::register_about(),
    ]
}

/// Starts a slash command that can only be invoked inside a guild.
pub fn guild_command(name: &str, description: &str) -> CreateCommand {
    CreateCommand::new(name)
        .description(description)
        .contexts(vec![InteractionContext::Guild])
}

/// Splits a `custom_id` into its area prefix and the remaining action.
pub fn split_custom_id(custom_id: &str) -> (&str, &str) {
    custom_id.split_once(':').unwrap_or((custom_id, ""))
}

pub fn reply(content: impl Into<String>, ephemeral: bool) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(ephemeral),
    )
}

pub fn reply_embed(embed: CreateEmbed, ephemeral: bool) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .ephemeral(ephemeral),
    )
}

/// Replaces a component message with plain text and removes its components.
pub fn update(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content(content)
            .embeds(Vec::new())
            .components(Vec::new()),
    )
}

/// Resolved permissions of the invoking member.
pub fn member_permissions(member: Option<&Member>) -> Permissions {
    member
        .and_then(|member| member.permissions)
        .unwrap_or_else(Permissions::empty)
}

/// Permissions in `required` that `granted` lacks. Administrators lack nothing.
pub fn missing_permissions(granted: Permissions, required: Permissions) -> Permissions {
    if granted.administrator() {
        return Permissions::empty();
    }

    required & !granted
}

pub fn missing_permissions_embed(missing: Permissions) -> CreateEmbed {
    CreateEmbed::new()
        .title("You are missing the following permissions to run this command:")
        .description(missing.get_permission_names().join(", "))
        .colour(RED)
}

pub fn concurrency_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title(CONCURRENCY_REACHED)
        .description("Please try again later.")
        .colour(RED)
}

/// The response to send when the invoker lacks any of `required`.
pub fn require_permissions(
    member: Option<&Member>,
    required: Permissions,
) -> Option<CreateInteractionResponse> {
    let missing = missing_permissions(member_permissions(member), required);
    if missing.is_empty() {
        None
    } else {
        Some(reply_embed(missing_permissions_embed(missing), true))
    }
}

/// Walks down subcommand groups and subcommands.
///
/// # Returns
/// The names along the way, e.g. `["support-roles", "add"]`, and the
/// options of the innermost subcommand.
pub fn subcommand<'a>(
    options: Vec<ResolvedOption<'a>>,
) -> (Vec<&'a str>, Vec<ResolvedOption<'a>>) {
    let mut path = Vec::new();
    let mut options = options;

    while let [ResolvedOption {
        name,
        value: ResolvedValue::SubCommand(_) | ResolvedValue::SubCommandGroup(_),
        ..
    }] = options.as_slice()
    {
        path.push(*name);
        options = match options.pop().map(|option| option.value) {
            Some(ResolvedValue::SubCommand(inner) | ResolvedValue::SubCommandGroup(inner)) => inner,
            _ => Vec::new(),
        };
    }

    (path, options)
}

fn option<'a, 'b>(options: &'b [ResolvedOption<'a>], name: &str) -> Option<&'b ResolvedValue<'a>> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn string_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    match option(options, name)? {
        ResolvedValue::String(value) => Some(*value),
        _ => None,
    }
}

pub fn integer_option(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    match option(options, name)? {
        ResolvedValue::Integer(value) => Some(*value),
        _ => None,
    }
}

pub fn boolean_option(options: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    match option(options, name)? {
        ResolvedValue::Boolean(value) => Some(*value),
        _ => None,
    }
}

pub fn user_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a User> {
    match option(options, name)? {
        ResolvedValue::User(user, _) => Some(*user),
        _ => None,
    }
}

pub fn role_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a Role> {
    match option(options, name)? {
        ResolvedValue::Role(role) => Some(*role),
        _ => None,
    }
}

pub fn channel_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a PartialChannel> {
    match option(options, name)? {
        ResolvedValue::Channel(channel) => Some(*channel),
        _ => None,
    }
}

/// Text input values of a modal submission keyed by the input `custom_id`.
pub fn modal_values(modal: &ModalInteraction) -> HashMap<String, String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.clone(),
                input.value.clone().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_custom_ids_on_first_colon() {
        assert_eq!(split_custom_id("tags:page:2:faq"), ("tags", "page:2:faq"));
        assert_eq!(split_custom_id("setup:cancel"), ("setup", "cancel"));
        assert_eq!(split_custom_id("orphan"), ("orphan", ""));
    }

    #[test]
    fn administrators_are_never_missing_permissions() {
        let required = Permissions::MANAGE_GUILD | Permissions::MANAGE_ROLES;

        assert!(missing_permissions(Permissions::ADMINISTRATOR, required).is_empty());
    }

    #[test]
    fn reports_only_the_missing_permissions() {
        let required =
            Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS | Permissions::MANAGE_ROLES;
        let granted = Permissions::MANAGE_GUILD | Permissions::SEND_MESSAGES;

        assert_eq!(
            missing_permissions(granted, required),
            Permissions::MANAGE_CHANNELS | Permissions::MANAGE_ROLES
        );
        assert!(missing_permissions(required, required).is_empty());
    }
}
