//! `/settings` commands and the buttons of the settings view.

use serenity::all::{
    ButtonStyle, ChannelType, CommandInteraction, CommandOptionType, ComponentInteraction,
    Context, CreateActionRow, CreateButton, CreateCommand, CreateCommandOption, CreateEmbed,
    CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, Permissions, RoleId,
};

use crate::server::{
    bot::{
        command::{
            boolean_option, channel_option, guild_command, integer_option, question, reply,
            reply_embed, require_permissions, role_option, subcommand, update, GUILD_ONLY,
            UNKNOWN_COMMAND,
        },
        handler::Handler,
    },
    error::AppError,
    model::guild_config::{GuildConfigDetails, GuildConfigUpdate, MAX_TICKETS_LIMIT},
    service::{
        discord::DiscordService,
        guild_config::{GuildConfigService, NOT_CONFIGURED},
        ticket::message::BLURPLE,
    },
    util::format::{truncate, yes_no_emoji},
};

const EMBED_DESCRIPTION_LIMIT: usize = 4096;

pub fn register() -> CreateCommand {
    guild_command("settings", "Manage the bot's settings for this server.")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "view",
            "View the current configuration.",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "reset",
            "Reset the configuration of this server.",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommandGroup,
                "support-roles",
                "Manage the roles that can see tickets.",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add a support role.")
                    .add_sub_option(
                        CreateCommandOption::new(CommandOptionType::Role, "role", "The role to add.")
                            .required(true),
                    ),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "remove",
                    "Remove a support role.",
                )
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::Role, "role", "The role to remove.")
                        .required(true),
                ),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "log-channel",
                "Set the channel tickets are logged to.",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Channel, "channel", "The log channel.")
                    .channel_types(vec![ChannelType::Text])
                    .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "ticket-category",
                "Set the category new tickets are created in.",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "category",
                    "The ticket category.",
                )
                .channel_types(vec![ChannelType::Category])
                .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "max-tickets",
                "Set how many tickets can be open at once.",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "amount",
                    "Maximum open tickets, 50 by default.",
                )
                .min_int_value(1)
                .max_int_value(MAX_TICKETS_LIMIT as u64),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "allow-new-tickets",
                "Turn ticket creation on or off.",
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "enabled",
                "Leave blank to toggle.",
            )),
        )
}

/// Permissions a subcommand needs on top of the command's default.
fn required_permissions(path: &[&str]) -> Permissions {
    match path {
        ["reset"] => Permissions::ADMINISTRATOR,
        ["support-roles", ..] => Permissions::MANAGE_GUILD | Permissions::MANAGE_ROLES,
        ["log-channel"] | ["ticket-category"] | ["max-tickets"] | ["allow-new-tickets"] => {
            Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS
        }
        _ => Permissions::MANAGE_GUILD,
    }
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
    if let Some(denied) =
        require_permissions(command.member.as_deref(), required_permissions(&path))
    {
        command.create_response(&ctx.http, denied).await?;
        return Ok(());
    }

    let service = GuildConfigService::new(&handler.db);
    let Some(details) = service.details(guild_id).await? else {
        command.create_response(&ctx.http, reply(NOT_CONFIGURED, true)).await?;
        return Ok(());
    };

    let response = match path.as_slice() {
        ["view"] => CreateInteractionResponse::Message(view_message(&details).ephemeral(true)),
        ["reset"] => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(
                    "Are you sure you want to reset your server config? You'll have to re-run /setup!",
                )
                .components(vec![CreateActionRow::Buttons(vec![
                    CreateButton::new("settings:reset:yes")
                        .label("Yes")
                        .style(ButtonStyle::Danger),
                    CreateButton::new("settings:reset:no")
                        .label("No")
                        .style(ButtonStyle::Secondary),
                ])])
                .ephemeral(true),
        ),
        ["support-roles", action] => match role_option(&options, "role") {
            Some(role) => {
                let change = if *action == "add" {
                    service.add_support_role(guild_id, role.id.get()).await?
                } else {
                    service.remove_support_role(guild_id, role.id.get()).await?
                };
                reply(change.to_string(), true)
            }
            None => reply(UNKNOWN_COMMAND, true),
        },
        ["log-channel"] => match channel_option(&options, "channel") {
            Some(channel) => set_log_channel(ctx, &service, guild_id, channel.id.get()).await?,
            None => reply(UNKNOWN_COMMAND, true),
        },
        ["ticket-category"] => match channel_option(&options, "category") {
            Some(category) => {
                set_ticket_category(ctx, &service, guild_id, category.id.get()).await?
            }
            None => reply(UNKNOWN_COMMAND, true),
        },
        ["max-tickets"] => {
            let amount = integer_option(&options, "amount")
                .and_then(|amount| i32::try_from(amount).ok())
                .unwrap_or(MAX_TICKETS_LIMIT);
            match service
                .update(guild_id, GuildConfigUpdate::MaxTickets(amount))
                .await
            {
                Ok(_) => reply(format!("Max tickets set to {}.", amount), true),
                Err(AppError::BadRequest(message)) => reply(message, true),
                Err(e) => return Err(e),
            }
        }
        ["allow-new-tickets"] => {
            let enabled = boolean_option(&options, "enabled")
                .unwrap_or(!details.config.support_enabled);
            service
                .update(guild_id, GuildConfigUpdate::SupportEnabled(enabled))
                .await?;
            reply(
                format!(
                    "Ticket creation is now {}.",
                    if enabled { "enabled" } else { "disabled" }
                ),
                true,
            )
        }
        _ => reply(UNKNOWN_COMMAND, true),
    };

    command.create_response(&ctx.http, response).await?;

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

    let required = if action.starts_with("reset") {
        Permissions::ADMINISTRATOR
    } else {
        Permissions::MANAGE_GUILD
    };
    if let Some(denied) = require_permissions(component.member.as_ref(), required) {
        component.create_response(&ctx.http, denied).await?;
        return Ok(());
    }

    let service = GuildConfigService::new(&handler.db);

    match action {
        "reset:yes" => {
            service.reset(guild_id).await?;
            component.create_response(&ctx.http, update("Reset.")).await?;
            return Ok(());
        }
        "reset:no" => {
            component.create_response(&ctx.http, update("Cancelled.")).await?;
            return Ok(());
        }
        _ => {}
    }

    let Some(details) = service.details(guild_id).await? else {
        component.create_response(&ctx.http, update(NOT_CONFIGURED)).await?;
        return Ok(());
    };

    match action {
        "roles" => {
            let embed = roles_embed(ctx, guild_id, &details.support_roles).await?;
            component
                .create_response(&ctx.http, reply_embed(embed, true))
                .await?;
        }
        "ping" => {
            let enabled = !details.config.ping_support_roles;
            service
                .update(guild_id, GuildConfigUpdate::PingSupportRoles(enabled))
                .await?;
            refresh_view(ctx, component, &service, guild_id).await?;
            component
                .create_followup(
                    &ctx.http,
                    CreateInteractionResponseFollowup::new()
                        .content(format!(
                            "Support ping roles have been turned {}.",
                            on_off(enabled)
                        ))
                        .ephemeral(true),
                )
                .await?;
        }
        "creation" => {
            let enabled = !details.config.support_enabled;
            service
                .update(guild_id, GuildConfigUpdate::SupportEnabled(enabled))
                .await?;
            refresh_view(ctx, component, &service, guild_id).await?;
            component
                .create_followup(
                    &ctx.http,
                    CreateInteractionResponseFollowup::new()
                        .content(format!("Ticket creation has been turned {}.", on_off(enabled)))
                        .ephemeral(true),
                )
                .await?;
        }
        "questions" => {
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(question::manager_message(
                        details.questions.len(),
                    )),
                )
                .await?;
        }
        _ => {}
    }

    Ok(())
}

/// The settings embed and its buttons.
pub fn view_message(details: &GuildConfigDetails) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content("")
        .embed(view_embed(details))
        .components(view_buttons(details))
}

fn view_embed(details: &GuildConfigDetails) -> CreateEmbed {
    let config = &details.config;
    let channel = |id: Option<u64>| id.map_or_else(|| "None".to_string(), |id| format!("<#{}>", id));

    CreateEmbed::new()
        .title("Server Configuration")
        .description("Use `/settings` to see a list of settings you can change.")
        .colour(BLURPLE)
        .field("Total tickets:", config.total_tickets().to_string(), true)
        .field("Ticket category:", channel(config.ticket_category), true)
        .field("Log channel:", channel(config.log_channel), true)
        .field(
            "Support roles:",
            format!("{} roles", details.support_roles.len()),
            true,
        )
        .field(
            "Ping support roles:",
            yes_no_emoji(config.ping_support_roles),
            true,
        )
        .field("Max open tickets:", config.max_tickets.to_string(), true)
        .field(
            "Ticket creation enabled:",
            yes_no_emoji(config.support_enabled),
            true,
        )
        .footer(CreateEmbedFooter::new(format!("Server ID: {}", config.guild_id)))
}

fn view_buttons(details: &GuildConfigDetails) -> Vec<CreateActionRow> {
    let config = &details.config;

    vec![CreateActionRow::Buttons(vec![
        CreateButton::new("settings:roles")
            .label("View support roles")
            .style(ButtonStyle::Primary),
        CreateButton::new("settings:ping")
            .label(format!(
                "Turn support ping {}",
                on_off(!config.ping_support_roles)
            ))
            .style(ButtonStyle::Secondary),
        CreateButton::new("settings:creation")
            .label(format!(
                "Turn ticket creation {}",
                on_off(!config.support_enabled)
            ))
            .style(ButtonStyle::Secondary),
        CreateButton::new("settings:questions")
            .label("Manage new ticket questions")
            .style(ButtonStyle::Secondary),
    ])]
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Redraws the settings view on the message the button belongs to.
async fn refresh_view(
    ctx: &Context,
    component: &ComponentInteraction,
    service: &GuildConfigService<'_>,
    guild_id: u64,
) -> Result<(), AppError> {
    let response = match service.details(guild_id).await? {
        Some(details) => CreateInteractionResponse::UpdateMessage(view_message(&details)),
        None => update(NOT_CONFIGURED),
    };
    component.create_response(&ctx.http, response).await?;

    Ok(())
}

async fn roles_embed(
    ctx: &Context,
    guild_id: u64,
    support_roles: &[u64],
) -> Result<CreateEmbed, AppError> {
    let guild = DiscordService::new(&ctx.http).guild(guild_id).await?;

    let lines: Vec<String> = support_roles
        .iter()
        .map(|role_id| {
            let name = guild
                .as_ref()
                .and_then(|guild| guild.roles.get(&RoleId::new(*role_id)))
                .map_or("deleted role", |role| role.name.as_str());
            format!("<@&{}> - {} - `{}`", role_id, name, role_id)
        })
        .collect();

    let description = if lines.is_empty() {
        "No support roles are set.".to_string()
    } else {
        truncate(&lines.join("\n"), EMBED_DESCRIPTION_LIMIT)
    };

    Ok(CreateEmbed::new()
        .title("Support roles")
        .description(description)
        .colour(BLURPLE))
}

async fn set_log_channel(
    ctx: &Context,
    service: &GuildConfigService<'_>,
    guild_id: u64,
    channel_id: u64,
) -> Result<CreateInteractionResponse, AppError> {
    if DiscordService::new(&ctx.http)
        .usable_log_channel(Some(channel_id))
        .await?
        .is_none()
    {
        return Ok(reply("I cannot access that channel.", true));
    }

    service
        .update(guild_id, GuildConfigUpdate::LogChannel(Some(channel_id)))
        .await?;

    Ok(reply(format!("Log channel set to <#{}>.", channel_id), true))
}

async fn set_ticket_category(
    ctx: &Context,
    service: &GuildConfigService<'_>,
    guild_id: u64,
    category_id: u64,
) -> Result<CreateInteractionResponse, AppError> {
    let discord = DiscordService::new(&ctx.http);

    let manageable = match discord.channel(category_id).await? {
        Some(category) if category.kind == ChannelType::Category => discord
            .bot_permissions_in(&category)
            .await?
            .manage_channels(),
        _ => false,
    };
    if !manageable {
        return Ok(reply("I cannot manage that category.", true));
    }

    service
        .update(guild_id, GuildConfigUpdate::TicketCategory(Some(category_id)))
        .await?;

    Ok(reply(format!("Ticket category set to <#{}>.", category_id), true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommands_require_their_permissions() {
        assert_eq!(required_permissions(&["view"]), Permissions::MANAGE_GUILD);
        assert_eq!(required_permissions(&["reset"]), Permissions::ADMINISTRATOR);
        assert_eq!(
            required_permissions(&["support-roles", "add"]),
            Permissions::MANAGE_GUILD | Permissions::MANAGE_ROLES
        );
        assert_eq!(
            required_permissions(&["max-tickets"]),
            Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS
        );
    }
}
