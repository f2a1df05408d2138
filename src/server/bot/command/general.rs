use std::time::Instant;

use chrono::{TimeDelta, Utc};
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter,
};

use crate::server::{
    bot::{
        command::{boolean_option, reply, reply_embed},
        handler::Handler,
    },
    data::guild_config::GuildConfigRepository,
    error::AppError,
    service::ticket::message::BLURPLE,
};

/// Permissions the bot asks for in its invite link.
pub const INVITE_PERMISSIONS: u64 = 274_877_959_184;

pub fn register_ping() -> CreateCommand {
    CreateCommand::new("ping").description("Check the bot's latency.")
}

pub fn register_invite() -> CreateCommand {
    CreateCommand::new("invite")
        .description("Get a link to add the bot to your server.")
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "with-required-permissions",
            "Ask for the permissions the bot needs. Defaults to yes.",
        ))
}

pub fn register_about() -> CreateCommand {
    CreateCommand::new("about").description("Information about the bot.")
}

/// Measures a REST round trip to Discord.
pub async fn ping(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let started = Instant::now();
    ctx.http.get_current_user().await?;
    let latency = started.elapsed().as_millis();

    command
        .create_response(&ctx.http, reply(format!("Pong! {}ms", latency), false))
        .await?;

    Ok(())
}

pub async fn invite(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let with_permissions =
        boolean_option(&command.data.options(), "with-required-permissions").unwrap_or(true);
    let bot_id = ctx.cache.current_user().id.get();

    command
        .create_response(
            &ctx.http,
            reply(invite_url(bot_id, with_permissions), true),
        )
        .await?;

    Ok(())
}

pub async fn about(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let configured = GuildConfigRepository::new(&handler.db).count().await?;
    let guilds = ctx.cache.guild_count();
    let uptime = format_uptime(Utc::now() - handler.started_at);

    let mut embed = CreateEmbed::new()
        .title("About Me")
        .colour(BLURPLE)
        .field(
            "Guilds",
            format!("Total: {} ({} database entries)", guilds, configured),
            true,
        )
        .field("Uptime", uptime, true)
        .footer(CreateEmbedFooter::new(format!(
            "Trident v{}",
            env!("CARGO_PKG_VERSION")
        )));
    if let Some(owner_id) = handler.owner_id {
        embed = embed.field("Owner", format!("<@{}>", owner_id), true);
    }

    command
        .create_response(&ctx.http, reply_embed(embed, false))
        .await?;

    Ok(())
}

fn invite_url(client_id: u64, with_permissions: bool) -> String {
    let permissions = if with_permissions {
        INVITE_PERMISSIONS
    } else {
        0
    };

    format!(
        "https://discord.com/oauth2/authorize?client_id={}&permissions={}&scope=bot%20applications.commands",
        client_id, permissions
    )
}

/// Renders an uptime like `2d 3h 4m 5s`, dropping leading zero units.
fn format_uptime(uptime: TimeDelta) -> String {
    let total = uptime.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        total % 86_400 / 3_600,
        total % 3_600 / 60,
        total % 60,
    );

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_url_includes_permissions_only_when_asked() {
        assert_eq!(
            invite_url(42, true),
            "https://discord.com/oauth2/authorize?client_id=42&permissions=274877959184&scope=bot%20applications.commands"
        );
        assert!(invite_url(42, false).contains("permissions=0&"));
    }

    #[test]
    fn uptime_drops_leading_zero_units() {
        assert_eq!(format_uptime(TimeDelta::seconds(5)), "5s");
        assert_eq!(format_uptime(TimeDelta::seconds(3_725)), "1h 2m 5s");
        assert_eq!(format_uptime(TimeDelta::seconds(90_061)), "1d 1h 1m 1s");
    }
}
