//! `/tag` commands, their confirmation buttons and modals.
//!
//! Confirmations are separate button interactions, so each one re-reads the
//! tag by ID and re-checks ownership before changing anything.

use serenity::all::{
    ButtonStyle, CommandInteraction, CommandOptionType, ComponentInteraction, Context,
    CreateActionRow, CreateAllowedMentions, CreateAutocompleteResponse, CreateButton,
    CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter, CreateInputText,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateModal, InputTextStyle, Member, ModalInteraction,
};

use crate::server::{
    bot::{
        command::{
            guild_command, member_permissions, modal_values, reply, string_option, subcommand,
            update, user_option, GUILD_ONLY, UNKNOWN_COMMAND,
        },
        handler::Handler,
    },
    error::AppError,
    model::tag::{EditTagParam, Tag, MAX_TAG_CONTENT_LENGTH, MAX_TAG_NAME_LENGTH},
    service::{
        discord::DiscordService,
        guild_config::{GuildConfigService, NOT_CONFIGURED},
        tag::{authorize, TagAction, TagDenied, TagService},
        ticket::message::BLURPLE,
    },
    util::format::{shorten, MESSAGE_LIMIT},
};

/// Discord's limit on modal titles.
const MODAL_TITLE_LIMIT: usize = 45;
/// Discord's limit on text input placeholders.
const PLACEHOLDER_LIMIT: usize = 100;

pub fn register() -> CreateCommand {
    let tag_option = || {
        CreateCommandOption::new(CommandOptionType::String, "tag", "The name of the tag.")
            .required(true)
            .set_autocomplete(true)
    };

    guild_command("tag", "Save and share snippets of text.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "view", "Send a tag.")
                .add_sub_option(tag_option()),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "create",
            "Create a new tag.",
        ))
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "list", "List this server's tags.")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "search",
                        "Only show tags whose name contains this.",
                    )
                    .max_length(MAX_TAG_NAME_LENGTH as u16),
                ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "delete", "Delete a tag.")
                .add_sub_option(tag_option()),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "edit", "Edit a tag.")
                .add_sub_option(tag_option()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "transfer",
                "Give a tag to another member.",
            )
            .add_sub_option(tag_option())
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::User, "to", "The new owner.")
                    .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "info",
                "Show information about a tag.",
            )
            .add_sub_option(tag_option()),
        )
}

pub async fn autocomplete(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (Some(guild_id), Some(focused)) =
        (command.guild_id.map(|id| id.get()), command.data.autocomplete())
    else {
        return Ok(());
    };

    let names = TagService::new(&handler.db)
        .autocomplete(guild_id, focused.value)
        .await?;
    let choices = names
        .into_iter()
        .fold(CreateAutocompleteResponse::new(), |response, name| {
            response.add_string_choice(name.clone(), name)
        });

    command
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(choices))
        .await?;

    Ok(())
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
    let service = TagService::new(&handler.db);

    if let ["create"] = path.as_slice() {
        let response = if GuildConfigService::new(&handler.db)
            .get(guild_id)
            .await?
            .is_none()
        {
            reply(NOT_CONFIGURED, true)
        } else {
            CreateInteractionResponse::Modal(create_modal())
        };
        command.create_response(&ctx.http, response).await?;
        return Ok(());
    }
    if let ["list"] = path.as_slice() {
        let search = string_option(&options, "search");
        let message = list_message(&service, guild_id, search, 0).await?;
        command
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(message.ephemeral(true)),
            )
            .await?;
        return Ok(());
    }

    let Some(name) = string_option(&options, "tag") else {
        command.create_response(&ctx.http, reply(UNKNOWN_COMMAND, true)).await?;
        return Ok(());
    };

    // Viewing counts as a use, so it goes through its own lookup.
    if let ["view"] = path.as_slice() {
        let response = match service.use_tag(guild_id, name).await? {
            Some(tag) => view_response(&tag),
            None => reply(TagDenied::NotFound.to_string(), true),
        };
        command.create_response(&ctx.http, response).await?;
        return Ok(());
    }

    let Some(tag) = service.find(guild_id, name).await? else {
        command
            .create_response(&ctx.http, reply(TagDenied::NotFound.to_string(), true))
            .await?;
        return Ok(());
    };
    let user_id = command.user.id.get();
    let is_admin = is_admin(command.member.as_deref());

    let response = match (path.as_slice(), user_option(&options, "to")) {
        (["info"], _) => info_response(ctx, &tag).await?,
        (["delete"], _) => match authorize(&tag, user_id, is_admin, TagAction::Delete) {
            Ok(()) => confirm(
                "Are you sure you want to delete this tag? This cannot be undone!".to_string(),
                vec![
                    CreateButton::new(format!("tags:delete:{}", tag.id))
                        .label("Yes")
                        .style(ButtonStyle::Danger),
                    CreateButton::new(format!("tags:keep:{}", tag.id))
                        .label("No")
                        .style(ButtonStyle::Secondary),
                ],
            ),
            Err(denied) => reply(denied.to_string(), true),
        },
        (["edit"], _) => match authorize(&tag, user_id, is_admin, TagAction::Edit) {
            Ok(()) => CreateInteractionResponse::Modal(edit_modal(&tag)),
            Err(denied) => reply(denied.to_string(), true),
        },
        (["transfer"], Some(target)) => {
            match authorize(&tag, user_id, is_admin, TagAction::Transfer) {
                Ok(()) => confirm(
                    format!(
                        "Are you sure you want to give ownership of '{}' to <@{}>? You will \
                         no-longer be able to modify this tag.",
                        tag.name, target.id
                    ),
                    vec![
                        CreateButton::new(format!("tags:transfer:{}:{}", tag.id, target.id))
                            .label("Yes")
                            .style(ButtonStyle::Success),
                        CreateButton::new("tags:transfer-no")
                            .label("No")
                            .style(ButtonStyle::Secondary),
                        CreateButton::new("tags:transfer-cancel")
                            .label("Cancel")
                            .style(ButtonStyle::Danger),
                    ],
                ),
                Err(denied) => reply(denied.to_string(), true),
            }
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
    let service = TagService::new(&handler.db);
    let user_id = component.user.id.get();
    let is_admin = is_admin(component.member.as_ref());

    let mut parts = action.splitn(3, ':');
    let (kind, first, rest) = (parts.next(), parts.next(), parts.next());

    let response = match (kind, first) {
        (Some("page"), Some(page)) => {
            let page = page.parse().unwrap_or(0);
            let search = rest.filter(|search| !search.is_empty());
            CreateInteractionResponse::UpdateMessage(
                list_message(&service, guild_id, search, page).await?,
            )
        }
        (Some("keep"), _) => update("Tag was not deleted."),
        (Some("transfer-no"), _) => update("Did not transfer tag."),
        (Some("transfer-cancel"), _) => update("Transfer cancelled."),
        (Some("delete"), Some(id)) => match find(&service, guild_id, id).await? {
            Some(tag) => match authorize(&tag, user_id, is_admin, TagAction::Delete) {
                Ok(()) => {
                    service.delete(&tag).await?;
                    update("Tag was successfully deleted.")
                }
                Err(denied) => update(denied.to_string()),
            },
            None => update(TagDenied::NotFound.to_string()),
        },
        (Some("transfer"), Some(id)) => {
            let target = rest.and_then(|target| target.parse::<u64>().ok());
            match (find(&service, guild_id, id).await?, target) {
                (Some(tag), Some(target)) => {
                    match authorize(&tag, user_id, is_admin, TagAction::Transfer) {
                        Ok(()) => match service.set_owner(&tag, target).await? {
                            Some(_) => update(format!(
                                "Successfully transferred tag '{}' to <@{}>.",
                                tag.name, target
                            )),
                            None => update(TagDenied::NotFound.to_string()),
                        },
                        Err(denied) => update(denied.to_string()),
                    }
                }
                _ => update(TagDenied::NotFound.to_string()),
            }
        }
        (Some("claim"), Some(id)) => {
            return claim(ctx, component, &service, guild_id, id).await;
        }
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
    let service = TagService::new(&handler.db);
    let values = modal_values(modal);
    let field = |name: &str| {
        values
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let content = match action.split_once(':') {
        None if action == "create" => {
            let name = field("name").unwrap_or_default();
            let content = field("content").unwrap_or_default();
            match service
                .create(guild_id, modal.user.id.get(), &name, content)
                .await?
            {
                Ok(tag) => format!(
                    "Successfully created a tag with the name `{}`!",
                    tag.name.replace('`', "")
                ),
                Err(denied) => denied.to_string(),
            }
        }
        Some(("edit", id)) => match find(&service, guild_id, id).await? {
            Some(tag) => {
                let is_admin = is_admin(modal.member.as_ref());
                match authorize(&tag, modal.user.id.get(), is_admin, TagAction::Edit) {
                    Ok(()) => {
                        let param = EditTagParam {
                            name: field("name"),
                            content: field("content"),
                        };
                        match service.edit(&tag, param).await? {
                            Ok(updated) => {
                                format!("Successfully edited tag '{}'.", updated.name)
                            }
                            Err(denied) => denied.to_string(),
                        }
                    }
                    Err(denied) => denied.to_string(),
                }
            }
            None => TagDenied::NotFound.to_string(),
        },
        _ => return Ok(()),
    };

    modal.create_response(&ctx.http, reply(content, true)).await?;

    Ok(())
}

fn is_admin(member: Option<&Member>) -> bool {
    member_permissions(member).administrator()
}

async fn find(service: &TagService<'_>, guild_id: u64, id: &str) -> Result<Option<Tag>, AppError> {
    match id.parse::<i32>() {
        Ok(id) => service.find_by_id(guild_id, id).await,
        Err(_) => Ok(None),
    }
}

/// Sends a tag's content, as an embed when it is too long for a message.
fn view_response(tag: &Tag) -> CreateInteractionResponse {
    let message = CreateInteractionResponseMessage::new()
        .allowed_mentions(CreateAllowedMentions::new());

    let message = if tag.content.chars().count() <= MESSAGE_LIMIT {
        message.content(&tag.content)
    } else {
        message.embed(
            CreateEmbed::new()
                .title(&tag.name)
                .description(&tag.content)
                .colour(BLURPLE),
        )
    };

    CreateInteractionResponse::Message(message)
}

async fn info_response(ctx: &Context, tag: &Tag) -> Result<CreateInteractionResponse, AppError> {
    let embed = CreateEmbed::new()
        .title(format!("'{}':", tag.name))
        .colour(BLURPLE)
        .field("ID", tag.id.to_string(), true)
        .field(
            "Content",
            format!("{} characters", tag.content.chars().count()),
            true,
        )
        .field(
            "Created",
            format!("<t:{}:f>", tag.created_at.timestamp()),
            true,
        )
        .field("Author", format!("<@{}>", tag.author_id), true)
        .field("Owner", format!("<@{}>", tag.owner_id), true)
        .field("Uses", tag.uses.to_string(), true)
        .footer(CreateEmbedFooter::new(format!("Tag ID: {}", tag.id)));

    let mut message = CreateInteractionResponseMessage::new()
        .embed(embed)
        .allowed_mentions(CreateAllowedMentions::new());

    let owner_present = DiscordService::new(&ctx.http)
        .is_member(tag.guild_id, tag.owner_id)
        .await?;
    if !owner_present {
        message = message.components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
            format!("tags:claim:{}", tag.id),
        )
        .label("Claim tag")
        .style(ButtonStyle::Success)])]);
    }

    Ok(CreateInteractionResponse::Message(message))
}

async fn claim(
    ctx: &Context,
    component: &ComponentInteraction,
    service: &TagService<'_>,
    guild_id: u64,
    id: &str,
) -> Result<(), AppError> {
    let Some(tag) = find(service, guild_id, id).await? else {
        component
            .create_response(&ctx.http, reply(TagDenied::NotFound.to_string(), true))
            .await?;
        return Ok(());
    };

    // Someone may have claimed it, or the owner rejoined, since the info was shown.
    if DiscordService::new(&ctx.http)
        .is_member(guild_id, tag.owner_id)
        .await?
    {
        component
            .create_response(
                &ctx.http,
                reply("The owner of this tag is still in this server.", true),
            )
            .await?;
        return Ok(());
    }

    service.set_owner(&tag, component.user.id.get()).await?;

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new().components(Vec::new()),
            ),
        )
        .await?;
    component
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content("✅ You now own this tag!")
                .ephemeral(true),
        )
        .await?;

    Ok(())
}

fn confirm(content: String, buttons: Vec<CreateButton>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .components(vec![CreateActionRow::Buttons(buttons)])
            .allowed_mentions(CreateAllowedMentions::new())
            .ephemeral(true),
    )
}

async fn list_message(
    service: &TagService<'_>,
    guild_id: u64,
    search: Option<&str>,
    page: u64,
) -> Result<CreateInteractionResponseMessage, AppError> {
    let search = search.map(str::trim).filter(|search| !search.is_empty());
    let result = service.page(guild_id, search, page).await?;

    if result.tags.is_empty() {
        let content = if search.is_some() {
            "No tags matching that criteria found."
        } else {
            "This server has no tags."
        };
        return Ok(CreateInteractionResponseMessage::new()
            .content(content)
            .embeds(Vec::new())
            .components(Vec::new()));
    }

    let lines: Vec<String> = result
        .tags
        .iter()
        .map(|tag| format!("`{}` - {} uses", tag.name, tag.uses))
        .collect();
    let embed = CreateEmbed::new()
        .title(format!("Tags, page {}", result.page + 1))
        .description(lines.join("\n"))
        .colour(BLURPLE)
        .footer(CreateEmbedFooter::new(format!(
            "Page {}/{}",
            result.page + 1,
            result.pages
        )));

    let search = search.unwrap_or_default();
    let buttons = vec![
        CreateButton::new(page_custom_id(result.page.saturating_sub(1), search))
            .label("Previous")
            .style(ButtonStyle::Secondary)
            .disabled(result.page == 0),
        CreateButton::new(page_custom_id(result.page + 1, search))
            .label("Next")
            .style(ButtonStyle::Secondary)
            .disabled(result.page + 1 >= result.pages),
    ];

    Ok(CreateInteractionResponseMessage::new()
        .content("")
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(buttons)]))
}

/// `custom_id` of a list page button. The search goes last since it may
/// itself contain colons.
fn page_custom_id(page: u64, search: &str) -> String {
    format!("tags:page:{}:{}", page, search)
}

fn create_modal() -> CreateModal {
    CreateModal::new("tags:create", "Create a tag").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Name:", "name")
                .min_length(1)
                .max_length(MAX_TAG_NAME_LENGTH as u16)
                .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Paragraph, "Content:", "content")
                .min_length(1)
                .max_length(MAX_TAG_CONTENT_LENGTH as u16)
                .required(true),
        ),
    ])
}

fn edit_modal(tag: &Tag) -> CreateModal {
    let title = shorten(&format!("Edit tag: '{}'", tag.name), MODAL_TITLE_LIMIT);

    CreateModal::new(format!("tags:edit:{}", tag.id), title).components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "New name:", "name")
                .placeholder(shorten(&tag.name, PLACEHOLDER_LIMIT))
                .max_length(MAX_TAG_NAME_LENGTH as u16)
                .required(false),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Paragraph, "New content:", "content")
                .placeholder(shorten(&tag.content, PLACEHOLDER_LIMIT))
                .max_length(MAX_TAG_CONTENT_LENGTH as u16)
                .required(false),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::bot::command::split_custom_id;

    #[test]
    fn page_ids_keep_colons_in_search() {
        let custom_id = page_custom_id(2, "faq:rules");
        let (area, action) = split_custom_id(&custom_id);
        assert_eq!(area, "tags");

        let parts: Vec<&str> = action.splitn(3, ':').collect();
        assert_eq!(parts, vec!["page", "2", "faq:rules"]);
    }

    #[test]
    fn edit_modal_title_fits_discord_limit() {
        let tag = Tag {
            id: 1,
            guild_id: 1,
            name: "a-very-long-tag-name-that-goes-on-and-on".to_string(),
            content: "content".to_string(),
            author_id: 2,
            owner_id: 2,
            uses: 0,
            created_at: chrono::Utc::now(),
        };

        let modal = serde_json::to_value(edit_modal(&tag)).unwrap();

        assert_eq!(modal["custom_id"], "tags:edit:1");
        assert!(modal["title"].as_str().unwrap().chars().count() <= MODAL_TITLE_LIMIT);
    }
}
