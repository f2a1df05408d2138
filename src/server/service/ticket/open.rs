use serenity::all::{
    ChannelId, ChannelType, CreateAllowedMentions, CreateChannel, CreateMessage, EditChannel, GuildChannel,
    GuildId, RoleId, User,
};

use crate::server::{
    data::{
        guild_config::GuildConfigRepository, ticket::TicketRepository,
        ticket_question::TicketQuestionRepository,
    },
    error::AppError,
    model::{
        guild_config::{GuildConfig, GuildConfigUpdate},
        question::TicketQuestion,
        ticket::{CreateTicketParam, Ticket},
    },
    service::{
        discord::DiscordService,
        ticket::{
            message,
            policy::{check_category, OpenDenied},
            TicketService,
        },
    },
    util::{
        format::{paginate_role_mentions, ticket_channel_name},
        permissions::{everyone_deny, member_allow, role_allow},
    },
};

/// Everything gathered while checking that a member may open a ticket.
#[derive(Debug, Clone)]
pub struct OpenPlan {
    pub config: GuildConfig,
    /// `None` creates the channel at the top of the guild.
    pub category: Option<GuildChannel>,
    pub questions: Vec<TicketQuestion>,
}

pub struct OpenRequest<'u> {
    pub author: &'u User,
    pub subject: Option<String>,
    /// `(question label, answer)` pairs from the intake modal.
    pub answers: Vec<(String, String)>,
}

impl<'a> TicketService<'a> {
    /// Runs the pre-flight checks for a new ticket.
    ///
    /// Cleans up after itself on the way: a ticket row whose channel is gone
    /// is deleted, and a configured category that no longer exists is cleared.
    ///
    /// # Returns
    /// - `Ok(Ok(OpenPlan))` - The member may open a ticket
    /// - `Ok(Err(OpenDenied))` - The member may not, with the reason to show them
    /// - `Err(AppError)` - Database or Discord failure
    pub async fn prepare_open(
        &self,
        guild_id: u64,
        author_id: u64,
    ) -> Result<Result<OpenPlan, OpenDenied>, AppError> {
        let config_repo = GuildConfigRepository::new(self.db);
        let ticket_repo = TicketRepository::new(self.db);
        let discord = DiscordService::new(self.http);

        let Some(config) = config_repo.find_by_guild_id(guild_id).await? else {
            return Ok(Err(OpenDenied::NotConfigured));
        };
        if !config.support_enabled {
            return Ok(Err(OpenDenied::Disabled));
        }

        if let Some(existing) = ticket_repo.find_by_author(guild_id, author_id).await? {
            if discord.channel_exists(existing.channel_id).await? {
                return Ok(Err(OpenDenied::AlreadyOpen {
                    channel_id: existing.channel_id,
                }));
            }

            ticket_repo.delete(existing.id).await?;
            tracing::info!(
                "Deleted ticket #{} in guild {} whose channel no longer exists",
                existing.number,
                guild_id
            );
            return Ok(Err(OpenDenied::StaleTicketRemoved));
        }

        let category = match config.ticket_category {
            None => None,
            Some(category_id) => match discord.channel(category_id).await? {
                Some(category) => Some(category),
                None => {
                    config_repo
                        .update(guild_id, GuildConfigUpdate::TicketCategory(None))
                        .await?;
                    tracing::warn!(
                        "Ticket category {} of guild {} no longer exists, cleared it",
                        category_id,
                        guild_id
                    );
                    return Ok(Err(OpenDenied::CategoryMissing));
                }
            },
        };

        if let Some(category) = &category {
            let bot_permissions = discord.bot_permissions_in(category).await?;
            let channel_count = discord
                .guild_channels(guild_id)
                .await?
                .iter()
                .filter(|channel| channel.parent_id == Some(category.id))
                .count();

            if let Err(denied) = check_category(
                bot_permissions,
                &category.name,
                channel_count,
                config.max_tickets,
            ) {
                return Ok(Err(denied));
            }
        }

        let questions = TicketQuestionRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?;

        Ok(Ok(OpenPlan {
            config,
            category,
            questions,
        }))
    }

    /// Creates the ticket channel and row, then greets the author.
    ///
    /// If the row cannot be stored the channel is deleted again so no
    /// channel exists without a ticket.
    pub async fn open(&self, plan: OpenPlan, request: OpenRequest<'_>) -> Result<Ticket, AppError> {
        let guild_id = plan.config.guild_id;
        let discord = DiscordService::new(self.http);

        let guild = discord
            .guild(guild_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Unknown guild ID.".to_string()))?;
        let bot = self.http.get_current_user().await?;

        // Roles deleted from the guild since setup would make channel creation fail.
        let support_roles: Vec<RoleId> = self
            .support_roles(guild_id)
            .await?
            .into_iter()
            .map(RoleId::new)
            .filter(|role_id| guild.roles.contains_key(role_id))
            .collect();

        let mut overwrites = vec![
            everyone_deny(guild_id),
            member_allow(request.author.id),
            member_allow(bot.id),
        ];
        overwrites.extend(support_roles.iter().copied().map(role_allow));

        let number = plan.config.ticket_counter;
        let reason = format!("Ticket created by {}.", request.author.name);
        let mut builder = CreateChannel::new(ticket_channel_name(number, false))
            .kind(ChannelType::Text)
            .position(0)
            .permissions(overwrites)
            .audit_log_reason(&reason);
        if let Some(category) = &plan.category {
            builder = builder.category(category.id);
        }
        if let Some(subject) = &request.subject {
            builder = builder.topic(subject);
        }

        let channel = GuildId::new(guild_id)
            .create_channel(self.http, builder)
            .await?;

        let ticket = match TicketRepository::new(self.db)
            .create(CreateTicketParam {
                guild_id,
                author_id: request.author.id.get(),
                channel_id: channel.id.get(),
                subject: request.subject.clone(),
            })
            .await
        {
            Ok(ticket) => ticket,
            Err(e) => {
                if let Err(delete_err) = channel.delete(self.http).await {
                    tracing::error!(
                        "Failed to delete channel {} after ticket insert failed: {}",
                        channel.id,
                        delete_err
                    );
                }
                return Err(e);
            }
        };

        // Another ticket took the number between the check and the insert.
        if ticket.number != number {
            if let Err(e) = channel
                .id
                .edit(self.http, EditChannel::new().name(ticket.channel_name()))
                .await
            {
                tracing::warn!("Failed to rename ticket channel {}: {}", channel.id, e);
            }
        }

        tracing::info!(
            "Opened ticket #{} for {} in guild {}",
            ticket.number,
            request.author.id,
            guild_id
        );

        if let Err(e) = self
            .announce(&plan.config, &ticket, &request, &support_roles)
            .await
        {
            tracing::warn!(
                "Failed to post opening messages for ticket #{} in guild {}: {}",
                ticket.number,
                guild_id,
                e
            );
        }

        Ok(ticket)
    }

    async fn announce(
        &self,
        config: &GuildConfig,
        ticket: &Ticket,
        request: &OpenRequest<'_>,
        support_roles: &[RoleId],
    ) -> Result<(), AppError> {
        let channel_id = ChannelId::new(ticket.channel_id);

        if config.ping_support_roles && !support_roles.is_empty() {
            let role_ids: Vec<u64> = support_roles.iter().map(|role| role.get()).collect();
            for content in paginate_role_mentions(&role_ids) {
                channel_id
                    .send_message(
                        self.http,
                        CreateMessage::new()
                            .content(content)
                            .allowed_mentions(
                            CreateAllowedMentions::new().roles(support_roles.iter().copied()),
                        ),
                    )
                    .await?;
            }
        }

        let mut embeds = vec![message::ticket_opened(ticket, request.author)];
        embeds.extend(message::answers(&request.answers));
        channel_id
            .send_message(
                self.http,
                CreateMessage::new()
                    .content(format!("<@{}>", request.author.id))
                    .embeds(embeds),
            )
            .await?;

        let discord = DiscordService::new(self.http);
        if let Some(log_channel) = discord.usable_log_channel(config.log_channel).await? {
            log_channel
                .id
                .send_message(
                    self.http,
                    CreateMessage::new()
                        .embed(message::log_opened(ticket, request.author))
                        .allowed_mentions(CreateAllowedMentions::new()),
                )
                .await?;
        }

        Ok(())
    }
}
