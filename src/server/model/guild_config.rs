//! Guild configuration domain models.

use crate::{
    model::guild::GuildConfigDto,
    server::{
        error::AppError,
        model::question::TicketQuestion,
        util::parse::{parse_optional_u64, parse_u64_from_string},
    },
};

/// Default and upper bound for concurrently open tickets in a category.
pub const MAX_TICKETS_LIMIT: i32 = 50;
/// Upper bound on support roles per guild; a role select menu holds 25 values.
pub const MAX_SUPPORT_ROLES: usize = 25;

/// Per-guild ticket settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildConfig {
    pub id: i32,
    pub guild_id: u64,
    /// Number the next ticket will receive.
    pub ticket_counter: i64,
    pub ticket_category: Option<u64>,
    pub log_channel: Option<u64>,
    pub ping_support_roles: bool,
    pub max_tickets: i32,
    pub support_enabled: bool,
}

impl GuildConfig {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Converted model
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored snowflake is malformed
    pub fn from_entity(entity: entity::guild_config::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            ticket_counter: entity.ticket_counter,
            ticket_category: parse_optional_u64(entity.ticket_category)?,
            log_channel: parse_optional_u64(entity.log_channel)?,
            ping_support_roles: entity.ping_support_roles,
            max_tickets: entity.max_tickets,
            support_enabled: entity.support_enabled,
        })
    }

    /// Number of tickets opened since setup.
    pub fn total_tickets(&self) -> i64 {
        self.ticket_counter - 1
    }
}

/// A configuration together with the rows that hang off it.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildConfigDetails {
    pub config: GuildConfig,
    pub support_roles: Vec<u64>,
    pub questions: Vec<TicketQuestion>,
}

impl GuildConfigDetails {
    pub fn into_dto(self) -> GuildConfigDto {
        GuildConfigDto {
            guild_id: self.config.guild_id,
            ticket_counter: self.config.ticket_counter,
            ticket_category: self.config.ticket_category,
            log_channel: self.config.log_channel,
            support_roles: self.support_roles,
            ping_support_roles: self.config.ping_support_roles,
            max_tickets: self.config.max_tickets,
            support_enabled: self.config.support_enabled,
            questions: self
                .questions
                .into_iter()
                .map(TicketQuestion::into_dto)
                .collect(),
        }
    }
}

/// Result of the setup wizard.
#[derive(Debug, Clone)]
pub struct SetupGuildParam {
    pub guild_id: u64,
    pub ticket_category: u64,
    pub log_channel: u64,
    pub support_roles: Vec<u64>,
    pub ping_support_roles: bool,
}

/// Single-field changes made through `/settings`.
#[derive(Debug, Clone, PartialEq)]
pub enum GuildConfigUpdate {
    LogChannel(Option<u64>),
    TicketCategory(Option<u64>),
    MaxTickets(i32),
    SupportEnabled(bool),
    PingSupportRoles(bool),
}
