//! Ticket domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::ticket::TicketDto,
    server::{error::AppError, util::format::ticket_channel_name, util::parse::parse_u64_from_string},
};

/// An open ticket. The row lives exactly as long as its channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub guild_id: u64,
    pub number: i64,
    pub author_id: u64,
    pub channel_id: u64,
    pub subject: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub locked: bool,
}

impl Ticket {
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            number: entity.number,
            author_id: parse_u64_from_string(entity.author_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            subject: entity.subject,
            opened_at: entity.opened_at,
            locked: entity.locked,
        })
    }

    pub fn into_dto(self) -> TicketDto {
        TicketDto {
            id: self.id,
            guild_id: self.guild_id,
            number: self.number,
            author_id: self.author_id,
            channel_id: self.channel_id,
            subject: self.subject,
            opened_at: self.opened_at,
            locked: self.locked,
        }
    }

    /// Channel name matching the ticket's current lock state.
    pub fn channel_name(&self) -> String {
        ticket_channel_name(self.number, self.locked)
    }
}

/// Fields of a ticket row about to be inserted. The number is assigned by
/// the repository from the guild's counter.
#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub guild_id: u64,
    pub author_id: u64,
    pub channel_id: u64,
    pub subject: Option<String>,
}
