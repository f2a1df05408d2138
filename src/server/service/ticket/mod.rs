//! Ticket lifecycle: open, lock, membership changes and close.
//!
//! The bot commands and the dashboard API both go through this service so a
//! ticket closed from either side is logged and cleaned up the same way.
//! Authorization lives in [`policy`]; this module only performs the Discord
//! and database work once a rule has allowed it.

use sea_orm::DatabaseConnection;
use serenity::all::Http;

use crate::server::{
    data::{support_role::SupportRoleRepository, ticket::TicketRepository},
    error::AppError,
    model::ticket::Ticket,
};

pub mod close;
pub mod lock;
pub mod member;
pub mod message;
pub mod open;
pub mod policy;

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
    http: &'a Http,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a Http) -> Self {
        Self { db, http }
    }

    /// Finds the ticket bound to a channel.
    pub async fn find_by_channel(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        TicketRepository::new(self.db)
            .find_by_channel_id(channel_id)
            .await
    }

    /// Support role IDs of the ticket's guild.
    pub async fn support_roles(&self, guild_id: u64) -> Result<Vec<u64>, AppError> {
        SupportRoleRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await
    }
}
