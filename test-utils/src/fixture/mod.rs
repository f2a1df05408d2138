//! In-memory entity models that are never inserted into a database.
//!
//! Used by unit tests that convert entities into domain models or feed them to
//! pure ticket rules.

pub mod guild_config;
pub mod ticket;

pub use guild_config::entity as guild_config_entity;
pub use ticket::entity as ticket_entity;
