//! SeaORM entities for the ticket bot's relational store.
//!
//! Discord snowflakes are stored as decimal strings and parsed back to `u64`
//! at the repository boundary.

pub mod api_token;
pub mod guild_config;
pub mod prelude;
pub mod support_role;
pub mod tag;
pub mod ticket;
pub mod ticket_question;
pub mod user;
