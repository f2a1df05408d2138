//! Service layer between the API controllers, the bot commands and the
//! repositories.
//!
//! Services own the rules and the Discord side effects; repositories only
//! read and write rows. Outcomes a member should see as a reply come back as
//! typed denials whose `Display` text is that reply.

pub mod auth;
pub mod discord;
pub mod guild;
pub mod guild_config;
pub mod question;
pub mod tag;
pub mod ticket;
pub mod token;
