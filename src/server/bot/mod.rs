//! Discord bot: gateway events, slash commands and component interactions.
//!
//! The bot runs in its own tokio task next to the HTTP server. Its REST
//! client is shared with the dashboard API and the scheduler, so closing a
//! ticket from the web goes through the same Discord connection.
//!
//! Interactions are stateless: every button, select menu and modal carries
//! a `custom_id` of the form `<area>:<action>[:<args>]`, and the handler
//! routes on the `<area>` prefix. The only in-flight state is the `/setup`
//! draft and the topic of a `/ticket new` waiting on its question modal,
//! both held in expiring in-memory maps on the [`handler::Handler`].
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability and channel deletions
//! - `GUILD_MEMBERS` - Member lookups for ticket permissions (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
