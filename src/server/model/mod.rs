//! Server-side domain models and parameter types.
//!
//! Entity rows are converted into these at the repository boundary, with
//! snowflakes parsed to `u64`, and turned into DTOs at the controller boundary.

pub mod api_token;
pub mod guild_config;
pub mod question;
pub mod tag;
pub mod ticket;
pub mod user;
