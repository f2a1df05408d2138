//! Database repository layer.
//!
//! Each repository wraps a borrowed `DatabaseConnection`, queries SeaORM
//! entities and returns domain models from `server::model`, parsing stored
//! snowflake strings on the way out.

pub mod api_token;
pub mod guild_config;
pub mod support_role;
pub mod tag;
pub mod ticket;
pub mod ticket_question;
pub mod user;

#[cfg(test)]
mod test;
