//! JSON DTOs exchanged with dashboard clients.
//!
//! Snowflakes are serialized as strings because they do not fit in a
//! JavaScript number.

pub mod api;
pub mod guild;
pub mod snowflake;
pub mod tag;
pub mod ticket;
pub mod token;
pub mod user;
