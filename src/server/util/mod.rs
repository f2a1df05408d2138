//! Small helpers shared across layers.

pub mod concurrency;
pub mod discord;
pub mod expiring;
pub mod format;
pub mod parse;
pub mod permissions;
