use std::num::ParseIntError;
use thiserror::Error;

/// Stored data that does not match what the code expects. Always a 500.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A snowflake column holds something other than a decimal `u64`.
    #[error("Stored snowflake '{value}' is not a valid ID: {source}")]
    ParseStringId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A ticket row was created without the guild configuration it belongs to.
    #[error("Guild {0} has no configuration row")]
    MissingGuildConfig(u64),
}
