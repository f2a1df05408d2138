use crate::server::{
    data::guild_config::GuildConfigRepository,
    error::AppError,
    model::guild_config::{GuildConfigUpdate, SetupGuildParam},
};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod filter_configured;
mod find_by_guild_id;
mod setup;
mod update;
