use chrono::{Duration, Utc};

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{TokenPair, UpsertUserParam},
};
use test_utils::{builder::TestBuilder, factory};

mod update_tokens;
mod upsert;
