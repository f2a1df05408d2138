use crate::server::{data::api_token::ApiTokenRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
