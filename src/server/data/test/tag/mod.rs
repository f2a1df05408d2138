use crate::server::{data::tag::TagRepository, error::AppError, model::tag::CreateTagParam};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_page;
mod search_names;
mod update;
