use crate::server::{data::support_role::SupportRoleRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod add;
mod remove;
