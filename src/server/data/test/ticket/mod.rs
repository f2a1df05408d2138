use crate::server::{
    data::ticket::TicketRepository, error::AppError, model::ticket::CreateTicketParam,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_channel_id;
mod find_by_author;
mod set_locked;
