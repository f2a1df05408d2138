//! The ticket bot and the dashboard API.
//!
//! Both run in one process over one SQLite database. The API uses Axum, data
//! access goes through SeaORM, and the bot is built on Serenity.
//!
//! # Layout
//!
//! - `bot/` - gateway events, slash commands, components and modals
//! - `controller/` and `router` - the dashboard's JSON endpoints and OpenAPI document
//! - `middleware/` - the session or bearer-token `AuthGuard`
//! - `service/` - ticket, tag and configuration rules shared by the bot and the API
//! - `data/` - SeaORM repositories returning the domain types in `model/`
//! - `scheduler/` - the orphaned ticket sweep
//! - `config`, `startup`, `state` - process setup
//!
//! Bot commands and API handlers both go through `service/`, so a ticket
//! closed from the dashboard is logged and cleaned up exactly like one closed
//! with `/ticket close`.

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
