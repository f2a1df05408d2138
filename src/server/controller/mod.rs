//! HTTP handlers for the dashboard API.
//!
//! Handlers authenticate through `AuthGuard`, delegate to a service and turn
//! domain models into DTOs. Each handler carries a `#[utoipa::path]` so the
//! router can assemble the OpenAPI document from the same functions it mounts.

pub mod auth;
pub mod guild;
pub mod tag;
pub mod ticket;
pub mod token;
pub mod user;
