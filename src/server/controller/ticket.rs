use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serenity::all::UserId;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        ticket::{LockTicketDto, TicketDto},
    },
    server::{
        data::ticket::TicketRepository,
        error::AppError,
        middleware::auth::AuthGuard,
        model::ticket::Ticket,
        service::{
            guild::GuildService,
            ticket::{
                close::DEFAULT_CLOSE_REASON,
                policy::{can_close, can_lock},
                TicketService,
            },
        },
        state::AppState,
        util::concurrency::{
            ConcurrencyKey, ConcurrencyPermit, CONCURRENCY_REACHED, TICKET_CLOSE, TICKET_LOCK,
        },
    },
};

pub static TICKET_TAG: &str = "ticket";

/// List a guild's open tickets, oldest first.
///
/// # Access Control
/// The user must be in the guild and either hold Manage Server together with
/// Manage Channels, or have one of the guild's support roles.
///
/// # Returns
/// - `200 OK` - Open tickets
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Not in the guild or insufficient permissions
/// - `404 Not Found` - Guild not configured or the bot left it
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/tickets",
    tag = TICKET_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Open tickets", body = Vec<TicketDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Unknown guild ID", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn get_tickets(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    GuildService::new(&state.db, &state.discord_http)
        .require_ticket_access(guild_id, user.discord_id)
        .await?;

    let tickets: Vec<TicketDto> = TicketRepository::new(&state.db)
        .get_by_guild_id(guild_id)
        .await?
        .into_iter()
        .map(Ticket::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(tickets)))
}

/// Lock or unlock a ticket.
///
/// The channel is renamed to match the new state when the bot may manage it.
///
/// # Access Control
/// Same as listing tickets. Managers without a support role may lock too.
///
/// # Returns
/// - `200 OK` - Updated ticket
/// - `403 Forbidden` - Insufficient permissions
/// - `404 Not Found` - Unknown guild or ticket
/// - `409 Conflict` - The ticket is already being locked or unlocked
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}/lock",
    tag = TICKET_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Ticket ID")
    ),
    request_body = LockTicketDto,
    responses(
        (status = 200, description = "Ticket updated", body = TicketDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Unknown guild or ticket", body = ErrorDto),
        (status = 409, description = "Ticket is busy", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn lock_ticket(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
    Json(payload): Json<LockTicketDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    let actor = GuildService::new(&state.db, &state.discord_http)
        .require_ticket_access(guild_id, user.discord_id)
        .await?;
    can_lock(&actor)?;

    let ticket = find_ticket(&state, guild_id, ticket_id).await?;
    let _permit = acquire(&state, TICKET_LOCK, ticket.channel_id)?;
    let ticket = TicketService::new(&state.db, &state.discord_http)
        .set_locked(&ticket, payload.locked)
        .await?;

    Ok((StatusCode::OK, Json(ticket.into_dto())))
}

/// Close a ticket.
///
/// Logs the closure, deletes the ticket and then its channel, the same way
/// `/ticket close` does. Locked tickets can only be closed by administrators.
///
/// # Returns
/// - `204 No Content` - Ticket closed
/// - `403 Forbidden` - Insufficient permissions or ticket locked
/// - `404 Not Found` - Unknown guild or ticket
/// - `409 Conflict` - The ticket is already being closed
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/tickets/{ticket_id}",
    tag = TICKET_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("ticket_id" = i32, Path, description = "Ticket ID")
    ),
    responses(
        (status = 204, description = "Ticket closed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Unknown guild or ticket", body = ErrorDto),
        (status = 409, description = "Ticket is busy", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn close_ticket(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path((guild_id, ticket_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    let actor = GuildService::new(&state.db, &state.discord_http)
        .require_ticket_access(guild_id, user.discord_id)
        .await?;

    let ticket = find_ticket(&state, guild_id, ticket_id).await?;
    can_close(&ticket, &actor)?;
    let _permit = acquire(&state, TICKET_CLOSE, ticket.channel_id)?;

    let closer = state
        .discord_http
        .get_user(UserId::new(user.discord_id))
        .await?;
    TicketService::new(&state.db, &state.discord_http)
        .close(&ticket, &closer, DEFAULT_CLOSE_REASON)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_ticket(state: &AppState, guild_id: u64, ticket_id: i32) -> Result<Ticket, AppError> {
    TicketRepository::new(&state.db)
        .find_by_id(guild_id, ticket_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unknown ticket ID.".to_string()))
}

/// Claims the ticket channel's key, shared with the bot's `/ticket` commands.
fn acquire(
    state: &AppState,
    command: &'static str,
    channel_id: u64,
) -> Result<ConcurrencyPermit, AppError> {
    state
        .concurrency
        .try_acquire(ConcurrencyKey::channel(command, channel_id))
        .ok_or_else(|| AppError::Conflict(CONCURRENCY_REACHED.to_string()))
}
