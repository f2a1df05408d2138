use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        guild::{GuildConfigDto, GuildDto, PartialGuildDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            auth::DiscordAuthService, guild::GuildService, guild_config::GuildConfigService,
        },
        state::AppState,
    },
};

pub static GUILD_TAG: &str = "guild";

#[derive(Deserialize, IntoParams)]
pub struct GuildListParams {
    /// Only return guilds the bot shares with the user.
    #[serde(default = "default_mutual")]
    pub mutual: bool,
}

fn default_mutual() -> bool {
    true
}

/// List the logged-in user's guilds.
///
/// With `mutual` (the default) only guilds that are configured or that the
/// bot is a member of are returned.
///
/// # Returns
/// - `200 OK` - Partial guild objects from Discord
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Discord or database failure
#[utoipa::path(
    get,
    path = "/api/guilds",
    tag = GUILD_TAG,
    params(GuildListParams),
    responses(
        (status = 200, description = "The user's guilds", body = Vec<PartialGuildDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn get_guilds(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(params): Query<GuildListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    let guilds = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client)
        .user_guilds(&user)
        .await?;

    let guilds = if params.mutual {
        GuildService::new(&state.db, &state.discord_http)
            .mutual(guilds)
            .await?
    } else {
        guilds
    };

    Ok((StatusCode::OK, Json(guilds)))
}

/// Get a guild as seen by the bot.
///
/// # Returns
/// - `200 OK` - Guild with roles and channels
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - The bot is not in the guild
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}",
    tag = GUILD_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Guild details", body = GuildDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Unknown guild ID", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn get_guild(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session).require(&headers).await?;

    let guild = GuildService::new(&state.db, &state.discord_http)
        .info(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(guild)))
}

/// Get a guild's ticket configuration.
///
/// Includes the support roles and intake questions.
///
/// # Returns
/// - `200 OK` - Guild configuration
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - Guild has not run `/setup`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/config",
    tag = GUILD_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Guild configuration", body = GuildConfigDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Unknown guild ID", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn get_guild_config(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session).require(&headers).await?;

    let details = GuildConfigService::new(&state.db)
        .details(guild_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unknown guild ID.".to_string()))?;

    Ok((StatusCode::OK, Json(details.into_dto())))
}
