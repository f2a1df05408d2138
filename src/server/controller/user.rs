use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::DiscordUserDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::auth::DiscordAuthService,
        state::AppState,
    },
};

pub static USER_TAG: &str = "user";

/// Get the logged-in user's Discord profile.
///
/// Fetched live from Discord with the user's access token. An expired token
/// is refreshed and the request retried once.
///
/// # Returns
/// - `200 OK` - Discord user object
/// - `401 Unauthorized` - Not logged in, or the token could not be refreshed
/// - `500 Internal Server Error` - Discord or database failure
#[utoipa::path(
    get,
    path = "/api/@me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current Discord user", body = DiscordUserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    let profile = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client)
        .current_user(&user)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}
