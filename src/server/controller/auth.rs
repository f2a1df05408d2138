use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, user::AuthorisedDto},
    server::{
        error::AppError,
        middleware::session::{AuthSession, CsrfSession},
        service::auth::DiscordAuthService,
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Query parameters Discord appends to the redirect URL.
#[derive(Deserialize, IntoParams)]
pub struct CallbackParams {
    /// CSRF state token, validated against the session value.
    pub state: String,
    /// Authorization code exchanged for the user's token pair.
    pub code: String,
}

/// Start a dashboard login.
///
/// Stores a fresh CSRF state in the session and redirects to Discord's
/// authorize page requesting the `identify` and `guilds` scopes.
///
/// # Returns
/// - `307 Temporary Redirect` - To Discord's authorize URL
/// - `500 Internal Server Error` - Session store failure
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord's authorize page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service =
        DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);

    let (url, csrf_token) = auth_service.login_url();
    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete a dashboard login.
///
/// Validates the single-use CSRF state, exchanges the code for a token pair,
/// stores the user and logs them in.
///
/// # Returns
/// - `200 OK` - `{"status": "authorised", "user": {...}}`
/// - `400 Bad Request` - CSRF mismatch or Discord rejected the code
/// - `500 Internal Server Error` - Database or Discord failure
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 200, description = "User logged in", body = AuthorisedDto),
        (status = 400, description = "Login could not be completed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    CsrfSession::new(&session).validate(&params.state).await?;

    let auth_service =
        DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);
    let (user, profile) = auth_service.callback(params.code).await?;

    let auth_session = AuthSession::new(&session);
    auth_session.clear().await;
    auth_session.set_user_id(user.discord_id).await?;

    Ok((
        StatusCode::OK,
        Json(AuthorisedDto {
            status: "authorised".to_string(),
            user: profile,
        }),
    ))
}

/// Log out.
///
/// Clears the session. API tokens stay valid.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Session cleared")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(StatusCode::NO_CONTENT)
}
