use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        token::{ApiTokenDto, CreatedApiTokenDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::api_token::ApiToken,
        service::token::ApiTokenService, state::AppState,
    },
};

pub static TOKEN_TAG: &str = "token";

/// Mint a personal API token.
///
/// The full secret is only returned by this call. Send it as
/// `Authorization: Bearer <token>` on any API route.
///
/// # Returns
/// - `201 Created` - New token with its secret
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    post,
    path = "/api/tokens",
    tag = TOKEN_TAG,
    responses(
        (status = 201, description = "Token created", body = CreatedApiTokenDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn create_token(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    let token = ApiTokenService::new(&state.db)
        .create(user.discord_id)
        .await?;

    Ok((StatusCode::CREATED, Json(token.into_created_dto())))
}

/// List the user's API tokens, newest first. Only a prefix of each secret is shown.
#[utoipa::path(
    get,
    path = "/api/tokens",
    tag = TOKEN_TAG,
    responses(
        (status = 200, description = "The user's tokens", body = Vec<ApiTokenDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn list_tokens(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    let tokens: Vec<ApiTokenDto> = ApiTokenService::new(&state.db)
        .list(user.discord_id)
        .await?
        .into_iter()
        .map(ApiToken::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(tokens)))
}

/// Revoke one of the user's API tokens.
///
/// # Returns
/// - `204 No Content` - Token revoked
/// - `404 Not Found` - No such token owned by the user
#[utoipa::path(
    delete,
    path = "/api/tokens/{token_id}",
    tag = TOKEN_TAG,
    params(
        ("token_id" = i32, Path, description = "Token ID")
    ),
    responses(
        (status = 204, description = "Token revoked"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Unknown token ID", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn delete_token(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(token_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&headers).await?;

    ApiTokenService::new(&state.db)
        .revoke(user.discord_id, token_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
