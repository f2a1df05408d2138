use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, tag::TagDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, model::tag::Tag, service::tag::TagService,
        state::AppState,
    },
};

pub static TAG_TAG: &str = "tag";

/// List a guild's tags, most used first.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/tags",
    tag = TAG_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Tags of the guild", body = Vec<TagDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("session" = []), ("bearer" = [])),
)]
pub async fn get_tags(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session).require(&headers).await?;

    let tags: Vec<TagDto> = TagService::new(&state.db)
        .list_all(guild_id)
        .await?
        .into_iter()
        .map(Tag::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(tags)))
}
