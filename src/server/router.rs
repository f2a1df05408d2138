use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        auth::{self, AUTH_TAG},
        guild::{self, GUILD_TAG},
        tag::{self, TAG_TAG},
        ticket::{self, TICKET_TAG},
        token::{self, TOKEN_TAG},
        user::{self, USER_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Trident", description = "Support ticket dashboard API"),
    modifiers(&SecurityAddon),
    tags(
        (name = AUTH_TAG, description = "Discord OAuth2 login"),
        (name = USER_TAG, description = "The logged-in user"),
        (name = GUILD_TAG, description = "Guilds and their configuration"),
        (name = TICKET_TAG, description = "Open tickets of a guild"),
        (name = TAG_TAG, description = "Tags of a guild"),
        (name = TOKEN_TAG, description = "Personal API tokens"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("id"))),
        );
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(user::get_current_user))
        .routes(routes!(guild::get_guilds))
        .routes(routes!(guild::get_guild))
        .routes(routes!(guild::get_guild_config))
        .routes(routes!(ticket::get_tickets))
        .routes(routes!(ticket::lock_ticket))
        .routes(routes!(ticket::close_ticket))
        .routes(routes!(tag::get_tags))
        .routes(routes!(token::create_token, token::list_tokens))
        .routes(routes!(token::delete_token))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: every API route shows up in the generated document
    #[test]
    fn openapi_lists_routes() {
        let (_, api) = OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
            .routes(routes!(auth::login))
            .routes(routes!(ticket::lock_ticket))
            .routes(routes!(token::create_token, token::list_tokens))
            .split_for_parts();

        assert!(api.paths.paths.contains_key("/api/auth/login"));
        assert!(api
            .paths
            .paths
            .contains_key("/api/guilds/{guild_id}/tickets/{ticket_id}/lock"));
        assert!(api.paths.paths.contains_key("/api/tokens"));
    }
}
