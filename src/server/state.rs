//! Application state shared across all request handlers.
//!
//! Built once at startup and cloned into every handler through Axum's state
//! extraction. All fields are cheap to clone.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

use crate::server::util::concurrency::ConcurrencyGuard;

/// OAuth2 client with the authorize and token endpoints set.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool shared with the bot.
    pub db: DatabaseConnection,

    /// Client for Discord API calls made with a user's access token.
    ///
    /// Does not follow redirects.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// The bot's own HTTP client, for lookups made with the bot token.
    pub discord_http: Arc<Http>,

    /// The bot's concurrency guard; ticket close and lock share keys with `/ticket`.
    pub concurrency: ConcurrencyGuard,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_http: Arc<Http>,
        concurrency: ConcurrencyGuard,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord_http,
            concurrency,
        }
    }
}
