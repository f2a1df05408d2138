//! OAuth2 login with Discord and calls made on the user's behalf.

use chrono::{Duration, Utc};
use oauth2::{basic::BasicTokenResponse, TokenResponse};
use sea_orm::DatabaseConnection;

use crate::server::{model::user::TokenPair, state::OAuth2Client};

pub mod callback;
pub mod login;
pub mod user_api;

/// Base URL of Discord's REST API for user-token requests.
const DISCORD_API_URL: &str = "https://discord.com/api/v10";

pub struct DiscordAuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
        }
    }
}

/// Converts a token endpoint response into the pair stored on the user.
fn token_pair(token: &BasicTokenResponse) -> TokenPair {
    TokenPair {
        access_token: token.access_token().secret().clone(),
        refresh_token: token.refresh_token().map(|t| t.secret().clone()),
        expires_at: token
            .expires_in()
            .and_then(|expires_in| Duration::from_std(expires_in).ok())
            .map(|expires_in| Utc::now() + expires_in),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use oauth2::{basic::BasicTokenType, AccessToken, EmptyExtraTokenFields, RefreshToken};

    use super::*;

    #[test]
    fn converts_token_response() {
        let mut response = BasicTokenResponse::new(
            AccessToken::new("access".to_string()),
            BasicTokenType::Bearer,
            EmptyExtraTokenFields {},
        );
        response.set_refresh_token(Some(RefreshToken::new("refresh".to_string())));
        response.set_expires_in(Some(&StdDuration::from_secs(604_800)));

        let pair = token_pair(&response);

        assert_eq!(pair.access_token, "access");
        assert_eq!(pair.refresh_token.as_deref(), Some("refresh"));
        let expires_at = pair.expires_at.unwrap();
        assert!(expires_at > Utc::now() + Duration::days(6));
    }

    /// Expected: no refresh token and no expiry when Discord omits them
    #[test]
    fn handles_minimal_response() {
        let response = BasicTokenResponse::new(
            AccessToken::new("access".to_string()),
            BasicTokenType::Bearer,
            EmptyExtraTokenFields {},
        );

        let pair = token_pair(&response);

        assert_eq!(pair.refresh_token, None);
        assert_eq!(pair.expires_at, None);
    }
}
