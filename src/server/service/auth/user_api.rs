//! Requests made to Discord with the user's own access token.
//!
//! Access tokens expire after a week. When Discord answers 401 the stored
//! refresh token is exchanged for a new pair, persisted, and the request is
//! retried once.

use oauth2::RefreshToken;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{
    model::{guild::PartialGuildDto, user::DiscordUserDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::User,
        service::auth::{token_pair, DiscordAuthService, DISCORD_API_URL},
    },
};

impl<'a> DiscordAuthService<'a> {
    /// Fetches the user's Discord profile.
    pub async fn current_user(&self, user: &User) -> Result<DiscordUserDto, AppError> {
        self.get_as_user(user, "/users/@me").await
    }

    /// Fetches the guilds the user is a member of.
    pub async fn user_guilds(&self, user: &User) -> Result<Vec<PartialGuildDto>, AppError> {
        self.get_as_user(user, "/users/@me/guilds").await
    }

    /// Exchanges the user's refresh token for a new token pair and stores it.
    ///
    /// # Returns
    /// - `Ok(User)` - User with the new access token
    /// - `Err(AuthError::MissingRefreshToken)` - Nothing to refresh with
    /// - `Err(AuthError::TokenExchange)` - Discord rejected the refresh token
    pub async fn refresh(&self, user: &User) -> Result<User, AppError> {
        let Some(refresh_token) = user.refresh_token.clone() else {
            return Err(AuthError::MissingRefreshToken(user.discord_id).into());
        };

        let token = self
            .oauth_client
            .exchange_refresh_token(&RefreshToken::new(refresh_token))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        tracing::debug!("Refreshed access token of user {}", user.discord_id);

        UserRepository::new(self.db)
            .update_tokens(user.discord_id, token_pair(&token))
            .await?
            .ok_or_else(|| AuthError::UserNotInDatabase(user.discord_id).into())
    }

    async fn get_as_user<T: DeserializeOwned>(&self, user: &User, path: &str) -> Result<T, AppError> {
        let response = self.send(&user.access_token, path).await?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            let refreshed = self.refresh(user).await?;
            self.send(&refreshed.access_token, path).await?
        } else {
            response
        };

        Ok(response.error_for_status()?.json::<T>().await?)
    }

    async fn send(&self, access_token: &str, path: &str) -> Result<reqwest::Response, AppError> {
        Ok(self
            .http_client
            .get(format!("{}{}", DISCORD_API_URL, path))
            .bearer_auth(access_token)
            .send()
            .await?)
    }
}
