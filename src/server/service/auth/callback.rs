use oauth2::{AuthorizationCode, TokenResponse};

use crate::{
    model::user::DiscordUserDto,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::{UpsertUserParam, User},
        service::auth::{token_pair, DiscordAuthService, DISCORD_API_URL},
    },
};

impl<'a> DiscordAuthService<'a> {
    /// Completes a login.
    ///
    /// Exchanges the authorization code, fetches the Discord profile and
    /// stores the user with the new token pair.
    ///
    /// # Returns
    /// - `Ok((User, DiscordUserDto))` - Stored user and their Discord profile
    /// - `Err(AuthError::TokenExchange)` - Discord rejected the code
    /// - `Err(AppError::ReqwestErr)` - Profile request failed
    pub async fn callback(
        &self,
        authorization_code: String,
    ) -> Result<(User, DiscordUserDto), AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let profile = self
            .http_client
            .get(format!("{}/users/@me", DISCORD_API_URL))
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUserDto>()
            .await?;

        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                discord_id: profile.id,
                name: profile.username.clone(),
                tokens: token_pair(&token),
            })
            .await?;

        tracing::info!("User {} ({}) logged in", user.name, user.discord_id);

        Ok((user, profile))
    }
}
