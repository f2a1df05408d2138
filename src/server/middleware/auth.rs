//! Authentication guard for API handlers.
//!
//! A request is authenticated either by the session cookie set during the
//! OAuth callback or by an `Authorization: Bearer <token>` header carrying a
//! personal API token. A bearer header, when present, always wins over the
//! session so a bad token is reported instead of silently falling back.

use axum::http::{header, HeaderMap};
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{api_token::ApiTokenRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the user making the request.
    ///
    /// # Arguments
    /// - `headers` - Request headers, checked for a bearer token
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user
    /// - `Err(AuthError::InvalidApiToken)` - Bearer token is not on file
    /// - `Err(AuthError::UserNotInSession)` - Neither a token nor a logged-in session
    /// - `Err(AuthError::UserNotInDatabase)` - Credential names a user that no longer exists
    pub async fn require(&self, headers: &HeaderMap) -> Result<User, AppError> {
        let user_id = match bearer_token(headers) {
            Some(token) => {
                ApiTokenRepository::new(self.db)
                    .find_by_token(token)
                    .await?
                    .ok_or(AuthError::InvalidApiToken)?
                    .user_discord_id
            }
            None => AuthSession::new(self.session)
                .get_user_id()
                .await?
                .ok_or(AuthError::UserNotInSession)?,
        };

        let Some(user) = UserRepository::new(self.db)
            .find_by_discord_id(user_id)
            .await?
        else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        Ok(user)
    }
}

/// Extracts the token from an `Authorization: Bearer` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
