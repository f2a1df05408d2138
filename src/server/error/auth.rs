use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID stored in the session and no bearer token supplied.
    #[error("User not found in session")]
    UserNotInSession,

    /// Session or token names a user that no longer exists.
    #[error("User {0} not found in database")]
    UserNotInDatabase(u64),

    /// The CSRF state in the OAuth callback does not match the session value.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Discord rejected the authorization code or refresh token.
    #[error("Failed to exchange OAuth token: {0}")]
    TokenExchange(String),

    /// The user has no refresh token on file, so an expired access token cannot be renewed.
    #[error("User {0} has no refresh token")]
    MissingRefreshToken(u64),

    /// `Authorization: Bearer` header carried a token that is not on file.
    #[error("Invalid API token")]
    InvalidApiToken,

    /// User is authenticated but not allowed to act on the resource.
    ///
    /// # Fields
    /// - Discord ID of the user
    /// - Client-facing reason
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(u64, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `MissingRefreshToken` → 401 "Not logged in"
/// - `InvalidApiToken` → 401 with `WWW-Authenticate: Bearer`
/// - `UserNotInDatabase` → 404 "User not found"
/// - `CsrfValidationFailed` / `TokenExchange` → 400 "There was an issue logging you in"
/// - `AccessDenied` → 403 with the reason
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::MissingRefreshToken(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Not logged in".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidApiToken => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(ErrorDto {
                    error: "Invalid API token.".to_string(),
                }),
            )
                .into_response(),
            Self::UserNotInDatabase(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: "User not found".to_string(),
                }),
            )
                .into_response(),
            Self::CsrfValidationFailed | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "There was an issue logging you in, please try again.".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, reason) => {
                (StatusCode::FORBIDDEN, Json(ErrorDto { error: reason })).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: 401 with a Bearer challenge
    #[test]
    fn invalid_token_sets_challenge_header() {
        let response = AuthError::InvalidApiToken.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    /// Expected: 403 for denied access
    #[test]
    fn access_denied_is_forbidden() {
        let response =
            AuthError::AccessDenied(1, "Insufficient permissions.".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
