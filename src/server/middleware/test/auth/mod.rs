use axum::http::{header, HeaderMap, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{bearer_token, AuthGuard},
        session::{AuthSession, CsrfSession},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod bearer;
mod csrf;
mod session;

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
