//! Helpers for classifying Discord REST failures.

use serenity::http::HttpError;

/// Whether Discord answered the request with 404.
///
/// Unknown channel, unknown member and unknown guild all come back this way.
pub fn is_not_found(err: &serenity::Error) -> bool {
    status_code(err) == Some(404)
}

fn status_code(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}
