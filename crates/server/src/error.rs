//! HTTP error responses for the snipbox server.
//!
//! Routine misses become a plain 404. Everything else is logged here, the
//! only place request failures are logged, and answered with a bare 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snipbox_core::Error;

/// Errors a request handler can end with.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Malformed or out-of-range identifier, or an unknown path.
    #[error("NOT_FOUND")]
    NotFound,

    /// Failure from the snippet store or template cache.
    #[error(transparent)]
    Core(#[from] Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound | WebError::Core(Error::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Not Found").into_response()
            }
            WebError::Core(err) => {
                tracing::error!(error = %err, source = ?std::error::Error::source(&err), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_statuses() {
        assert_eq!(WebError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(WebError::Core(Error::NotFound(3)).into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_server_error_statuses() {
        let unknown = WebError::Core(Error::UnknownPage("nope.page.html".into()));
        assert_eq!(unknown.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let expiry = WebError::from(Error::InvalidExpiry("soon".into()));
        assert_eq!(expiry.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
