//! Module error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the redirect pipeline.
///
/// Lookup misses (no alias, no route, policy refusal, unknown term) are not
/// errors; rules decline with `Ok(None)` and evaluation continues.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("host service failure")]
    Host(#[from] anyhow::Error),

    #[error("host service not configured: {0}")]
    MissingService(&'static str),
}

impl IntoResponse for RedirectError {
    fn into_response(self) -> Response {
        let status = match &self {
            RedirectError::Host(_) | RedirectError::MissingService(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Keep response bodies vague; the detail goes to the log.
        let body = match &self {
            RedirectError::Host(e) => {
                tracing::error!(error = %e, "host service failure during redirect check");
                "internal server error".to_string()
            }
            RedirectError::MissingService(service) => {
                tracing::error!(service = %service, "host service not configured");
                "internal server error".to_string()
            }
        };

        (status, body).into_response()
    }
}

/// Result type alias using RedirectError.
pub type RedirectResult<T> = Result<T, RedirectError>;

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn host_failures_map_to_internal_error() {
        let response = RedirectError::Host(anyhow::anyhow!("backend offline")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_service_maps_to_internal_error() {
        let response = RedirectError::MissingService("alias resolver").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_service_names_the_service() {
        let error = RedirectError::MissingService("route matcher");
        assert_eq!(
            error.to_string(),
            "host service not configured: route matcher"
        );
    }
}
