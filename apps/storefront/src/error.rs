//! Error types for the storefront.
//!
//! Page handlers turn CMS trouble into fallback content, so the variants
//! here are mostly startup failures plus the few request errors that reach
//! the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crumbs_cms::CmsError;
use tracing::error;

use crate::config::ConfigError;

/// Storefront errors.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type SiteResult<T> = Result<T, SiteError>;

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::NotFound(_) => StatusCode::NOT_FOUND,
            SiteError::Cms(_) => StatusCode::BAD_GATEWAY,
            SiteError::Config(_) | SiteError::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for SiteError {
    fn from(err: reqwest::Error) -> Self {
        SiteError::HttpClient(err.to_string())
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        // Server-side details stay in the log.
        let body = if status.is_server_error() {
            "Something went wrong. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SiteError::NotFound("post".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SiteError::Cms(CmsError::Timeout).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let response = SiteError::HttpClient("tls handshake".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = SiteError::NotFound("/nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
