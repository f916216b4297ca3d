//! # CMS Error Types
//!
//! Error types for CMS operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CMS Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotConfigured  │  │  RequestFailed  │  │  GraphQl                │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  MissingData            │ │
//! │  │                 │  │  HttpStatus     │  │  DeserializationFailed  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these reach the browser: the fetcher turns every one of them  │
//! │  into fallback content or an error state, and logs it.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for CMS operations.
pub type CmsResult<T> = Result<T, CmsError>;

/// CMS error type covering all possible fetch failures.
#[derive(Debug, Error)]
pub enum CmsError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// No usable endpoint is configured.
    #[error("CMS endpoint not configured")]
    NotConfigured,

    /// The configured endpoint is not a valid http(s) URL.
    #[error("Invalid CMS URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request could not be sent or the body could not be read.
    #[error("CMS request failed: {0}")]
    RequestFailed(String),

    /// The platform timeout elapsed.
    #[error("CMS request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status.
    #[error("CMS responded with HTTP {status}")]
    HttpStatus { status: u16 },

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The response carried GraphQL errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response had neither data nor errors.
    #[error("CMS response has no data for {0}")]
    MissingData(&'static str),

    /// The data did not match the expected shape.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for CmsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CmsError::Timeout
        } else if let Some(status) = err.status() {
            CmsError::HttpStatus {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            CmsError::DeserializationFailed(err.to_string())
        } else {
            CmsError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CmsError {
    fn from(err: serde_json::Error) -> Self {
        CmsError::DeserializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for CmsError {
    fn from(err: url::ParseError) -> Self {
        CmsError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CmsError {
    /// Returns true if a later page load could plausibly succeed.
    ///
    /// Fetches are one-shot; this only decides the log level.
    pub fn is_retryable(&self) -> bool {
        match self {
            CmsError::RequestFailed(_) | CmsError::Timeout => true,
            CmsError::HttpStatus { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(self, CmsError::NotConfigured | CmsError::InvalidUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(CmsError::RequestFailed("connection refused".into()).is_retryable());
        assert!(CmsError::Timeout.is_retryable());
        assert!(CmsError::HttpStatus { status: 502 }.is_retryable());
        assert!(CmsError::HttpStatus { status: 429 }.is_retryable());

        assert!(!CmsError::HttpStatus { status: 404 }.is_retryable());
        assert!(!CmsError::GraphQl("bad field".into()).is_retryable());
        assert!(!CmsError::NotConfigured.is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(CmsError::NotConfigured.is_config_error());
        assert!(CmsError::InvalidUrl("x".into()).is_config_error());
        assert!(!CmsError::Timeout.is_config_error());
    }

    #[test]
    fn test_conversions() {
        let err: CmsError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CmsError::DeserializationFailed(_)));

        let err: CmsError = url::Url::parse("::").unwrap_err().into();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CmsError::HttpStatus { status: 503 }.to_string(),
            "CMS responded with HTTP 503"
        );
        assert_eq!(
            CmsError::MissingData("posts").to_string(),
            "CMS response has no data for posts"
        );
    }
}
