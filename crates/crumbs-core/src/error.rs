//! # Error Types
//!
//! Domain-specific error types for crumbs-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crumbs-core errors (this file)                                        │
//! │  ├── CoreError        - Contract violations (carousel index, ...)      │
//! │  └── ValidationError  - Contact form field failures                    │
//! │                                                                         │
//! │  crumbs-cms errors (separate crate)                                    │
//! │  └── CmsError         - Transport / GraphQL / decode failures          │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── SiteError        - What the browser sees (status + page)          │
//! │                                                                         │
//! │  Flow: ValidationError → field message on the form                     │
//! │        CmsError        → fallback content or error state (logged)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Contract violations detected by the pure logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `go_to` was asked for a slide that does not exist.
    ///
    /// The carousel rejects the request and keeps its current state.
    #[error("Slide {index} is out of range for a carousel of {len} items")]
    SlideOutOfRange { index: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// The contact form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => write!(f, "Name"),
            FormField::Email => write!(f, "Email"),
            FormField::Message => write!(f, "Message"),
        }
    }
}

/// Input validation errors.
///
/// The `Display` output is the exact message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: FormField },

    /// Field value is too short once trimmed.
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: FormField, min: usize },

    /// The email does not look like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl ValidationError {
    /// The field this error belongs to.
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::Required { field } | ValidationError::TooShort { field, .. } => {
                *field
            }
            ValidationError::InvalidEmail => FormField::Email,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::SlideOutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "Slide 7 is out of range for a carousel of 3 items"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: FormField::Name,
        };
        assert_eq!(err.to_string(), "Name is required");

        let err = ValidationError::TooShort {
            field: FormField::Message,
            min: 10,
        };
        assert_eq!(err.to_string(), "Message must be at least 10 characters long");

        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_validation_error_field() {
        assert_eq!(ValidationError::InvalidEmail.field(), FormField::Email);
        let err = ValidationError::Required {
            field: FormField::Message,
        };
        assert_eq!(err.field(), FormField::Message);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidEmail.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
