//! # Validation Module
//!
//! Contact form validation for the Sweet Crumbs storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: POST /contact (HTML form)                                    │
//! │  ├── THIS MODULE: field rules                                          │
//! │  └── Invalid → re-render with field messages, NO network call          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ContactGateway (HTTP POST JSON)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: POST /api/contact                                            │
//! │  └── THIS MODULE again: never trust the caller                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! | Field   | Rule                                             | Message                                        |
//! |---------|--------------------------------------------------|------------------------------------------------|
//! | name    | non-blank                                        | Name is required                               |
//! | email   | non-blank                                        | Email is required                              |
//! | email   | matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`             | Please enter a valid email address             |
//! | message | non-blank                                        | Message is required                            |
//! | message | at least 10 characters once trimmed              | Message must be at least 10 characters long    |
//!
//! ## Usage
//! ```rust
//! use crumbs_core::validation::{validate_contact_form, ContactForm};
//!
//! let form = ContactForm::new("", "x", "short");
//! let errors = validate_contact_form(&form).unwrap_err();
//! assert_eq!(errors.len(), 3);
//!
//! let form = ContactForm::new("Jo", "jo@x.com", "this is a long enough message");
//! assert!(validate_contact_form(&form).is_ok());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FormField, ValidationError};
use crate::MIN_MESSAGE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// =============================================================================
// Contact Form
// =============================================================================

/// The three fields of the contact form, exactly as submitted.
///
/// Also the JSON body sent to (and accepted by) the contact endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ContactForm {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// At most one error per field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub message: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// The error attached to `field`, if any.
    pub fn get(&self, field: FormField) -> Option<&ValidationError> {
        match field {
            FormField::Name => self.name.as_ref(),
            FormField::Email => self.email.as_ref(),
            FormField::Message => self.message.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        [&self.name, &self.email, &self.message]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// First message in form order; the API endpoint reports only this one.
    pub fn first_message(&self) -> Option<String> {
        self.iter().next().map(ToString::to_string)
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the sender's name.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: FormField::Name,
        });
    }
    Ok(())
}

/// Validates the sender's email address.
///
/// The pattern is applied to the value as typed; surrounding whitespace
/// makes an otherwise valid address fail.
///
/// ## Example
/// ```rust
/// use crumbs_core::validation::validate_email;
///
/// assert!(validate_email("hello@sweetcrumbs.com").is_ok());
/// assert!(validate_email("hello@sweetcrumbs").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required {
            field: FormField::Email,
        });
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validates the message body.
///
/// Length is counted in characters after trimming.
pub fn validate_message(message: &str) -> ValidationResult<()> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ValidationError::Required {
            field: FormField::Message,
        });
    }
    if message.chars().count() < MIN_MESSAGE_LEN {
        return Err(ValidationError::TooShort {
            field: FormField::Message,
            min: MIN_MESSAGE_LEN,
        });
    }
    Ok(())
}

/// Validates every field of the form and collects all failures.
///
/// Submission must not happen unless this returns `Ok`.
pub fn validate_contact_form(form: &ContactForm) -> Result<(), FieldErrors> {
    let errors = FieldErrors {
        name: validate_name(&form.name).err(),
        email: validate_email(&form.email).err(),
        message: validate_message(&form.message).err(),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_three_fields_fail() {
        let form = ContactForm::new("", "x", "short");
        let errors = validate_contact_form(&form).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.name.as_ref().unwrap().to_string(), "Name is required");
        assert_eq!(
            errors.email.as_ref().unwrap().to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            errors.message.as_ref().unwrap().to_string(),
            "Message must be at least 10 characters long"
        );
    }

    #[test]
    fn test_valid_form() {
        let form = ContactForm::new("Jo", "jo@x.com", "this is a long enough message");
        assert!(validate_contact_form(&form).is_ok());
    }

    #[test]
    fn test_blank_fields_are_required() {
        let form = ContactForm::new("   ", " ", "\n\t");
        let errors = validate_contact_form(&form).unwrap_err();

        assert_eq!(
            errors.get(FormField::Email).unwrap().to_string(),
            "Email is required"
        );
        assert_eq!(
            errors.get(FormField::Message).unwrap().to_string(),
            "Message is required"
        );
        assert_eq!(errors.first_message().unwrap(), "Name is required");
    }

    #[test]
    fn test_email_pattern() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());

        assert_eq!(validate_email("a@b"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a b@c.d"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@c.d"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email(" a@b.co"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_message_length_counts_trimmed_chars() {
        assert!(validate_message("  123456789  ").is_err());
        assert!(validate_message("  1234567890  ").is_ok());
        // Ten multi-byte characters pass even though bytes > chars
        assert!(validate_message("éééééééééé").is_ok());
    }

    #[test]
    fn test_form_deserializes_with_missing_fields() {
        let form: ContactForm = serde_json::from_str(r#"{"name":"Jo"}"#).unwrap();
        assert_eq!(form.name, "Jo");
        assert!(form.email.is_empty());
    }
}
