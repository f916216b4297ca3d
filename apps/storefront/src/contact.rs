//! # Contact Flow
//!
//! Where validated contact messages go.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /contact (form)                                                   │
//! │       │ validate_contact_form ──✗──► re-render with field errors        │
//! │       ▼ ✓                                                               │
//! │  ContactGateway::submit                                                 │
//! │       │                                                                 │
//! │       ├── HttpContactGateway ── POST {name,email,message} ──► endpoint  │
//! │       │        2xx {message}     → Sent                                 │
//! │       │        4xx/5xx {error}   → Rejected                             │
//! │       │        unreachable / bad → Failed                               │
//! │       │                                                                 │
//! │       └── InboxGateway ──► ContactInbox (same path as /api/contact)     │
//! │                                                                         │
//! │  POST /api/contact (json) ──► validate ──► ContactInbox::deliver        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crumbs_core::validation::ContactForm;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::error::SiteResult;

/// Banner shown when the endpoint accepted the message without saying so.
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We'll get back to you soon.";

/// Banner shown when the endpoint refused the message without saying why.
pub const REJECTED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Banner shown when the endpoint could not be reached.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";

// =============================================================================
// Wire Shape
// =============================================================================

/// Body answered by a contact endpoint: `{message}` on success,
/// `{error}` on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactReply {
    pub fn accepted(message: impl Into<String>) -> Self {
        ContactReply {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        ContactReply {
            message: None,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// Submit Outcome
// =============================================================================

/// What the contact page shows after a valid submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted; the form is cleared.
    Sent(String),
    /// Refused by the endpoint; the form keeps its data.
    Rejected(String),
    /// Never reached the endpoint; the form keeps its data.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Sent(_))
    }

    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::Sent(m) | SubmitOutcome::Rejected(m) | SubmitOutcome::Failed(m) => m,
        }
    }

    /// Maps an endpoint reply; missing texts fall back to the defaults.
    pub fn from_reply(accepted: bool, reply: ContactReply) -> Self {
        if accepted {
            SubmitOutcome::Sent(non_blank(reply.message).unwrap_or_else(|| SUCCESS_MESSAGE.into()))
        } else {
            SubmitOutcome::Rejected(non_blank(reply.error).unwrap_or_else(|| REJECTED_MESSAGE.into()))
        }
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

// =============================================================================
// Inbox
// =============================================================================

/// Proof that a message was taken in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
}

impl ContactReceipt {
    pub fn new() -> Self {
        ContactReceipt {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }
}

impl Default for ContactReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Final destination of validated contact messages.
#[async_trait]
pub trait ContactInbox: Send + Sync {
    async fn deliver(&self, form: &ContactForm) -> SiteResult<ContactReceipt>;
}

/// Records each message as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogInbox;

#[async_trait]
impl ContactInbox for LogInbox {
    async fn deliver(&self, form: &ContactForm) -> SiteResult<ContactReceipt> {
        let receipt = ContactReceipt::new();
        info!(
            reference = %receipt.reference,
            name = %form.name.trim(),
            email = %form.email.trim(),
            message_chars = form.message.trim().chars().count(),
            "Contact message received"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Gateways
// =============================================================================

/// Sends a validated contact form somewhere and reports the outcome.
#[async_trait]
pub trait ContactGateway: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> SubmitOutcome;
}

/// POSTs the form as JSON to an external contact endpoint.
#[derive(Debug, Clone)]
pub struct HttpContactGateway {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContactGateway {
    pub fn new(endpoint: Url) -> SiteResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sweet-crumbs-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpContactGateway { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactGateway for HttpContactGateway {
    async fn submit(&self, form: &ContactForm) -> SubmitOutcome {
        debug!(endpoint = %self.endpoint, "Posting contact form");

        let response = match self.client.post(self.endpoint.clone()).json(form).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "Contact endpoint unreachable");
                return SubmitOutcome::Failed(TRANSPORT_FAILURE_MESSAGE.into());
            }
        };

        let status = response.status();
        match response.json::<ContactReply>().await {
            Ok(reply) => {
                if !status.is_success() {
                    warn!(status = status.as_u16(), "Contact endpoint refused message");
                }
                SubmitOutcome::from_reply(status.is_success(), reply)
            }
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Unreadable contact endpoint reply");
                SubmitOutcome::Failed(TRANSPORT_FAILURE_MESSAGE.into())
            }
        }
    }
}

/// Hands the form straight to a [`ContactInbox`].
#[derive(Clone)]
pub struct InboxGateway {
    inbox: Arc<dyn ContactInbox>,
}

impl InboxGateway {
    pub fn new(inbox: Arc<dyn ContactInbox>) -> Self {
        InboxGateway { inbox }
    }
}

#[async_trait]
impl ContactGateway for InboxGateway {
    async fn submit(&self, form: &ContactForm) -> SubmitOutcome {
        match self.inbox.deliver(form).await {
            Ok(_) => SubmitOutcome::Sent(SUCCESS_MESSAGE.into()),
            Err(e) => {
                warn!(error = %e, "Contact inbox refused message");
                SubmitOutcome::Rejected(REJECTED_MESSAGE.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
