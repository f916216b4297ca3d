//! # GraphQL Transport
//!
//! Sends one GraphQL document and returns the `data` member of the response.
//!
//! ## Request / Response
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST {endpoint}                                                        │
//! │  Authorization: Bearer {token}        (only when a token is set)        │
//! │  Content-Type: application/json                                         │
//! │  { "query": "...", "variables": { "first": 6 } }                        │
//! │                                                                         │
//! │  ◄── 200 { "data": {...} }                     → Ok(data)               │
//! │  ◄── 200 { "errors": [{ "message": ".." }] }   → Err(GraphQl)           │
//! │  ◄── 5xx / 4xx                                 → Err(HttpStatus)        │
//! │  ◄── connection refused / reset                → Err(RequestFailed)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`GraphQlTransport`] is the seam: [`HttpTransport`] in production, an
//! in-memory stub in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::CmsConfig;
use crate::error::{CmsError, CmsResult};

// =============================================================================
// Wire Shapes
// =============================================================================

/// Request body.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// One entry of the response `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorItem {
    pub message: String,
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorItem>>,
}

impl GraphQlResponse {
    /// Data wins only when there are no errors.
    pub fn into_data(self, what: &'static str) -> CmsResult<Value> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CmsError::GraphQl(joined));
        }
        match self.data {
            Some(Value::Null) | None => Err(CmsError::MissingData(what)),
            Some(data) => Ok(data),
        }
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Executes a GraphQL document.
///
/// `operation` names the query for logs and error messages.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> CmsResult<Value>;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// GraphQL over HTTP POST with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// Builds a transport for a configured CMS.
    ///
    /// ## Errors
    /// `NotConfigured` / `InvalidUrl` from [`CmsConfig::endpoint_url`].
    pub fn new(config: &CmsConfig) -> CmsResult<Self> {
        let endpoint = config.endpoint_url()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("sweet-crumbs-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpTransport {
            client,
            endpoint,
            auth_token: config.bearer_token().map(str::to_string),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> CmsResult<Value> {
        debug!(operation, endpoint = %self.endpoint, "Sending GraphQL request");

        let mut request = self.client.post(self.endpoint.clone()).json(&GraphQlRequest {
            query,
            variables: &variables,
        });
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: GraphQlResponse = serde_json::from_slice(&body)?;
        envelope.into_data(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> GraphQlResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_data_returned() {
        let data = envelope(json!({ "data": { "posts": { "nodes": [] } } }))
            .into_data("posts")
            .unwrap();
        assert_eq!(data["posts"]["nodes"], json!([]));
    }

    #[test]
    fn test_errors_win_over_data() {
        let err = envelope(json!({
            "data": { "posts": null },
            "errors": [{ "message": "Cannot query field" }, { "message": "second" }]
        }))
        .into_data("posts")
        .unwrap_err();
        assert_eq!(err.to_string(), "GraphQL error: Cannot query field; second");
    }

    #[test]
    fn test_empty_errors_array_ignored() {
        let data = envelope(json!({ "data": { "ok": true }, "errors": [] }))
            .into_data("ok")
            .unwrap();
        assert_eq!(data["ok"], true);
    }

    #[test]
    fn test_missing_data() {
        let err = envelope(json!({ "data": null })).into_data("pageBy").unwrap_err();
        assert!(matches!(err, CmsError::MissingData("pageBy")));
    }

    #[test]
    fn test_request_body_shape() {
        let variables = json!({ "first": 6 });
        let body = serde_json::to_value(GraphQlRequest {
            query: "query { x }",
            variables: &variables,
        })
        .unwrap();
        assert_eq!(body, json!({ "query": "query { x }", "variables": { "first": 6 } }));
    }

    #[test]
    fn test_http_transport_requires_endpoint() {
        assert!(HttpTransport::new(&CmsConfig::default()).is_err());

        let transport = HttpTransport::new(&CmsConfig::new("https://cms.test/graphql")).unwrap();
        assert_eq!(transport.endpoint().as_str(), "https://cms.test/graphql");
    }
}
