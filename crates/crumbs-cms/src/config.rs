//! # CMS Configuration
//!
//! Where the CMS lives and how to authenticate against it. Embedded as the
//! `[cms]` table of the storefront's config file.
//!
//! ```toml
//! [cms]
//! endpoint = "https://cms.sweetcrumbs.com/graphql"
//! auth_token = "..."   # optional, sent as a bearer token
//! ```
//!
//! ## Configured or Not
//! ```text
//!   endpoint absent            ─┐
//!   endpoint not http(s)://... ─┴──► unconfigured: fallback content, no requests
//!   endpoint = http(s)://...    ───► configured:   one GraphQL POST per fetch
//! ```
//!
//! Environment overrides: `CRUMBS_CMS_URL`, `CRUMBS_CMS_TOKEN`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{CmsError, CmsResult};

/// CMS connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsConfig {
    /// GraphQL endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token sent in the `Authorization` header.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl CmsConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        CmsConfig {
            endpoint: Some(endpoint.into()),
            auth_token: None,
        }
    }

    /// The endpoint as a parsed http(s) URL.
    ///
    /// ## Errors
    /// - `NotConfigured` when no endpoint is set
    /// - `InvalidUrl` when it does not parse or is not http(s)
    pub fn endpoint_url(&self) -> CmsResult<Url> {
        let raw = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(CmsError::NotConfigured)?;

        let url = Url::parse(raw)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CmsError::InvalidUrl(format!(
                "CMS endpoint must use http:// or https://, got: {}",
                other
            ))),
        }
    }

    /// Whether content should be requested from the CMS at all.
    pub fn is_configured(&self) -> bool {
        self.endpoint_url().is_ok()
    }

    /// Token with surrounding whitespace removed; blank counts as absent.
    pub fn bearer_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Applies `CRUMBS_CMS_URL` and `CRUMBS_CMS_TOKEN`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CRUMBS_CMS_URL") {
            debug!(url = %url, "Overriding CMS endpoint from environment");
            self.endpoint = Some(url);
        }

        if let Ok(token) = std::env::var("CRUMBS_CMS_TOKEN") {
            debug!("Overriding CMS token from environment");
            self.auth_token = Some(token);
        }
    }
}
