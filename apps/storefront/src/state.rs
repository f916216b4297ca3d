//! Shared application state.

use std::sync::Arc;

use crumbs_cms::ContentFetcher;
use crumbs_core::carousel::CarouselTimings;
use crumbs_core::fallback::FallbackContent;
use crumbs_core::seo::BusinessProfile;
use tracing::info;

use crate::config::SiteConfig;
use crate::contact::{ContactGateway, ContactInbox, HttpContactGateway, InboxGateway, LogInbox};
use crate::error::SiteResult;

/// Everything a handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: SiteConfig,
    fetcher: ContentFetcher,
    gateway: Arc<dyn ContactGateway>,
    inbox: Arc<dyn ContactInbox>,
    business: BusinessProfile,
}

impl AppState {
    /// Wires the production collaborators from `config`.
    ///
    /// `fallback` is what every page shows while the CMS is unconfigured
    /// or failing.
    pub fn from_config(config: SiteConfig, fallback: FallbackContent) -> SiteResult<Self> {
        let fetcher = ContentFetcher::from_config(&config.cms, fallback)?;

        let inbox: Arc<dyn ContactInbox> = Arc::new(LogInbox);
        let gateway: Arc<dyn ContactGateway> = match config.contact_endpoint()? {
            Some(endpoint) => {
                info!(%endpoint, "Contact form posts to external endpoint");
                Arc::new(HttpContactGateway::new(endpoint)?)
            }
            None => {
                info!("Contact form delivers to the local inbox");
                Arc::new(InboxGateway::new(inbox.clone()))
            }
        };

        Ok(AppState::new(config, fetcher, gateway, inbox))
    }

    /// Assembles state from explicit parts.
    pub fn new(
        config: SiteConfig,
        fetcher: ContentFetcher,
        gateway: Arc<dyn ContactGateway>,
        inbox: Arc<dyn ContactInbox>,
    ) -> Self {
        AppState {
            inner: Arc::new(Inner {
                config,
                fetcher,
                gateway,
                inbox,
                business: BusinessProfile::sweet_crumbs(),
            }),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.inner.fetcher
    }

    pub fn gateway(&self) -> &dyn ContactGateway {
        self.inner.gateway.as_ref()
    }

    pub fn inbox(&self) -> &dyn ContactInbox {
        self.inner.inbox.as_ref()
    }

    pub fn business(&self) -> &BusinessProfile {
        &self.inner.business
    }

    pub fn base_url(&self) -> &str {
        self.inner.config.base_url()
    }

    pub fn carousel_timings(&self) -> CarouselTimings {
        self.inner.config.carousel.timings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let state = AppState::from_config(SiteConfig::default(), FallbackContent::bakery()).unwrap();
        assert!(!state.fetcher().is_configured());
        assert_eq!(state.base_url(), "https://sweetcrumbs.com");
        assert_eq!(state.business().telephone, "(555) 123-4567");
    }

    #[test]
    fn test_bad_contact_endpoint_fails() {
        let mut config = SiteConfig::default();
        config.contact.endpoint = Some("ftp://forms".into());
        assert!(AppState::from_config(config, FallbackContent::empty()).is_err());
    }
}
