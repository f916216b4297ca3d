//! # Storefront Configuration
//!
//! Configuration for the web server, the site metadata, the CMS, the
//! carousel timers and the contact endpoint.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CRUMBS_PORT=8080                                                   │
//! │     CRUMBS_CMS_URL=https://cms.sweetcrumbs.com/graphql                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path> or CRUMBS_CONFIG=<path>                            │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.sweetcrumbs.storefront/...       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:3000, no CMS, 4s / 5s carousel                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 3000
//!
//! [site]
//! base_url = "https://sweetcrumbs.com"
//! analytics_id = "G-XXXX"      # only emitted when production = true
//! site_verification = "..."
//! production = false
//!
//! [cms]
//! endpoint = "https://cms.sweetcrumbs.com/graphql"
//! auth_token = "..."
//!
//! [carousel]
//! autoplay_interval_ms = 4000
//! resume_delay_ms = 5000
//!
//! [contact]
//! endpoint = "https://forms.sweetcrumbs.com/api/contact"   # unset: handled in-process
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crumbs_cms::CmsConfig;
use crumbs_core::carousel::{CarouselTimings, DEFAULT_AUTOPLAY_INTERVAL, DEFAULT_RESUME_DELAY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default public URL of the site.
pub const DEFAULT_BASE_URL: &str = "https://sweetcrumbs.com";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Config Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid URL for {key}: {reason}")]
    InvalidUrl { key: &'static str, reason: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// `[site]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Public URL used for canonical links, Open Graph and the sitemap.
    pub base_url: String,
    /// Google Analytics measurement id.
    pub analytics_id: Option<String>,
    /// Google site verification token.
    pub site_verification: Option<String>,
    /// Analytics only load in production.
    pub production: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            analytics_id: None,
            site_verification: None,
            production: false,
        }
    }
}

impl SiteSettings {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The analytics id, if analytics should be rendered at all.
    pub fn analytics(&self) -> Option<&str> {
        if !self.production {
            return None;
        }
        non_blank(self.analytics_id.as_deref())
    }

    pub fn verification(&self) -> Option<&str> {
        non_blank(self.site_verification.as_deref())
    }
}

/// `[carousel]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_interval_ms: u64,
    pub resume_delay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig {
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL.as_millis() as u64,
            resume_delay_ms: DEFAULT_RESUME_DELAY.as_millis() as u64,
        }
    }
}

impl CarouselConfig {
    pub fn timings(&self) -> CarouselTimings {
        CarouselTimings::new(
            Duration::from_millis(self.autoplay_interval_ms),
            Duration::from_millis(self.resume_delay_ms),
        )
    }
}

/// `[contact]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Where the contact form posts; unset means this app's own inbox.
    pub endpoint: Option<String>,
}

// =============================================================================
// Site Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub site: SiteSettings,
    pub cms: CmsConfig,
    pub carousel: CarouselConfig,
    pub contact: ContactConfig,
}

impl SiteConfig {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads defaults, then the config file (if present), then environment
    /// overrides, and validates the result.
    ///
    /// `config_path` falls back to `CRUMBS_CONFIG`, then to the platform
    /// config directory.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = SiteConfig::default();

        let path = config_path
            .or_else(|| std::env::var_os("CRUMBS_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a config file without env overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sweetcrumbs", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Applies `CRUMBS_*` environment variables.
    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(addr) = std::env::var("CRUMBS_BIND_ADDR") {
            debug!(bind_addr = %addr, "Overriding bind address from environment");
            self.server.bind_addr = addr;
        }

        if let Some(port) = env_parse::<u16>("CRUMBS_PORT")? {
            debug!(port, "Overriding port from environment");
            self.server.port = port;
        }

        if let Ok(url) = std::env::var("CRUMBS_SITE_URL") {
            debug!(base_url = %url, "Overriding site URL from environment");
            self.site.base_url = url;
        }

        if let Ok(id) = std::env::var("CRUMBS_ANALYTICS_ID") {
            self.site.analytics_id = Some(id);
        }

        if let Ok(token) = std::env::var("CRUMBS_SITE_VERIFICATION") {
            self.site.site_verification = Some(token);
        }

        if let Some(production) = env_parse::<bool>("CRUMBS_PRODUCTION")? {
            debug!(production, "Overriding production flag from environment");
            self.site.production = production;
        }

        if let Ok(url) = std::env::var("CRUMBS_CONTACT_URL") {
            debug!(endpoint = %url, "Overriding contact endpoint from environment");
            self.contact.endpoint = Some(url);
        }

        if let Some(ms) = env_parse::<u64>("CRUMBS_AUTOPLAY_MS")? {
            self.carousel.autoplay_interval_ms = ms;
        }

        if let Some(ms) = env_parse::<u64>("CRUMBS_RESUME_MS")? {
            self.carousel.resume_delay_ms = ms;
        }

        self.cms.apply_env_overrides();
        Ok(())
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validates the configuration.
    ///
    /// An invalid CMS endpoint is not an error: the CMS is simply treated
    /// as unconfigured.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port",
                reason: "must be greater than 0".into(),
            });
        }

        parse_http_url("site.base_url", &self.site.base_url)?;

        if let Some(endpoint) = non_blank(self.contact.endpoint.as_deref()) {
            parse_http_url("contact.endpoint", endpoint)?;
        }

        if self.carousel.autoplay_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "carousel.autoplay_interval_ms",
                reason: "must be greater than 0".into(),
            });
        }

        if self.carousel.resume_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "carousel.resume_delay_ms",
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// External endpoint the contact form posts to; `None` delivers to
    /// this app's own inbox in-process.
    pub fn contact_endpoint(&self) -> ConfigResult<Option<Url>> {
        non_blank(self.contact.endpoint.as_deref())
            .map(|endpoint| parse_http_url("contact.endpoint", endpoint))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        self.site.base_url()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_http_url(key: &'static str, raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            key,
            reason: format!("must use http:// or https://, got: {}", other),
        }),
    }
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> ConfigResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
