//! # storefront: The Sweet Crumbs Web Server
//!
//! Server-rendered bakery site backed by a headless CMS, with a live
//! featured-product carousel driven from the server over WebSocket.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Browser ──► axum Router (routes.rs)                                    │
//! │                 │                                                       │
//! │                 ├── pages ──► ContentFetcher ──► CMS or fallback        │
//! │                 │               │                                       │
//! │                 │               ▼                                       │
//! │                 │            render/* (maud) ──► HTML                   │
//! │                 │                                                       │
//! │                 ├── contact ──► validate ──► ContactGateway / Inbox     │
//! │                 │                                                       │
//! │                 └── /live/carousel ──► session ──► CarouselController   │
//! │                                          ▲   │     (interval + resume)  │
//! │                                  commands│   ▼ state frames             │
//! │                                        Browser                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `SiteConfig`: TOML file + environment overrides
//! - [`state`] - `AppState` shared by every handler
//! - [`routes`] - Router and page handlers
//! - [`render`] - maud page templates
//! - [`live`] - Carousel controller actor and its WebSocket session
//! - [`contact`] - Contact gateways and inbox
//! - [`assets`] - Bundled CSS, script and images
//! - [`error`] - `SiteError`

pub mod assets;
pub mod config;
pub mod contact;
pub mod error;
pub mod live;
pub mod render;
pub mod routes;
pub mod state;

pub use config::{ConfigError, SiteConfig};
pub use error::{SiteError, SiteResult};
pub use routes::build_router;
pub use state::AppState;
