//! # crumbs-core: Pure Logic for the Sweet Crumbs Storefront
//!
//! Everything the storefront decides without touching the network lives here:
//! the view records pages render, the mapping from raw CMS shapes into those
//! records, the menu's category filter, the featured-product carousel state
//! machine, contact form validation and the SEO/sitemap builders.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sweet Crumbs Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (axum + maud)                   │   │
//! │  │   home ─ menu ─ blog ─ about ─ contact ─ sitemap ─ live/ws      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                crumbs-cms (GraphQL over HTTP)                   │   │
//! │  │        ContentFetcher ─► tri-state results + fallback           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crumbs-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  mapping  │  │  catalog  │  │ carousel  │  │   │
//! │  │   │  Product  │  │ Raw* ──►  │  │  filter   │  │ Idle/Auto │  │   │
//! │  │   │   Post    │  │  records  │  │  options  │  │ /Paused   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │validation │  │    seo    │  │  sitemap  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - View records (Product, Post, Page, HomepageContent)
//! - [`money`] - Integer-cent prices
//! - [`error`] - Domain error types
//! - [`mapping`] - Raw CMS response shapes and their mappers
//! - [`catalog`] - Category filter and option list for the menu
//! - [`carousel`] - Featured-product carousel state machine
//! - [`validation`] - Contact form validation
//! - [`fallback`] - Static substitute content used when the CMS is unavailable
//! - [`seo`] - Page metadata and JSON-LD schemas
//! - [`sitemap`] - `sitemap.xml` entries and rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use crumbs_core::carousel::Carousel;
//! use crumbs_core::fallback::FallbackContent;
//!
//! let fallback = FallbackContent::bakery();
//! let mut carousel = Carousel::featured(fallback.products.clone());
//!
//! carousel.next();
//! assert_eq!(carousel.index(), Some(1));
//! assert!(!carousel.is_auto_playing());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod carousel;
pub mod catalog;
pub mod error;
pub mod fallback;
pub mod mapping;
pub mod money;
pub mod seo;
pub mod sitemap;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Public name of the bakery, used in titles, schemas and the footer.
pub const SITE_NAME: &str = "Sweet Crumbs";

/// How many products the home page carousel features.
pub const FEATURED_LIMIT: usize = 6;

/// Minimum length of a contact message after trimming.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Maximum characters kept when a description is derived from post content.
pub const DESCRIPTION_LIMIT: usize = 150;
