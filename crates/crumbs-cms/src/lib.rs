//! # crumbs-cms: Headless CMS Access for Sweet Crumbs
//!
//! Fetches storefront content from a GraphQL CMS and hands back view records
//! from `crumbs-core`.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Content Fetch Pipeline                           │
//! │                                                                         │
//! │   page handler                                                          │
//! │        │  fetcher.products().await                                      │
//! │        ▼                                                                │
//! │  ┌──────────────────┐   unconfigured   ┌──────────────────────────┐    │
//! │  │  ContentFetcher  │─────────────────►│  FallbackContent         │    │
//! │  │                  │                  │  (injected at startup)   │    │
//! │  └────────┬─────────┘                  └──────────────────────────┘    │
//! │           │ configured                              ▲                   │
//! │           ▼                                         │ on error          │
//! │  ┌──────────────────┐   POST {query,vars}   ┌───────┴──────────────┐   │
//! │  │ GraphQlTransport │──────────────────────►│        CMS           │   │
//! │  │ (HttpTransport)  │◄──────────────────────│  /graphql endpoint   │   │
//! │  └────────┬─────────┘    { data | errors }  └──────────────────────┘   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │   crumbs_core::mapping::map_*  ──►  Fetched::{Records, Empty, Error}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Endpoint and token (`[cms]` table, env overrides)
//! - [`error`] - CMS error types
//! - [`client`] - GraphQL transport trait and its reqwest implementation
//! - [`queries`] - Query documents and response data shapes
//! - [`fetcher`] - `ContentFetcher` and the tri-state `Fetched` result
//!
//! Fetches are one-shot per page load: no retry, no timeout beyond the
//! HTTP client's default, no request deduplication.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod queries;

pub use client::{GraphQlTransport, HttpTransport};
pub use config::CmsConfig;
pub use error::{CmsError, CmsResult};
pub use fetcher::{ContentFetcher, Fetched, POSTS_ERROR, PRODUCTS_ERROR};
