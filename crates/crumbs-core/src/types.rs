//! # View Records
//!
//! The flat, render-ready records every page works with.
//!
//! ## Record Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         View Records                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Post       │   │      Page       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name, slug     │   │  title, slug    │   │  title, slug    │       │
//! │  │  price (Money)  │   │  excerpt (text) │   │  content (HTML) │       │
//! │  │  category       │   │  date, author   │   │  featured_image?│       │
//! │  │  image          │   │  featured_image?│   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌───────────────────────────┐   ┌─────────────────┐                   │
//! │  │     HomepageContent       │   │     Image       │                   │
//! │  │  hero title / subtitle    │   │  url, alt       │                   │
//! │  │  hero image, section title│   └─────────────────┘                   │
//! │  └───────────────────────────┘                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are immutable once mapped. Optional CMS fields are defaulted in
//! [`crate::mapping`], so nothing in here carries a null hazard except the
//! explicitly optional featured images.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Categorized;
use crate::money::Money;

/// Placeholder shown when a record has no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

// =============================================================================
// Image
// =============================================================================

/// An image reference with its alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

impl Image {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Image {
            url: url.into(),
            alt: alt.into(),
        }
    }

    /// The URL to put in `src`, falling back to the placeholder when empty.
    pub fn src(&self) -> &str {
        if self.url.is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.url
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as shown on the menu and in the featured carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: Image,
    pub category: String,
    pub slug: String,
}

impl Product {
    /// Link target of the carousel's "Order Now" button.
    pub fn menu_anchor(&self) -> String {
        format!("/menu#{}", self.slug)
    }
}

impl Categorized for Product {
    fn category(&self) -> &str {
        &self.category
    }
}

// =============================================================================
// Post
// =============================================================================

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Plain-text excerpt (tags already stripped).
    pub excerpt: String,
    /// Post body as HTML from the CMS.
    pub content: String,
    pub slug: String,
    /// Raw date string as delivered (`2024-01-15` or `2024-01-15T10:00:00`).
    pub date: String,
    pub author: String,
    pub featured_image: Option<Image>,
}

impl Post {
    /// The calendar day the post was published, if the date parses.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Human date such as `January 15, 2024`; unparsable dates pass through.
    pub fn display_date(&self) -> String {
        match self.published_on() {
            Some(day) => format_long_date(day),
            None => self.date.clone(),
        }
    }

    pub fn permalink(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

/// Formats a day as `January 15, 2024`.
pub fn format_long_date(day: NaiveDate) -> String {
    day.format("%B %-d, %Y").to_string()
}

// =============================================================================
// Page
// =============================================================================

/// A CMS page (used for About).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub featured_image: Option<Image>,
}

// =============================================================================
// Homepage Content
// =============================================================================

/// Hero and section copy for the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image: Image,
    pub featured_section_title: String,
}

impl Default for HomepageContent {
    /// Copy used when the CMS returns no homepage fields.
    fn default() -> Self {
        HomepageContent {
            hero_title: "Sweet Crumbs".to_string(),
            hero_subtitle: "Freshly baked goods made with love, using only the finest \
                            ingredients. Every bite is a moment of pure bliss."
                .to_string(),
            hero_image: Image::new("", "Sweet Crumbs bakery"),
            featured_section_title: "Featured Treats".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
