//! # CMS Shape Mapping
//!
//! Raw GraphQL response shapes and the pure functions that flatten them into
//! view records.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  GraphQL JSON                                                           │
//! │  { posts { nodes [ { title, content, featuredImage { node {..} } } ] } }│
//! │       │                                                                 │
//! │       │ serde (camelCase, every field optional)                         │
//! │       ▼                                                                 │
//! │  RawPost / RawPage / RawHomepageContent                                 │
//! │       │                                                                 │
//! │       │ map_* (THIS MODULE): default every missing field                │
//! │       ▼                                                                 │
//! │  Product / Post / Page / HomepageContent                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CMS schema is an external contract, so every raw field is optional and
//! a missing field never turns into an error here. Products come from plain
//! posts unless the item carries `productFields`, in which case those win.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::money::Money;
use crate::types::{HomepageContent, Image, Page, Post, Product};
use crate::DESCRIPTION_LIMIT;

/// Price shown for products the CMS does not price.
pub const DEFAULT_PRICE: Money = Money::from_cents(1299);

/// Category for products the CMS does not categorise.
pub const DEFAULT_CATEGORY: &str = "Bakery";

/// Description for products with no usable text.
pub const DEFAULT_DESCRIPTION: &str = "Delicious bakery item";

/// Byline for posts without an author.
pub const DEFAULT_AUTHOR: &str = "Sweet Crumbs Team";

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));

// =============================================================================
// Raw Shapes
// =============================================================================

/// `{ nodes: [...] }` list wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

/// `{ node: {...} }` single-item wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMediaItem {
    pub source_url: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    pub name: Option<String>,
}

/// Price as the CMS delivers it: a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    pub fn to_money(&self) -> Option<Money> {
        match self {
            RawPrice::Number(n) if n.is_finite() && *n >= 0.0 => {
                Some(Money::from_cents((n * 100.0).round() as i64))
            }
            RawPrice::Number(_) => None,
            RawPrice::Text(s) => Money::parse_decimal(s),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductImage {
    pub url: Option<String>,
    pub alt_text: Option<String>,
}

/// Custom product fields attached to a CMS item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<RawPrice>,
    pub category: Option<String>,
    pub image: Option<RawProductImage>,
}

/// A post node. Also the shape products are read from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    #[serde(default)]
    pub id: String,
    pub database_id: Option<i64>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub author: Option<Edge<RawAuthor>>,
    pub featured_image: Option<Edge<RawMediaItem>>,
    pub product_fields: Option<RawProductFields>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub featured_image: Option<Edge<RawMediaItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHomepageContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_bg_image: Option<Edge<RawMediaItem>>,
    pub featured_products_section_title: Option<String>,
}

// =============================================================================
// Text Helpers
// =============================================================================

/// Removes HTML tags and decodes the entities WordPress commonly emits.
///
/// ## Example
/// ```rust
/// use crumbs_core::mapping::strip_tags;
///
/// assert_eq!(strip_tags("<p>Fresh &amp; warm</p>"), "Fresh & warm");
/// ```
pub fn strip_tags(html: &str) -> String {
    let text = TAG_PATTERN.replace_all(html, "");
    text.replace("&nbsp;", " ")
        .replace("&#8217;", "\u{2019}")
        .replace("&#039;", "'")
        .replace("&quot;", "\"")
        .replace("&hellip;", "\u{2026}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Keeps at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn media_image(edge: Option<&Edge<RawMediaItem>>, fallback_alt: &str) -> Option<Image> {
    let node = edge?.node.as_ref()?;
    let url = non_empty(node.source_url.as_deref())?;
    let alt = non_empty(node.alt_text.as_deref()).unwrap_or(fallback_alt);
    Some(Image::new(url, alt))
}

// =============================================================================
// Mappers
// =============================================================================

/// Flattens a CMS item into a menu/carousel product.
///
/// ## Defaults
/// - name: product name → title → empty
/// - description: product description → first 150 chars of tag-stripped
///   content → "Delicious bakery item"
/// - price: product price → $12.99
/// - category: product category → "Bakery"
/// - image: product image → featured image → empty URL; alt → name
pub fn map_product(raw: &RawPost) -> Product {
    let fields = raw.product_fields.clone().unwrap_or_default();

    let name = non_empty(fields.name.as_deref())
        .or_else(|| non_empty(raw.title.as_deref()))
        .unwrap_or_default()
        .to_string();

    let description = non_empty(fields.description.as_deref())
        .map(str::to_string)
        .or_else(|| {
            let stripped = strip_tags(raw.content.as_deref().unwrap_or_default());
            let text = truncate_chars(stripped.trim(), DESCRIPTION_LIMIT);
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let price = fields
        .price
        .as_ref()
        .and_then(RawPrice::to_money)
        .unwrap_or(DEFAULT_PRICE);

    let category = non_empty(fields.category.as_deref())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    let product_image = fields.image.as_ref().and_then(|img| {
        non_empty(img.url.as_deref()).map(|url| {
            Image::new(url, non_empty(img.alt_text.as_deref()).unwrap_or(&name))
        })
    });
    let image = product_image
        .or_else(|| media_image(raw.featured_image.as_ref(), &name))
        .unwrap_or_else(|| Image::new("", name.clone()));

    Product {
        id: raw.id.clone(),
        name,
        description,
        price,
        image,
        category,
        slug: raw.slug.clone().unwrap_or_default(),
    }
}

/// Flattens a CMS post into a blog record.
pub fn map_post(raw: &RawPost) -> Post {
    let title = raw.title.clone().unwrap_or_default();
    let author = raw
        .author
        .as_ref()
        .and_then(|edge| edge.node.as_ref())
        .and_then(|node| non_empty(node.name.as_deref()))
        .unwrap_or(DEFAULT_AUTHOR)
        .to_string();

    Post {
        id: raw.id.clone(),
        excerpt: strip_tags(raw.excerpt.as_deref().unwrap_or_default())
            .trim()
            .to_string(),
        content: raw.content.clone().unwrap_or_default(),
        slug: raw.slug.clone().unwrap_or_default(),
        date: raw.date.clone().unwrap_or_default(),
        author,
        featured_image: media_image(raw.featured_image.as_ref(), &title),
        title,
    }
}

/// Flattens a CMS page.
pub fn map_page(raw: &RawPage) -> Page {
    let title = raw.title.clone().unwrap_or_default();
    Page {
        id: raw.id.clone(),
        content: raw.content.clone().unwrap_or_default(),
        slug: raw.slug.clone().unwrap_or_default(),
        featured_image: media_image(raw.featured_image.as_ref(), &title),
        title,
    }
}

/// Fills homepage copy field by field; anything missing keeps its default.
pub fn map_homepage(raw: &RawHomepageContent) -> HomepageContent {
    let defaults = HomepageContent::default();

    let hero_image = raw
        .hero_bg_image
        .as_ref()
        .and_then(|edge| edge.node.as_ref())
        .and_then(|node| {
            non_empty(node.source_url.as_deref()).map(|url| {
                Image::new(
                    url,
                    non_empty(node.alt_text.as_deref()).unwrap_or(&defaults.hero_image.alt),
                )
            })
        })
        .unwrap_or_else(|| defaults.hero_image.clone());

    HomepageContent {
        hero_title: non_empty(raw.hero_title.as_deref())
            .map(str::to_string)
            .unwrap_or(defaults.hero_title),
        hero_subtitle: non_empty(raw.hero_subtitle.as_deref())
            .map(str::to_string)
            .unwrap_or(defaults.hero_subtitle),
        hero_image,
        featured_section_title: non_empty(raw.featured_products_section_title.as_deref())
            .map(str::to_string)
            .unwrap_or(defaults.featured_section_title),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
