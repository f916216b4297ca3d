//! # SEO Metadata
//!
//! Per-page metadata and the JSON-LD documents embedded in pages.
//!
//! ## What Each Page Gets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <head>                                                                 │
//! │   ├── <title>            PageMeta::full_title()                         │
//! │   ├── description, keywords, robots                                     │
//! │   ├── og:* / twitter:*   same title, description, image                 │
//! │   ├── canonical          base_url + path                                │
//! │   └── ld+json            local_business_schema()     (every page)       │
//! │                                                                         │
//! │  menu cards              product_schema()            (per product)      │
//! │  blog post               breadcrumb_schema()         Home > Blog > Post │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Schemas are plain `serde_json::Value`s; the renderer serialises them into
//! `<script type="application/ld+json">`.

use serde_json::{json, Value};

use crate::types::Product;
use crate::SITE_NAME;

/// Description used when a page does not supply its own.
pub const DEFAULT_DESCRIPTION: &str = "Discover handcrafted breads, pastries and desserts made \
    with love and the finest ingredients. Baked fresh daily at Sweet Crumbs bakery.";

/// Image used for social cards when a page does not supply its own.
pub const DEFAULT_SOCIAL_IMAGE: &str = "/static/og-image.jpg";

/// Robots directive for every public page.
pub const ROBOTS: &str = "index, follow, max-image-preview:large, max-snippet:-1, max-video-preview:-1";

/// Keywords for every page.
pub const KEYWORDS: &[&str] = &[
    "bakery",
    "fresh baked",
    "artisan bread",
    "pastries",
    "handcrafted",
    "local bakery",
    "sweet treats",
    "desserts",
    "custom orders",
];

/// Twitter handle credited on cards.
pub const TWITTER_HANDLE: &str = "@sweetcrumbs";

// =============================================================================
// Page Metadata
// =============================================================================

/// Open Graph object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

/// Metadata for one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Absolute URL or site path of the social image.
    pub image: String,
    /// Site path, e.g. `/menu`.
    pub path: String,
    pub og_type: OgType,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        PageMeta {
            title: title.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            image: DEFAULT_SOCIAL_IMAGE.to_string(),
            path: path.into(),
            og_type: OgType::Website,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.trim().is_empty() {
            self.description = description;
        }
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        if !image.is_empty() {
            self.image = image;
        }
        self
    }

    pub fn article(mut self) -> Self {
        self.og_type = OgType::Article;
        self
    }

    /// `"{title} | Sweet Crumbs"` unless the title already names the site.
    pub fn full_title(&self) -> String {
        full_title(&self.title)
    }

    /// Canonical URL for this page under `base_url`.
    pub fn canonical_url(&self, base_url: &str) -> String {
        absolute_url(base_url, &self.path)
    }

    /// Social image as an absolute URL.
    pub fn image_url(&self, base_url: &str) -> String {
        absolute_url(base_url, &self.image)
    }

    pub fn keywords(&self) -> String {
        KEYWORDS.join(", ")
    }
}

/// Applies the site-name suffix rule to a page title.
///
/// ## Example
/// ```rust
/// use crumbs_core::seo::full_title;
///
/// assert_eq!(full_title("Our Menu"), "Our Menu | Sweet Crumbs");
/// assert_eq!(full_title("About Sweet Crumbs"), "About Sweet Crumbs");
/// ```
pub fn full_title(title: &str) -> String {
    if title.contains(SITE_NAME) {
        title.to_string()
    } else {
        format!("{title} | {SITE_NAME}")
    }
}

/// Joins a site path onto the base URL; absolute URLs pass through.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.is_empty() || path == "/" {
        format!("{base}/")
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

// =============================================================================
// Business Profile
// =============================================================================

/// One row of opening hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHours {
    /// Human label, e.g. `Monday - Friday`.
    pub label: &'static str,
    pub days: &'static [&'static str],
    /// 24h `HH:MM`.
    pub opens: &'static str,
    pub closes: &'static str,
}

impl OpeningHours {
    /// `Monday - Friday: 7:00 AM - 7:00 PM`.
    pub fn display(&self) -> String {
        format!(
            "{}: {} - {}",
            self.label,
            twelve_hour(self.opens),
            twelve_hour(self.closes)
        )
    }
}

fn twelve_hour(hhmm: &str) -> String {
    let (h, m) = hhmm.split_once(':').unwrap_or((hhmm, "00"));
    let hour: u32 = h.parse().unwrap_or(0);
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{display}:{m} {suffix}")
}

/// Contact and location details of the bakery.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessProfile {
    pub name: &'static str,
    pub telephone: &'static str,
    pub email: &'static str,
    pub street: &'static str,
    pub locality: &'static str,
    pub region: &'static str,
    pub postal_code: &'static str,
    pub country: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub hours: Vec<OpeningHours>,
    pub price_range: &'static str,
    pub same_as: &'static [&'static str],
}

impl BusinessProfile {
    pub fn sweet_crumbs() -> Self {
        BusinessProfile {
            name: SITE_NAME,
            telephone: "(555) 123-4567",
            email: "hello@sweetcrumbs.com",
            street: "123 Baker Street",
            locality: "Sweet City",
            region: "SC",
            postal_code: "12345",
            country: "US",
            latitude: 40.7589,
            longitude: -73.9851,
            hours: vec![
                OpeningHours {
                    label: "Monday - Friday",
                    days: &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
                    opens: "07:00",
                    closes: "19:00",
                },
                OpeningHours {
                    label: "Saturday",
                    days: &["Saturday"],
                    opens: "08:00",
                    closes: "20:00",
                },
                OpeningHours {
                    label: "Sunday",
                    days: &["Sunday"],
                    opens: "09:00",
                    closes: "18:00",
                },
            ],
            price_range: "$$",
            same_as: &[
                "https://www.facebook.com/sweetcrumbs",
                "https://www.instagram.com/sweetcrumbs",
                "https://twitter.com/sweetcrumbs",
            ],
        }
    }

    /// `Sweet City, SC 12345`.
    pub fn city_line(&self) -> String {
        format!("{}, {} {}", self.locality, self.region, self.postal_code)
    }
}

// =============================================================================
// JSON-LD Schemas
// =============================================================================

/// `Bakery` (a LocalBusiness subtype) for the site-wide head.
pub fn local_business_schema(profile: &BusinessProfile, base_url: &str) -> Value {
    let hours: Vec<Value> = profile
        .hours
        .iter()
        .map(|h| {
            let days = match h.days {
                [single] => json!(single),
                many => json!(many),
            };
            json!({
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": days,
                "opens": h.opens,
                "closes": h.closes,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "Bakery",
        "name": profile.name,
        "image": absolute_url(base_url, "/static/bakery-exterior.jpg"),
        "@id": format!("{}#organization", absolute_url(base_url, "/")),
        "url": absolute_url(base_url, "/"),
        "telephone": profile.telephone,
        "email": profile.email,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": profile.street,
            "addressLocality": profile.locality,
            "addressRegion": profile.region,
            "postalCode": profile.postal_code,
            "addressCountry": profile.country,
        },
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": profile.latitude,
            "longitude": profile.longitude,
        },
        "openingHoursSpecification": hours,
        "priceRange": profile.price_range,
        "servesCuisine": "Bakery",
        "menu": absolute_url(base_url, "/menu"),
        "sameAs": profile.same_as,
    })
}

/// `Product` with an in-stock USD offer.
pub fn product_schema(product: &Product) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.name,
        "description": product.description,
        "image": product.image.url,
        "category": product.category,
        "brand": { "@type": "Brand", "name": SITE_NAME },
        "offers": {
            "@type": "Offer",
            "price": product.price.decimal(),
            "priceCurrency": "USD",
            "availability": "https://schema.org/InStock",
            "seller": { "@type": "Organization", "name": SITE_NAME },
        },
    })
}

/// `BreadcrumbList` with 1-based positions.
pub fn breadcrumb_schema(items: &[(String, String)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": url,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackContent;

    const BASE: &str = "https://sweetcrumbs.com";

    #[test]
    fn test_full_title_rule() {
        assert_eq!(full_title("Blog"), "Blog | Sweet Crumbs");
        assert_eq!(full_title("Sweet Crumbs - Fresh Bakes"), "Sweet Crumbs - Fresh Bakes");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url(BASE, "/"), "https://sweetcrumbs.com/");
        assert_eq!(absolute_url("https://x.com/", "/menu"), "https://x.com/menu");
        assert_eq!(absolute_url(BASE, "img/a.jpg"), "https://sweetcrumbs.com/img/a.jpg");
        assert_eq!(absolute_url(BASE, "https://cdn/a.jpg"), "https://cdn/a.jpg");
    }

    #[test]
    fn test_page_meta_builders() {
        let meta = PageMeta::new("Our Menu", "/menu")
            .with_description("   ")
            .with_image("");
        assert_eq!(meta.description, DEFAULT_DESCRIPTION);
        assert_eq!(meta.image_url(BASE), "https://sweetcrumbs.com/static/og-image.jpg");
        assert_eq!(meta.canonical_url(BASE), "https://sweetcrumbs.com/menu");
        assert_eq!(meta.og_type.as_str(), "website");
        assert_eq!(meta.clone().article().og_type, OgType::Article);
    }

    #[test]
    fn test_hours_display() {
        let profile = BusinessProfile::sweet_crumbs();
        let lines: Vec<String> = profile.hours.iter().map(OpeningHours::display).collect();
        assert_eq!(
            lines,
            vec![
                "Monday - Friday: 7:00 AM - 7:00 PM",
                "Saturday: 8:00 AM - 8:00 PM",
                "Sunday: 9:00 AM - 6:00 PM",
            ]
        );
        assert_eq!(profile.city_line(), "Sweet City, SC 12345");
    }

    #[test]
    fn test_local_business_schema() {
        let schema = local_business_schema(&BusinessProfile::sweet_crumbs(), BASE);
        assert_eq!(schema["@type"], "Bakery");
        assert_eq!(schema["address"]["postalCode"], "12345");
        assert_eq!(schema["openingHoursSpecification"][0]["dayOfWeek"][4], "Friday");
        assert_eq!(schema["openingHoursSpecification"][1]["dayOfWeek"], "Saturday");
        assert_eq!(schema["menu"], "https://sweetcrumbs.com/menu");
    }

    #[test]
    fn test_product_schema_price() {
        let products = FallbackContent::bakery().products;
        let schema = product_schema(&products[1]);
        assert_eq!(schema["name"], "Artisan Sourdough");
        assert_eq!(schema["offers"]["price"], "6.50");
        assert_eq!(schema["offers"]["priceCurrency"], "USD");
    }

    #[test]
    fn test_breadcrumb_positions() {
        let schema = breadcrumb_schema(&[
            ("Home".to_string(), format!("{BASE}/")),
            ("Blog".to_string(), format!("{BASE}/blog")),
        ]);
        assert_eq!(schema["itemListElement"][0]["position"], 1);
        assert_eq!(schema["itemListElement"][1]["name"], "Blog");
    }
}
