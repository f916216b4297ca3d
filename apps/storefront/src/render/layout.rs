//! # Page Layout
//!
//! The document shell every page shares.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ <head>  title · description · canonical · Open Graph · Twitter card     │
//! │         robots · keywords · verification · JSON-LD (Bakery + extras)    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │ header  Sweet Crumbs     Home  About  Menu  Blog  Contact               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │ main    page body                                                       │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │ footer  blurb · quick links · contact info · © year                     │
//! │         analytics (production with an id only)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Datelike;
use crumbs_core::seo::{local_business_schema, BusinessProfile, PageMeta, ROBOTS, TWITTER_HANDLE};
use crumbs_core::SITE_NAME;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::Value;

use crate::config::SiteSettings;

/// Brand color for browser chrome.
const THEME_COLOR: &str = "#d97706";

// =============================================================================
// Navigation
// =============================================================================

/// Header entry to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    About,
    Menu,
    Blog,
    Contact,
    /// Pages outside the main navigation.
    None,
}

const NAV_ITEMS: &[(Nav, &str, &str)] = &[
    (Nav::Home, "Home", "/"),
    (Nav::About, "About", "/about"),
    (Nav::Menu, "Menu", "/menu"),
    (Nav::Blog, "Blog", "/blog"),
    (Nav::Contact, "Contact", "/contact"),
];

// =============================================================================
// Page Context
// =============================================================================

/// Site-wide inputs every page render needs.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub site: &'a SiteSettings,
    pub business: &'a BusinessProfile,
    /// Shown in the footer copyright.
    pub year: i32,
}

impl<'a> PageContext<'a> {
    pub fn new(site: &'a SiteSettings, business: &'a BusinessProfile) -> Self {
        PageContext {
            site,
            business,
            year: chrono::Utc::now().year(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.site.base_url()
    }
}

// =============================================================================
// Document
// =============================================================================

/// Wraps `body` in the full document.
pub fn page(
    ctx: &PageContext<'_>,
    meta: &PageMeta,
    nav: Nav,
    schemas: &[Value],
    body: Markup,
) -> Markup {
    let base_url = ctx.base_url();
    let title = meta.full_title();
    let canonical = meta.canonical_url(base_url);
    let image = meta.image_url(base_url);
    let business = local_business_schema(ctx.business, base_url);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(meta.description);
                meta name="keywords" content=(meta.keywords());
                meta name="robots" content=(ROBOTS);
                meta name="theme-color" content=(THEME_COLOR);
                @if let Some(token) = ctx.site.verification() {
                    meta name="google-site-verification" content=(token);
                }
                link rel="canonical" href=(canonical);

                meta property="og:type" content=(meta.og_type.as_str());
                meta property="og:site_name" content=(SITE_NAME);
                meta property="og:locale" content="en_US";
                meta property="og:title" content=(title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(canonical);
                meta property="og:image" content=(image);

                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:site" content=(TWITTER_HANDLE);
                meta name="twitter:creator" content=(TWITTER_HANDLE);
                meta name="twitter:title" content=(title);
                meta name="twitter:description" content=(meta.description);
                meta name="twitter:image" content=(image);

                link rel="icon" href="/static/placeholder.svg" type="image/svg+xml";
                link rel="stylesheet" href="/static/site.css";

                (json_ld(&business))
                @for schema in schemas {
                    (json_ld(schema))
                }
            }
            body {
                (header(nav))
                main { (body) }
                (footer(ctx))
                @if let Some(id) = ctx.site.analytics() {
                    (analytics(id))
                }
            }
        }
    }
}

/// Structured data block. `</` is escaped so content cannot close the tag.
pub fn json_ld(value: &Value) -> Markup {
    let json = value.to_string().replace("</", "<\\/");
    html! {
        script type="application/ld+json" { (PreEscaped(json)) }
    }
}

fn header(active: Nav) -> Markup {
    html! {
        header.site-header {
            nav.container.nav {
                a.brand href="/" { (SITE_NAME) }
                details.nav-toggle {
                    summary { span.sr-only { "Open main menu" } "☰" }
                    (nav_links(active))
                }
                div.nav-links { (nav_links(active)) }
            }
        }
    }
}

fn nav_links(active: Nav) -> Markup {
    html! {
        ul {
            @for (item, label, href) in NAV_ITEMS {
                li {
                    a class=[(*item == active).then_some("active")]
                        href=(href)
                        aria-current=[(*item == active).then_some("page")] { (label) }
                }
            }
        }
    }
}

fn footer(ctx: &PageContext<'_>) -> Markup {
    let business = ctx.business;
    html! {
        footer.site-footer {
            div.container.footer-grid {
                div {
                    h3 { (SITE_NAME) }
                    p { "Freshly baked breads, pastries and desserts made with love and the finest ingredients." }
                }
                div {
                    h4 { "Quick Links" }
                    ul {
                        li { a href="/about" { "About Us" } }
                        li { a href="/menu" { "Our Menu" } }
                        li { a href="/blog" { "Blog" } }
                        li { a href="/contact" { "Contact" } }
                    }
                }
                div {
                    h4 { "Contact Info" }
                    p { (business.street) }
                    p { (business.city_line()) }
                    p { "Phone: " (business.telephone) }
                    p { "Email: " (business.email) }
                }
            }
            div.container.copyright {
                p { "© " (ctx.year) " " (SITE_NAME) ". All rights reserved." }
            }
        }
    }
}

fn analytics(id: &str) -> Markup {
    let src = format!(
        "https://www.googletagmanager.com/gtag/js?id={}",
        url::form_urlencoded::byte_serialize(id.as_bytes()).collect::<String>()
    );
    let id_literal = Value::String(id.to_string()).to_string().replace("</", "<\\/");
    let script = format!(
        "window.dataLayer = window.dataLayer || [];\
         function gtag(){{dataLayer.push(arguments);}}\
         gtag('js', new Date());\
         gtag('config', {id_literal});"
    );
    html! {
        script async src=(src) {}
        script { (PreEscaped(script)) }
    }
}

// =============================================================================
// Shared Pieces
// =============================================================================

/// Page heading block used at the top of most pages.
pub fn page_intro(title: &str, lede: Option<&str>) -> Markup {
    html! {
        div.page-intro {
            h1 { (title) }
            @if let Some(lede) = lede {
                p.lede { (lede) }
            }
        }
    }
}

/// Right-pointing chevron used by "Read more" style links.
pub fn chevron_right() -> Markup {
    html! {
        svg.icon fill="none" stroke="currentColor" viewBox="0 0 24 24" aria-hidden="true" {
            path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5l7 7-7 7" {}
        }
    }
}

/// Left-pointing chevron used by "Back" style links.
pub fn chevron_left() -> Markup {
    html! {
        svg.icon fill="none" stroke="currentColor" viewBox="0 0 24 24" aria-hidden="true" {
            path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M15 19l-7-7 7-7" {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(site: &SiteSettings, nav: Nav) -> String {
        let business = BusinessProfile::sweet_crumbs();
        let ctx = PageContext {
            site,
            business: &business,
            year: 2026,
        };
        let meta = PageMeta::new("Our Menu", "/menu");
        page(&ctx, &meta, nav, &[], html! { p { "body" } }).into_string()
    }

    #[test]
    fn test_head_metadata() {
        let html = render(&SiteSettings::default(), Nav::Menu);
        assert!(html.contains("<title>Our Menu | Sweet Crumbs</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://sweetcrumbs.com/menu">"#));
        assert!(html.contains(r#"property="og:url" content="https://sweetcrumbs.com/menu""#));
        assert!(html.contains(r#"name="twitter:card" content="summary_large_image""#));
        assert!(html.contains(r#""@type":"Bakery""#));
        assert!(html.contains("© 2026 Sweet Crumbs. All rights reserved."));
    }

    #[test]
    fn test_active_nav() {
        let html = render(&SiteSettings::default(), Nav::Menu);
        assert!(html.contains(r#"<a class="active" href="/menu" aria-current="page">Menu</a>"#));
        assert!(html.contains(r#"<a href="/blog">Blog</a>"#));
    }

    #[test]
    fn test_analytics_and_verification_gating() {
        let mut site = SiteSettings {
            analytics_id: Some("G-TEST".into()),
            ..SiteSettings::default()
        };
        let html = render(&site, Nav::Home);
        assert!(!html.contains("googletagmanager"));
        assert!(!html.contains("google-site-verification"));

        site.production = true;
        site.site_verification = Some("verify-me".into());
        let html = render(&site, Nav::Home);
        assert!(html.contains("gtag/js?id=G-TEST"));
        assert!(html.contains(r#"gtag('config', "G-TEST");"#));
        assert!(html.contains(r#"name="google-site-verification" content="verify-me""#));
    }

    #[test]
    fn test_json_ld_cannot_close_script() {
        let html = json_ld(&serde_json::json!({ "name": "</script><b>" })).into_string();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r#"<\/script>"#));
    }
}
