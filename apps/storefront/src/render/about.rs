//! About page. CMS content when available, built-in story otherwise.

use crumbs_core::seo::PageMeta;
use crumbs_core::Page;
use maud::{html, Markup, PreEscaped};

use crate::render::layout::{page, page_intro, Nav, PageContext};

const VALUES: &[(&str, &str)] = &[
    (
        "Made with Love",
        "Every item is crafted with care and attention to detail, just like grandma used to make.",
    ),
    (
        "Quality Ingredients",
        "We use only the finest, freshest ingredients sourced from trusted local suppliers.",
    ),
    (
        "Community First",
        "We're proud to be part of this community and love bringing people together over great food.",
    ),
];

/// Renders `/about` from `cms_page` when the CMS has one.
pub fn render(ctx: &PageContext<'_>, cms_page: Option<&Page>) -> Markup {
    match cms_page {
        Some(cms_page) => render_cms_page(ctx, cms_page),
        None => render_default(ctx),
    }
}

fn render_cms_page(ctx: &PageContext<'_>, cms_page: &Page) -> Markup {
    let mut meta = PageMeta::new(cms_page.title.clone(), "/about");
    if let Some(image) = &cms_page.featured_image {
        meta = meta.with_image(image.src());
    }

    let body = html! {
        article.container.about {
            (page_intro(&cms_page.title, None))
            @if let Some(image) = &cms_page.featured_image {
                img.cover src=(image.src()) alt=(image.alt);
            }
            div.prose { (PreEscaped(&cms_page.content)) }
        }
    };
    page(ctx, &meta, Nav::About, &[], body)
}

fn render_default(ctx: &PageContext<'_>) -> Markup {
    let meta = PageMeta::new("About Sweet Crumbs", "/about").with_description(
        "The story of Sweet Crumbs: a neighborhood bakery built on passion, tradition and flavor.",
    );

    let body = html! {
        div.container.about {
            (page_intro(
                "About Sweet Crumbs",
                Some("Welcome to Sweet Crumbs, where every loaf and pastry tells a story of passion, tradition, and irresistible flavor."),
            ))
            section.prose {
                h2 { "Our Story" }
                p {
                    "Founded in 2020, Sweet Crumbs began as a small family dream to share our \
                     love of baking with the community. What started in a tiny home kitchen has \
                     grown into a beloved local bakery, but our commitment to quality and \
                     tradition remains unchanged."
                }
                p {
                    "Every treat we bake is made from scratch using time-honored recipes passed \
                     down through generations, combined with modern techniques and the finest \
                     ingredients we can find."
                }
            }
            section.values {
                h2 { "Our Values" }
                div.value-grid {
                    @for (title, text) in VALUES {
                        div.value {
                            h3 { (title) }
                            p { (text) }
                        }
                    }
                }
            }
        }
    };
    page(ctx, &meta, Nav::About, &[], body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteSettings;
    use crumbs_core::fallback::FallbackContent;
    use crumbs_core::seo::BusinessProfile;

    fn render_about(cms_page: Option<&Page>) -> String {
        let site = SiteSettings::default();
        let business = BusinessProfile::sweet_crumbs();
        let ctx = PageContext::new(&site, &business);
        render(&ctx, cms_page).into_string()
    }

    #[test]
    fn test_cms_page_content_is_html() {
        let about = FallbackContent::bakery().about.unwrap();
        let html = render_about(Some(&about));
        assert!(html.contains("<h2>Our Mission</h2>"));
        assert!(html.contains(r#"alt="Sweet Crumbs bakery interior""#));
    }

    #[test]
    fn test_default_page() {
        let html = render_about(None);
        assert!(html.contains("Our Story"));
        assert!(html.contains("Founded in 2020"));
        assert_eq!(html.matches(r#"<div class="value">"#).count(), 3);
        assert!(html.contains(r#"<a class="active" href="/about""#));
    }
}
