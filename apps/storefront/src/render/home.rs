//! # Home Page
//!
//! Hero, featured-product carousel and call-to-action banner.
//!
//! The carousel renders server-side at the slide the query string names
//! (`/?slide=2`), so it works without script. `carousel.js` then opens
//! `/live/carousel?len=N` and lets the server's controller drive the N
//! rendered slides. A live controller always starts at slide 0, so a page
//! opened at `/?slide=k` jumps back to the first slide once the socket's
//! first frame arrives.

use crumbs_core::carousel::Carousel;
use crumbs_core::seo::PageMeta;
use crumbs_core::{HomepageContent, Product};
use maud::{html, Markup};

use crate::render::layout::{chevron_left, chevron_right, page, Nav, PageContext};

/// Renders the home page with `carousel` at its current slide.
pub fn render(
    ctx: &PageContext<'_>,
    content: &HomepageContent,
    carousel: &Carousel<Product>,
) -> Markup {
    let meta = PageMeta::new("Freshly Baked Goods", "/").with_image(content.hero_image.src());

    let body = html! {
        (hero(content))
        (featured(content, carousel))
        (call_to_action())
    };

    page(ctx, &meta, Nav::Home, &[], body)
}

fn hero(content: &HomepageContent) -> Markup {
    html! {
        section.hero {
            div.container.hero-grid {
                div.hero-copy {
                    h1 { (content.hero_title) }
                    p.lede { (content.hero_subtitle) }
                    div.actions {
                        a.button href="/menu" { "View Our Menu" }
                        a.link href="/about" { "Learn more →" }
                    }
                }
                div.hero-image {
                    img src=(content.hero_image.src()) alt=(content.hero_image.alt);
                }
            }
        }
    }
}

fn featured(content: &HomepageContent, carousel: &Carousel<Product>) -> Markup {
    let state = carousel.state();
    html! {
        section.featured {
            div.container {
                div.section-heading {
                    h2 { (content.featured_section_title) }
                    p { "Discover our most popular and delicious treats" }
                }
                @if carousel.is_empty() {
                    p.empty { "Our featured products will be displayed here once connected to the CMS." }
                } @else {
                    div id="featured-carousel"
                        class="carousel"
                        data-live=(format!("/live/carousel?len={}", state.len))
                        data-len=(state.len)
                        data-index=(state.index.unwrap_or(0)) {
                        div.slides {
                            @for (i, product) in carousel.items().iter().enumerate() {
                                (slide(i, product, state.index == Some(i)))
                            }
                        }
                        @if state.len > 1 {
                            (controls(carousel))
                        }
                    }
                    script src="/static/carousel.js" defer {}
                }
            }
        }
    }
}

fn slide(i: usize, product: &Product, current: bool) -> Markup {
    html! {
        article class=(if current { "slide current" } else { "slide" }) data-index=(i) hidden[!current] {
            div.slide-image {
                img src=(product.image.src()) alt=(product.image.alt);
            }
            div.slide-copy {
                span.badge { (product.category) }
                h3 { (product.name) }
                p { (product.description) }
                div.slide-footer {
                    span.price { (product.price) }
                    a.button href=(product.menu_anchor()) { "Order Now" }
                }
            }
        }
    }
}

/// Arrows and indicator dots. Each is a plain link so the page works
/// without script.
fn controls(carousel: &Carousel<Product>) -> Markup {
    let len = carousel.len();
    let current = carousel.index().unwrap_or(0);
    let previous = (current + len - 1) % len;
    let next = (current + 1) % len;

    html! {
        a.carousel-arrow.prev href=(slide_href(previous)) data-cmd="previous" aria-label="Previous slide" {
            (chevron_left())
        }
        a.carousel-arrow.next href=(slide_href(next)) data-cmd="next" aria-label="Next slide" {
            (chevron_right())
        }
        div.indicators {
            @for i in 0..len {
                a class=(if i == current { "indicator active" } else { "indicator" })
                    href=(slide_href(i))
                    data-cmd="go_to"
                    data-index=(i)
                    aria-label=(format!("Go to slide {}", i + 1)) {}
            }
        }
    }
}

fn slide_href(index: usize) -> String {
    format!("/?slide={index}#featured-carousel")
}

fn call_to_action() -> Markup {
    html! {
        section.cta {
            div.container {
                h2 { "Ready to satisfy your sweet tooth?" }
                p { "Browse our full menu and place your order today. Fresh from our ovens to your table!" }
                div.actions {
                    a.button.light href="/menu" { "Order Now" }
                    a.link.light href="/contact" { "Contact Us →" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteSettings;
    use crumbs_core::fallback::FallbackContent;
    use crumbs_core::seo::BusinessProfile;

    fn render_home(products: Vec<Product>, slide: usize) -> String {
        let site = SiteSettings::default();
        let business = BusinessProfile::sweet_crumbs();
        let ctx = PageContext::new(&site, &business);
        let content = FallbackContent::bakery().homepage;
        let mut carousel = Carousel::featured(products);
        let _ = carousel.go_to(slide);
        render(&ctx, &content, &carousel).into_string()
    }

    #[test]
    fn test_hero_and_cta() {
        let html = render_home(FallbackContent::bakery().products, 0);
        assert!(html.contains("Welcome to Sweet Crumbs Bakery"));
        assert!(html.contains("View Our Menu"));
        assert!(html.contains("Ready to satisfy your sweet tooth?"));
    }

    #[test]
    fn test_current_slide_and_indicators() {
        let html = render_home(FallbackContent::bakery().products, 2);
        assert!(html.contains(r#"<article class="slide current" data-index="2">"#));
        assert!(html.contains(r#"<article class="slide" data-index="0" hidden>"#));
        assert_eq!(html.matches(" hidden>").count(), 5);
        assert!(html.contains(r#"href="/?slide=1#featured-carousel" data-cmd="previous""#));
        assert!(html.contains(r#"href="/?slide=3#featured-carousel" data-cmd="next""#));
        assert_eq!(html.matches(r#"<a class="indicator"#).count(), 6);
        assert_eq!(html.matches(r#"data-cmd="go_to""#).count(), 6);
        assert!(html.contains(r#"class="indicator active" href="/?slide=2#featured-carousel""#));
    }

    #[test]
    fn test_live_url_carries_rendered_slide_count() {
        let html = render_home(FallbackContent::bakery().products, 0);
        assert!(html.contains(r#"data-live="/live/carousel?len=6""#));

        let three = FallbackContent::bakery().products.into_iter().take(3).collect();
        let html = render_home(three, 0);
        assert!(html.contains(r#"data-live="/live/carousel?len=3""#));
        assert_eq!(html.matches("<article class=\"slide").count(), 3);
    }

    #[test]
    fn test_previous_wraps_from_first_slide() {
        let html = render_home(FallbackContent::bakery().products, 0);
        assert!(html.contains(r#"href="/?slide=5#featured-carousel" data-cmd="previous""#));
    }

    #[test]
    fn test_single_product_has_no_controls() {
        let products = FallbackContent::bakery().products.into_iter().take(1).collect();
        let html = render_home(products, 0);
        assert!(html.contains("Fresh Croissants"));
        assert!(!html.contains("carousel-arrow"));
        assert!(!html.contains("indicator"));
    }

    #[test]
    fn test_empty_featured_section() {
        let html = render_home(Vec::new(), 0);
        assert!(html.contains("once connected to the CMS"));
        assert!(!html.contains("carousel.js"));
    }
}
