//! Menu page: category filter and product grid.

use crumbs_cms::Fetched;
use crumbs_core::catalog::{category_options, filter_by_category, resolve_selection};
use crumbs_core::fallback::placeholder_products;
use crumbs_core::seo::{product_schema, PageMeta};
use crumbs_core::Product;
use maud::{html, Markup};
use serde_json::Value;

use crate::render::layout::{page, page_intro, Nav, PageContext};

/// Renders `/menu`, filtered to `requested` when it names a known category.
pub fn render(ctx: &PageContext<'_>, products: &Fetched<Product>, requested: Option<&str>) -> Markup {
    let meta = PageMeta::new("Our Menu", "/menu").with_description(
        "Browse our handcrafted breads, pastries and desserts, baked fresh every morning.",
    );

    let (body, schemas) = match products {
        Fetched::Records(products) => {
            let options = category_options(products);
            let selected = resolve_selection(&options, requested);
            let visible = filter_by_category(products, &selected);
            let schemas: Vec<Value> = visible.iter().map(product_schema).collect();
            let body = html! {
                (intro("Discover our handcrafted breads, pastries and desserts, made fresh daily with the finest ingredients."))
                (category_nav(&options, &selected))
                @if visible.is_empty() {
                    p.empty { "No items found in the " (selected) " category." }
                } @else {
                    (grid(&visible, false))
                }
            };
            (body, schemas)
        }
        Fetched::Empty => {
            let body = html! {
                (intro("Our menu will be displayed here once connected to the CMS."))
                (grid(&placeholder_products(), true))
            };
            (body, Vec::new())
        }
        Fetched::Error(message) => {
            let body = html! {
                (intro("Discover our handcrafted breads, pastries and desserts, made fresh daily with the finest ingredients."))
                p.error role="alert" { (message) }
            };
            (body, Vec::new())
        }
    };

    page(ctx, &meta, Nav::Menu, &schemas, html! { div.container { (body) } })
}

fn intro(lede: &str) -> Markup {
    page_intro("Our Menu", Some(lede))
}

fn category_nav(options: &[String], selected: &str) -> Markup {
    html! {
        nav.categories aria-label="Categories" {
            @for option in options {
                a class=(if option == selected { "category active" } else { "category" })
                    href=(category_href(option))
                    aria-current=[(option == selected).then_some("true")] { (option) }
            }
        }
    }
}

fn category_href(category: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(category.as_bytes()).collect();
    format!("/menu?category={encoded}")
}

/// Product cards. Sample cards carry an inert "Add to Cart" button.
fn grid(products: &[Product], samples: bool) -> Markup {
    html! {
        div.product-grid {
            @for product in products {
                article.product-card id=[(!product.slug.is_empty()).then_some(&product.slug)] {
                    img src=(product.image.src()) alt=(product.image.alt) loading="lazy";
                    div.card-body {
                        div.card-heading {
                            h3 { (product.name) }
                            span.price { (product.price) }
                        }
                        p { (product.description) }
                        div.card-footer {
                            span.badge { (product.category) }
                            @if samples {
                                button.button type="button" disabled { "Add to Cart" }
                            }
                        }
                    }
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

    fn render_menu(products: &Fetched<Product>, requested: Option<&str>) -> String {
        let site = SiteSettings::default();
        let business = BusinessProfile::sweet_crumbs();
        let ctx = PageContext::new(&site, &business);
        render(&ctx, products, requested).into_string()
    }

    fn bakery() -> Fetched<Product> {
        Fetched::Records(FallbackContent::bakery().products)
    }

    #[test]
    fn test_all_products_with_anchors() {
        let html = render_menu(&bakery(), None);
        assert_eq!(html.matches("<article").count(), 6);
        assert!(html.contains(r#"id="fresh-croissants""#));
        assert!(html.contains(r#"class="category active" href="/menu?category=All""#));
        assert_eq!(html.matches(r#""@type":"Product""#).count(), 6);
    }

    #[test]
    fn test_category_filter() {
        let html = render_menu(&bakery(), Some("Breads"));
        assert_eq!(html.matches("<article").count(), 2);
        assert!(html.contains("Artisan Sourdough"));
        assert!(!html.contains("Fresh Croissants"));
        assert!(html.contains(r#"class="category active" href="/menu?category=Breads""#));
    }

    #[test]
    fn test_unknown_category_shows_all() {
        let html = render_menu(&bakery(), Some("Cookies"));
        assert_eq!(html.matches("<article").count(), 6);
    }

    #[test]
    fn test_empty_menu_shows_samples() {
        let html = render_menu(&Fetched::Empty, None);
        assert_eq!(html.matches("Add to Cart").count(), 6);
        assert!(html.contains("Sample Treat 1"));
        assert!(!html.contains("product-card\" id="));
    }

    #[test]
    fn test_error_state() {
        let html = render_menu(&Fetched::Error(crumbs_cms::PRODUCTS_ERROR.to_string()), None);
        assert!(html.contains("Failed to load products. Please try again later."));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_category_href_is_encoded() {
        assert_eq!(category_href("Cakes & Pies"), "/menu?category=Cakes+%26+Pies");
    }
}
