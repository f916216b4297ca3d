//! # Fallback Content
//!
//! Static substitute content, structurally identical to mapped CMS records.
//!
//! ```text
//!   CMS unconfigured ─┐
//!   CMS unreachable  ─┼──► FallbackContent (injected at startup) ──► pages
//!   CMS malformed    ─┘
//! ```
//!
//! The value is built once and handed to the fetcher, so "CMS unavailable"
//! behavior is deterministic and testable without network mocking.
//! [`FallbackContent::bakery`] is the built-in catalogue;
//! [`FallbackContent::empty`] exercises the empty-state renders.
//!
//! Placeholder cards ([`placeholder_products`], [`placeholder_posts`]) are a
//! different thing: they fill the menu and blog when the CMS answered with
//! zero records.

use crate::money::Money;
use crate::types::{HomepageContent, Image, Page, Post, Product};

/// Substitute content used whenever the CMS cannot supply its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackContent {
    pub homepage: HomepageContent,
    pub products: Vec<Product>,
    pub posts: Vec<Post>,
    pub about: Option<Page>,
}

impl FallbackContent {
    /// No substitute content at all.
    pub fn empty() -> Self {
        FallbackContent {
            homepage: HomepageContent::default(),
            products: Vec::new(),
            posts: Vec::new(),
            about: None,
        }
    }

    /// The Sweet Crumbs catalogue, blog and story.
    pub fn bakery() -> Self {
        FallbackContent {
            homepage: HomepageContent {
                hero_title: "Welcome to Sweet Crumbs Bakery".to_string(),
                hero_subtitle: "Artisanal breads, pastries, and desserts baked fresh daily \
                                with love and the finest ingredients"
                    .to_string(),
                hero_image: Image::new(
                    unsplash("photo-1509440159596-0249088772ff", 2072),
                    "Beautiful bakery display case with fresh pastries",
                ),
                featured_section_title: "Our Signature Treats".to_string(),
            },
            products: bakery_products(),
            posts: bakery_posts(),
            about: Some(about_page()),
        }
    }

    /// The post with `slug`, if the fallback has one.
    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }
}

impl Default for FallbackContent {
    fn default() -> Self {
        FallbackContent::bakery()
    }
}

fn unsplash(photo: &str, width: u32) -> String {
    format!(
        "https://images.unsplash.com/{photo}?ixlib=rb-4.0.3&auto=format&fit=crop&w={width}&q=80"
    )
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    cents: i64,
    photo: &str,
    alt: &str,
    category: &str,
    slug: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_cents(cents),
        image: Image::new(unsplash(photo, 1000), alt),
        category: category.to_string(),
        slug: slug.to_string(),
    }
}

fn bakery_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Fresh Croissants",
            "Buttery, flaky croissants made fresh every morning using traditional French \
             techniques. Each croissant is hand-rolled and baked to golden perfection.",
            325,
            "photo-1555507036-ab794f677db7",
            "Fresh golden croissants",
            "Pastries",
            "fresh-croissants",
        ),
        product(
            "2",
            "Artisan Sourdough",
            "Our signature sourdough bread, fermented for 24 hours to develop complex \
             flavors. Made with organic flour and our century-old starter.",
            650,
            "photo-1549931319-a545dcf3bc73",
            "Rustic sourdough bread loaf",
            "Breads",
            "artisan-sourdough",
        ),
        product(
            "3",
            "Chocolate Eclairs",
            "Delicate choux pastry filled with vanilla cream and topped with rich chocolate \
             glaze. A classic French pastry made to perfection.",
            475,
            "photo-1578985545062-69928b1d9587",
            "Chocolate eclairs with glossy chocolate topping",
            "Desserts",
            "chocolate-eclairs",
        ),
        product(
            "4",
            "Cinnamon Rolls",
            "Soft, fluffy cinnamon rolls swirled with brown sugar and spices, topped with \
             cream cheese frosting. Perfect for breakfast or afternoon treats.",
            425,
            "photo-1509365465985-25d11c17e812",
            "Freshly baked cinnamon rolls with icing",
            "Pastries",
            "cinnamon-rolls",
        ),
        product(
            "5",
            "Fruit Tarts",
            "Seasonal fruit tarts with pastry cream and fresh berries. Made with the finest \
             seasonal fruits and our signature pastry cream.",
            525,
            "photo-1464349095431-e9a21285b5f3",
            "Beautiful fruit tarts with fresh berries",
            "Desserts",
            "fruit-tarts",
        ),
        product(
            "6",
            "Whole Wheat Bread",
            "Hearty whole wheat bread made with stone-ground flour. Perfect for sandwiches \
             or toast, packed with nutrition and flavor.",
            575,
            "photo-1586444248902-2f64eddc13df",
            "Sliced whole wheat bread",
            "Breads",
            "whole-wheat-bread",
        ),
    ]
}

fn bakery_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            title: "The Art of Sourdough: A Baker's Journey".to_string(),
            excerpt: "Discover the ancient craft of sourdough baking and how we've perfected \
                      our techniques over the years."
                .to_string(),
            content: "<p>Sourdough baking is both an art and a science...</p>".to_string(),
            slug: "art-of-sourdough".to_string(),
            date: "2024-01-15".to_string(),
            author: "Sarah Johnson".to_string(),
            featured_image: Some(Image::new(
                unsplash("photo-1549931319-a545dcf3bc73", 1200),
                "Baker kneading sourdough",
            )),
        },
        Post {
            id: "2".to_string(),
            title: "Seasonal Specials: Winter Warmth".to_string(),
            excerpt: "Cozy up with our winter menu featuring spiced breads, holiday cookies, \
                      and warming pastries."
                .to_string(),
            content: "<p>As winter approaches, we're excited to introduce...</p>".to_string(),
            slug: "seasonal-winter-specials".to_string(),
            date: "2024-01-10".to_string(),
            author: "Mike Chen".to_string(),
            featured_image: Some(Image::new(
                unsplash("photo-1578985545062-69928b1d9587", 1200),
                "Winter pastries and hot drinks",
            )),
        },
    ]
}

fn about_page() -> Page {
    Page {
        id: "about".to_string(),
        title: "About Sweet Crumbs".to_string(),
        content: concat!(
            "<h2>Our Story</h2>",
            "<p>Sweet Crumbs Bakery was born from a simple dream: to bring authentic, ",
            "artisanal baked goods to our community. Founded in 2020 by master baker Sarah ",
            "Johnson, we've grown from a small home kitchen operation to your favorite ",
            "neighborhood bakery.</p>",
            "<p>Every morning at 4 AM, our team begins the careful process of mixing, ",
            "kneading, and shaping dough using time-honored techniques passed down through ",
            "generations. We source our flour from local mills, our butter from nearby dairy ",
            "farms, and our seasonal fruits from regional growers.</p>",
            "<h2>Our Mission</h2>",
            "<p>To create exceptional baked goods that bring joy to everyday moments, while ",
            "supporting our local community and maintaining the highest standards of quality ",
            "and sustainability.</p>",
        )
        .to_string(),
        slug: "about".to_string(),
        featured_image: Some(Image::new(
            unsplash("photo-1517433670267-08bbd4be890f", 1200),
            "Sweet Crumbs bakery interior",
        )),
    }
}

// =============================================================================
// Placeholder Cards
// =============================================================================

/// Six sample cards for a menu the CMS returned empty.
///
/// Priced $3.49 up to $5.99 in 50 cent steps; slugs are empty so the cards
/// carry no anchor.
pub fn placeholder_products() -> Vec<Product> {
    (1..=6)
        .map(|i| Product {
            id: format!("sample-{i}"),
            name: format!("Sample Treat {i}"),
            description: "A delicious sample treat that will be replaced with real content \
                          from the CMS."
                .to_string(),
            price: Money::from_cents(299 + i64::from(i) * 50),
            image: Image::new("", format!("Sample Treat {i}")),
            category: "Classic".to_string(),
            slug: String::new(),
        })
        .collect()
}

/// Three sample posts for a blog the CMS returned empty.
pub fn placeholder_posts() -> Vec<Post> {
    (1..=3)
        .map(|i| Post {
            id: format!("sample-{i}"),
            title: format!("Sample Blog Post {i}: The Art of Baking"),
            excerpt: "This is a sample blog post that will be replaced with real content from \
                      the CMS. Learn about our baking process and secrets!"
                .to_string(),
            content: String::new(),
            slug: String::new(),
            date: format!("2024-01-{i:02}"),
            author: "Sweet Crumbs Team".to_string(),
            featured_image: None,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
