//! Blog index, single post and the post-not-found page.

use crumbs_cms::Fetched;
use crumbs_core::fallback::placeholder_posts;
use crumbs_core::seo::{absolute_url, breadcrumb_schema, PageMeta};
use crumbs_core::Post;
use maud::{html, Markup, PreEscaped};

use crate::render::layout::{chevron_left, chevron_right, page, page_intro, Nav, PageContext};

const BLOG_LEDE: &str =
    "Sweet stories, baking tips, and behind-the-scenes content from our kitchen to yours.";

// =============================================================================
// Index
// =============================================================================

/// Renders `/blog`.
pub fn index(ctx: &PageContext<'_>, posts: &Fetched<Post>) -> Markup {
    let meta = PageMeta::new("Our Blog", "/blog").with_description(BLOG_LEDE);

    let body = match posts {
        Fetched::Records(posts) => html! {
            (page_intro("Our Blog", Some(BLOG_LEDE)))
            (post_list(posts))
        },
        Fetched::Empty => html! {
            (page_intro("Our Blog", Some("Our blog posts will be displayed here once connected to the CMS.")))
            (post_list(&placeholder_posts()))
        },
        Fetched::Error(message) => html! {
            (page_intro("Our Blog", Some(BLOG_LEDE)))
            p.error role="alert" { (message) }
        },
    };

    page(ctx, &meta, Nav::Blog, &[], html! { div.container { (body) } })
}

fn post_list(posts: &[Post]) -> Markup {
    html! {
        div.post-list {
            @for post in posts {
                (post_card(post))
            }
        }
    }
}

/// Posts without a slug (samples) render without links.
fn post_card(post: &Post) -> Markup {
    let linked = !post.slug.is_empty();
    html! {
        article.post-card {
            @if let Some(image) = &post.featured_image {
                img src=(image.src()) alt=(image.alt) loading="lazy";
            }
            div.card-body {
                (byline(post))
                h2 {
                    @if linked {
                        a href=(post.permalink()) { (post.title) }
                    } @else {
                        (post.title)
                    }
                }
                p { (post.excerpt) }
                @if linked {
                    a.link href=(post.permalink()) { "Read more " (chevron_right()) }
                } @else {
                    span.link { "Read more " (chevron_right()) }
                }
            }
        }
    }
}

fn byline(post: &Post) -> Markup {
    html! {
        p.byline {
            time datetime=[post.published_on().map(|day| day.to_string())] { (post.display_date()) }
            " • "
            span { (post.author) }
        }
    }
}

// =============================================================================
// Single Post
// =============================================================================

/// Renders `/blog/{slug}`.
pub fn post(ctx: &PageContext<'_>, post: &Post) -> Markup {
    let mut meta = PageMeta::new(post.title.clone(), post.permalink()).article();
    if !post.excerpt.is_empty() {
        meta = meta.with_description(post.excerpt.clone());
    }
    if let Some(image) = &post.featured_image {
        meta = meta.with_image(image.src());
    }

    let base_url = ctx.base_url();
    let breadcrumbs = breadcrumb_schema(&[
        ("Home".to_string(), absolute_url(base_url, "/")),
        ("Blog".to_string(), absolute_url(base_url, "/blog")),
        (post.title.clone(), absolute_url(base_url, &post.permalink())),
    ]);

    let body = html! {
        article.post.container {
            a.link.back href="/blog" { (chevron_left()) " Back to Blog" }
            header {
                (byline(post))
                h1 { (post.title) }
                @if !post.excerpt.is_empty() {
                    p.lede { (post.excerpt) }
                }
            }
            @if let Some(image) = &post.featured_image {
                img.cover src=(image.src()) alt=(image.alt);
            }
            div.prose { (PreEscaped(&post.content)) }
            footer.post-footer {
                a.button href="/blog" { "More Blog Posts" }
                span { "By " (post.author) }
            }
        }
    };

    page(ctx, &meta, Nav::Blog, &[breadcrumbs], body)
}

/// Rendered with a 404 status for unknown slugs.
pub fn not_found(ctx: &PageContext<'_>) -> Markup {
    let meta = PageMeta::new("Post Not Found", "/blog");
    let body = html! {
        div.container.not-found {
            h1 { "Post Not Found" }
            p { "The blog post you're looking for doesn't exist or has been moved." }
            a.button href="/blog" { "Back to Blog" }
        }
    };
    page(ctx, &meta, Nav::Blog, &[], body)
}
