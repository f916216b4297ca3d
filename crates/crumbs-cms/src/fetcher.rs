//! # Content Fetcher
//!
//! One query per page load, mapped into view records. Nothing fails past
//! this boundary: every CMS error is logged and turned into fallback
//! content or an explicit error state.
//!
//! ## Outcomes by Operation
//! ```text
//! ┌──────────────────────┬───────────────────┬───────────────────┬─────────────────────┐
//! │ operation            │ CMS unconfigured  │ CMS error         │ CMS answered        │
//! ├──────────────────────┼───────────────────┼───────────────────┼─────────────────────┤
//! │ featured_products()  │ fallback products │ fallback products │ mapped (may be [])  │
//! │ homepage_content()   │ fallback homepage │ fallback homepage │ mapped or defaults  │
//! │ products()           │ fallback as ok    │ Error(message)    │ Records | Empty     │
//! │ posts()              │ fallback as ok    │ Error(message)    │ Records | Empty     │
//! │ post(slug)           │ fallback lookup   │ fallback lookup   │ Some | None         │
//! │ page(slug)           │ fallback about    │ fallback about    │ Some | None         │
//! └──────────────────────┴───────────────────┴───────────────────┴─────────────────────┘
//! ```
//!
//! Fallback content is injected at construction; the fetcher never reaches
//! for global defaults.

use std::sync::Arc;

use crumbs_core::fallback::FallbackContent;
use crumbs_core::mapping::{map_homepage, map_page, map_post, map_product};
use crumbs_core::{HomepageContent, Page, Post, Product, FEATURED_LIMIT};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::client::{GraphQlTransport, HttpTransport};
use crate::config::CmsConfig;
use crate::error::{CmsError, CmsResult};
use crate::queries::{
    HomepageData, PageData, PostData, PostsData, GET_HOMEPAGE_CONTENT, GET_PAGE_BY_SLUG,
    GET_POSTS, GET_POST_BY_SLUG, GET_PRODUCTS,
};

/// Shown on the menu when the product fetch fails.
pub const PRODUCTS_ERROR: &str = "Failed to load products. Please try again later.";

/// Shown on the blog when the post fetch fails.
pub const POSTS_ERROR: &str = "Failed to load blog posts. Please try again later.";

/// How many products the menu asks for.
pub const MENU_LIMIT: usize = 100;

/// How many posts the blog index asks for.
pub const BLOG_LIMIT: usize = 10;

// =============================================================================
// Tri-state Result
// =============================================================================

/// What a list fetch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// At least one record.
    Records(Vec<T>),
    /// The CMS answered with nothing.
    Empty,
    /// The fetch failed; the message is safe to show.
    Error(String),
}

impl<T> Fetched<T> {
    pub fn from_records(records: Vec<T>) -> Self {
        if records.is_empty() {
            Fetched::Empty
        } else {
            Fetched::Records(records)
        }
    }

    /// Records, or an empty slice for the other two states.
    pub fn records(&self) -> &[T] {
        match self {
            Fetched::Records(records) => records,
            Fetched::Empty | Fetched::Error(_) => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Fetched::Error(_))
    }
}

// =============================================================================
// Content Fetcher
// =============================================================================

/// Reads storefront content from the CMS, or from the injected fallback.
#[derive(Clone)]
pub struct ContentFetcher {
    transport: Option<Arc<dyn GraphQlTransport>>,
    fallback: Arc<FallbackContent>,
}

impl std::fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

impl ContentFetcher {
    /// Uses `transport` for every fetch.
    pub fn new(transport: Arc<dyn GraphQlTransport>, fallback: FallbackContent) -> Self {
        ContentFetcher {
            transport: Some(transport),
            fallback: Arc::new(fallback),
        }
    }

    /// Never contacts a CMS; every fetch serves the fallback.
    pub fn unconfigured(fallback: FallbackContent) -> Self {
        ContentFetcher {
            transport: None,
            fallback: Arc::new(fallback),
        }
    }

    /// HTTP transport when the config names an http(s) endpoint, otherwise
    /// an unconfigured fetcher.
    ///
    /// ## Errors
    /// Only if the HTTP client cannot be built.
    pub fn from_config(config: &CmsConfig, fallback: FallbackContent) -> CmsResult<Self> {
        match HttpTransport::new(config) {
            Ok(transport) => {
                info!(endpoint = %transport.endpoint(), "CMS configured");
                Ok(ContentFetcher::new(Arc::new(transport), fallback))
            }
            Err(err) if err.is_config_error() => {
                info!(reason = %err, "CMS not configured, serving fallback content");
                Ok(ContentFetcher::unconfigured(fallback))
            }
            Err(err) => Err(err),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    pub fn fallback(&self) -> &FallbackContent {
        &self.fallback
    }

    async fn query<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        document: &str,
        variables: Value,
    ) -> CmsResult<T> {
        let transport = self.transport.as_ref().ok_or(CmsError::NotConfigured)?;
        let data = transport.execute(operation, document, variables).await?;
        Ok(serde_json::from_value(data)?)
    }

    // =========================================================================
    // Home
    // =========================================================================

    /// Products for the home carousel, falling back on any failure.
    pub async fn featured_products(&self) -> Vec<Product> {
        if !self.is_configured() {
            return self.fallback.products.clone();
        }

        let result: CmsResult<PostsData> = self
            .query("GetProducts", GET_PRODUCTS, json!({ "first": FEATURED_LIMIT }))
            .await;

        match result {
            Ok(data) => {
                let nodes = data.posts.map(|c| c.nodes).unwrap_or_default();
                debug!(count = nodes.len(), "Fetched featured products");
                nodes.iter().map(map_product).collect()
            }
            Err(err) => {
                log_failure("featured products", &err);
                self.fallback.products.clone()
            }
        }
    }

    /// Hero copy, falling back on any failure.
    ///
    /// A CMS without homepage fields yields the built-in defaults.
    pub async fn homepage_content(&self) -> HomepageContent {
        if !self.is_configured() {
            return self.fallback.homepage.clone();
        }

        let result: CmsResult<HomepageData> = self
            .query("GetHomepageContent", GET_HOMEPAGE_CONTENT, json!({}))
            .await;

        match result {
            Ok(data) => data
                .page_by
                .and_then(|page| page.homepage_content)
                .map(|raw| map_homepage(&raw))
                .unwrap_or_default(),
            Err(err) => {
                log_failure("homepage content", &err);
                self.fallback.homepage.clone()
            }
        }
    }

    // =========================================================================
    // Menu and Blog
    // =========================================================================

    /// The full product list for the menu.
    pub async fn products(&self) -> Fetched<Product> {
        if !self.is_configured() {
            return Fetched::from_records(self.fallback.products.clone());
        }

        let result: CmsResult<PostsData> = self
            .query("GetProducts", GET_PRODUCTS, json!({ "first": MENU_LIMIT }))
            .await;

        match result {
            Ok(data) => Fetched::from_records(
                data.posts
                    .map(|c| c.nodes)
                    .unwrap_or_default()
                    .iter()
                    .map(map_product)
                    .collect(),
            ),
            Err(err) => {
                log_failure("products", &err);
                Fetched::Error(PRODUCTS_ERROR.to_string())
            }
        }
    }

    /// Posts for the blog index and the sitemap.
    pub async fn posts(&self) -> Fetched<Post> {
        if !self.is_configured() {
            return Fetched::from_records(self.fallback.posts.clone());
        }

        let result: CmsResult<PostsData> = self
            .query("GetPosts", GET_POSTS, json!({ "first": BLOG_LIMIT }))
            .await;

        match result {
            Ok(data) => Fetched::from_records(
                data.posts
                    .map(|c| c.nodes)
                    .unwrap_or_default()
                    .iter()
                    .map(map_post)
                    .collect(),
            ),
            Err(err) => {
                log_failure("posts", &err);
                Fetched::Error(POSTS_ERROR.to_string())
            }
        }
    }

    /// One post by slug; `None` means "Post Not Found".
    pub async fn post(&self, slug: &str) -> Option<Post> {
        if !self.is_configured() {
            return self.fallback.post(slug).cloned();
        }

        let result: CmsResult<PostData> = self
            .query("GetPostBySlug", GET_POST_BY_SLUG, json!({ "slug": slug }))
            .await;

        match result {
            Ok(data) => data.post_by.map(|raw| map_post(&raw)),
            Err(err) => {
                log_failure("post", &err);
                self.fallback.post(slug).cloned()
            }
        }
    }

    /// One page by slug; `None` lets the caller render its own default.
    pub async fn page(&self, slug: &str) -> Option<Page> {
        if !self.is_configured() {
            return self.fallback_page(slug);
        }

        let result: CmsResult<PageData> = self
            .query("GetPageBySlug", GET_PAGE_BY_SLUG, json!({ "slug": slug }))
            .await;

        match result {
            Ok(data) => data.page_by.map(|raw| map_page(&raw)),
            Err(err) => {
                log_failure("page", &err);
                self.fallback_page(slug)
            }
        }
    }

    fn fallback_page(&self, slug: &str) -> Option<Page> {
        self.fallback
            .about
            .as_ref()
            .filter(|page| page.slug == slug)
            .cloned()
    }
}

fn log_failure(what: &'static str, err: &CmsError) {
    if err.is_retryable() {
        warn!(what, error = %err, "CMS fetch failed, using fallback");
    } else {
        error!(what, error = %err, "CMS fetch failed, using fallback");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays one canned answer and records what was asked.
    struct StubTransport {
        answer: Mutex<Option<CmsResult<Value>>>,
        calls: Mutex<Vec<(&'static str, Value)>>,
    }

    impl StubTransport {
        fn answering(answer: CmsResult<Value>) -> Arc<Self> {
            Arc::new(StubTransport {
                answer: Mutex::new(Some(answer)),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(&'static str, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphQlTransport for StubTransport {
        async fn execute(
            &self,
            operation: &'static str,
            _query: &str,
            variables: Value,
        ) -> CmsResult<Value> {
            self.calls.lock().unwrap().push((operation, variables));
            self.answer
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(CmsError::RequestFailed("no more answers".into())))
        }
    }

    fn fetcher(stub: &Arc<StubTransport>) -> ContentFetcher {
        ContentFetcher::new(stub.clone(), FallbackContent::bakery())
    }

    fn posts_payload(count: usize) -> Value {
        let nodes: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "id": format!("p{i}"),
                    "title": format!("Item {i}"),
                    "content": "<p>Fresh</p>",
                    "slug": format!("item-{i}"),
                    "date": "2024-01-15",
                    "author": { "node": { "name": "Sarah Johnson" } }
                })
            })
            .collect();
        json!({ "posts": { "nodes": nodes } })
    }

    #[tokio::test]
    async fn test_unconfigured_serves_fallback() {
        let fetcher = ContentFetcher::unconfigured(FallbackContent::bakery());

        assert_eq!(fetcher.featured_products().await.len(), 6);
        assert_eq!(
            fetcher.homepage_content().await.hero_title,
            "Welcome to Sweet Crumbs Bakery"
        );
        assert_eq!(fetcher.products().await.records().len(), 6);
        assert_eq!(fetcher.posts().await.records().len(), 2);
        assert!(fetcher.post("art-of-sourdough").await.is_some());
        assert_eq!(fetcher.page("about").await.unwrap().title, "About Sweet Crumbs");
        assert!(fetcher.page("team").await.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_empty_fallback_is_empty_state() {
        let fetcher = ContentFetcher::unconfigured(FallbackContent::empty());
        assert_eq!(fetcher.products().await, Fetched::Empty);
        assert!(fetcher.featured_products().await.is_empty());
    }

    #[tokio::test]
    async fn test_featured_requests_six_and_maps() {
        let stub = StubTransport::answering(Ok(posts_payload(3)));
        let products = fetcher(&stub).featured_products().await;

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "Item 0");
        assert_eq!(products[0].category, "Bakery");
        assert_eq!(stub.calls(), vec![("GetProducts", json!({ "first": 6 }))]);
    }

    #[tokio::test]
    async fn test_featured_falls_back_on_error() {
        let stub = StubTransport::answering(Err(CmsError::Timeout));
        let products = fetcher(&stub).featured_products().await;
        assert_eq!(products[0].name, "Fresh Croissants");
    }

    #[tokio::test]
    async fn test_featured_malformed_response_falls_back() {
        let stub = StubTransport::answering(Ok(json!({ "posts": { "nodes": 5 } })));
        let products = fetcher(&stub).featured_products().await;
        assert_eq!(products.len(), 6);
    }

    #[tokio::test]
    async fn test_products_tri_state() {
        let stub = StubTransport::answering(Ok(posts_payload(2)));
        assert!(matches!(fetcher(&stub).products().await, Fetched::Records(r) if r.len() == 2));

        let stub = StubTransport::answering(Ok(posts_payload(0)));
        assert_eq!(fetcher(&stub).products().await, Fetched::Empty);

        let stub = StubTransport::answering(Err(CmsError::HttpStatus { status: 500 }));
        assert_eq!(
            fetcher(&stub).products().await,
            Fetched::Error(PRODUCTS_ERROR.to_string())
        );
    }

    #[tokio::test]
    async fn test_posts_error_message() {
        let stub = StubTransport::answering(Err(CmsError::GraphQl("boom".into())));
        let posts = fetcher(&stub).posts().await;
        assert!(posts.is_error());
        assert!(posts.records().is_empty());
        assert_eq!(posts, Fetched::Error(POSTS_ERROR.to_string()));
    }

    #[tokio::test]
    async fn test_posts_request_ten() {
        let stub = StubTransport::answering(Ok(posts_payload(1)));
        let posts = fetcher(&stub).posts().await;
        assert_eq!(posts.records()[0].author, "Sarah Johnson");
        assert_eq!(stub.calls(), vec![("GetPosts", json!({ "first": 10 }))]);
    }

    #[tokio::test]
    async fn test_homepage_without_fields_uses_defaults() {
        let stub = StubTransport::answering(Ok(json!({ "pageBy": null })));
        let content = fetcher(&stub).homepage_content().await;
        assert_eq!(content, HomepageContent::default());
    }

    #[tokio::test]
    async fn test_post_not_found_and_fallback_on_error() {
        let stub = StubTransport::answering(Ok(json!({ "postBy": null })));
        assert!(fetcher(&stub).post("art-of-sourdough").await.is_none());

        let stub = StubTransport::answering(Err(CmsError::Timeout));
        let post = fetcher(&stub).post("art-of-sourdough").await.unwrap();
        assert_eq!(post.author, "Sarah Johnson");
        assert_eq!(
            stub.calls(),
            vec![("GetPostBySlug", json!({ "slug": "art-of-sourdough" }))]
        );
    }

    #[tokio::test]
    async fn test_page_mapped() {
        let stub = StubTransport::answering(Ok(json!({
            "pageBy": { "id": "a", "title": "Our Bakery", "content": "<p>Hi</p>", "slug": "about" }
        })));
        let page = fetcher(&stub).page("about").await.unwrap();
        assert_eq!(page.title, "Our Bakery");
    }

    #[test]
    fn test_from_config_unconfigured() {
        let fetcher =
            ContentFetcher::from_config(&CmsConfig::default(), FallbackContent::empty()).unwrap();
        assert!(!fetcher.is_configured());

        let fetcher = ContentFetcher::from_config(
            &CmsConfig::new("https://cms.test/graphql"),
            FallbackContent::empty(),
        )
        .unwrap();
        assert!(fetcher.is_configured());
    }
}
