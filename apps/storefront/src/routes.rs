//! # HTTP Routes
//!
//! ```text
//! ┌────────────────────┬────────┬──────────────────────────────────────────┐
//! │ Path               │ Method │ Handler                                  │
//! ├────────────────────┼────────┼──────────────────────────────────────────┤
//! │ /                  │ GET    │ hero + carousel at ?slide=k + CTA        │
//! │ /menu              │ GET    │ product grid filtered by ?category=      │
//! │ /blog              │ GET    │ post list                                │
//! │ /blog/{slug}       │ GET    │ single post, 404 page when missing       │
//! │ /about             │ GET    │ CMS about page or built-in story         │
//! │ /contact           │ GET    │ blank form                               │
//! │ /contact           │ POST   │ validate, submit via gateway, re-render  │
//! │ /api/contact       │ POST   │ JSON in, {message} / {error} out         │
//! │ /sitemap.xml       │ GET    │ static routes + one entry per post       │
//! │ /health            │ GET    │ "OK"                                     │
//! │ /live/carousel     │ GET    │ WebSocket upgrade                        │
//! │ /static/{file}     │ GET    │ bundled CSS / JS / SVG                   │
//! └────────────────────┴────────┴──────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use crumbs_core::carousel::Carousel;
use crumbs_core::sitemap::{render_sitemap, sitemap_entries};
use crumbs_core::validation::{validate_contact_form, ContactForm};
use maud::Markup;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::assets;
use crate::contact::{ContactReply, REJECTED_MESSAGE, SUCCESS_MESSAGE};
use crate::error::SiteError;
use crate::live::carousel_socket;
use crate::render::{self, ContactView, PageContext};
use crate::state::AppState;

/// Builds the storefront router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/menu", get(menu))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(blog_post))
        .route("/about", get(about))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/api/contact", post(api_contact))
        .route("/sitemap.xml", get(sitemap))
        .route("/health", get(health))
        .route("/live/carousel", get(carousel_socket))
        .route("/static/{file}", get(assets::serve))
        .fallback(not_found)
        .with_state(state)
}

fn page_context(state: &AppState) -> PageContext<'_> {
    PageContext::new(&state.config().site, state.business())
}

// =============================================================================
// Pages
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Kept as text so a bad value renders slide 0 instead of a 400.
    pub slide: Option<String>,
}

async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> Markup {
    let fetcher = state.fetcher();
    let (content, products) = tokio::join!(fetcher.homepage_content(), fetcher.featured_products());

    let mut carousel = Carousel::featured(products);
    if let Some(index) = query.slide.as_deref().and_then(|s| s.parse::<usize>().ok()) {
        if let Err(e) = carousel.go_to(index) {
            debug!(index, error = %e, "Ignoring slide outside the carousel");
        }
    }

    render::home::render(&page_context(&state), &content, &carousel)
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

async fn menu(State(state): State<AppState>, Query(query): Query<MenuQuery>) -> Markup {
    let products = state.fetcher().products().await;
    render::menu::render(&page_context(&state), &products, query.category.as_deref())
}

async fn blog_index(State(state): State<AppState>) -> Markup {
    let posts = state.fetcher().posts().await;
    render::blog::index(&page_context(&state), &posts)
}

async fn blog_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let post = state.fetcher().post(&slug).await;
    let ctx = page_context(&state);
    match post {
        Some(post) => render::blog::post(&ctx, &post).into_response(),
        None => {
            debug!(%slug, "Blog post not found");
            (StatusCode::NOT_FOUND, render::blog::not_found(&ctx)).into_response()
        }
    }
}

async fn about(State(state): State<AppState>) -> Markup {
    let page = state.fetcher().page("about").await;
    render::about::render(&page_context(&state), page.as_ref())
}

// =============================================================================
// Contact
// =============================================================================

async fn contact_page(State(state): State<AppState>) -> Markup {
    render::contact::render(&page_context(&state), &ContactView::blank())
}

async fn contact_submit(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Markup {
    let view = match validate_contact_form(&form) {
        Err(errors) => {
            debug!(errors = errors.len(), "Contact form rejected by validation");
            ContactView::invalid(form, errors)
        }
        Ok(()) => {
            let outcome = state.gateway().submit(&form).await;
            info!(success = outcome.is_success(), "Contact form submitted");
            ContactView::submitted(form, outcome)
        }
    };
    render::contact::render(&page_context(&state), &view)
}

async fn api_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactForm>, JsonRejection>,
) -> Response {
    let Json(form) = match body {
        Ok(form) => form,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable contact request");
            return reply(StatusCode::BAD_REQUEST, ContactReply::rejected("Invalid request body"));
        }
    };

    if let Err(errors) = validate_contact_form(&form) {
        let message = errors.first_message().unwrap_or_else(|| REJECTED_MESSAGE.to_string());
        return reply(StatusCode::BAD_REQUEST, ContactReply::rejected(message));
    }

    match state.inbox().deliver(&form).await {
        Ok(receipt) => {
            debug!(reference = %receipt.reference, "Contact message accepted");
            reply(StatusCode::OK, ContactReply::accepted(SUCCESS_MESSAGE))
        }
        Err(e) => {
            error!(error = %e, "Contact inbox failed");
            reply(StatusCode::INTERNAL_SERVER_ERROR, ContactReply::rejected(REJECTED_MESSAGE))
        }
    }
}

fn reply(status: StatusCode, body: ContactReply) -> Response {
    (status, Json(body)).into_response()
}

// =============================================================================
// Infrastructure
// =============================================================================

async fn sitemap(State(state): State<AppState>) -> Response {
    let posts = state.fetcher().posts().await;
    let today = chrono::Utc::now().date_naive();
    let entries = sitemap_entries(state.base_url(), today, posts.records());
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&entries),
    )
        .into_response()
}

async fn health() -> impl IntoResponse {
    "OK"
}

async fn not_found(uri: Uri) -> SiteError {
    SiteError::NotFound(uri.path().to_string())
}
