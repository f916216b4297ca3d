//! Static assets compiled into the binary and served under `/static/`.

use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::SiteError;

const SITE_CSS: &str = include_str!("../static/site.css");
const CAROUSEL_JS: &str = include_str!("../static/carousel.js");
const PLACEHOLDER_SVG: &str = include_str!("../static/placeholder.svg");

const CACHE_CONTROL: &str = "public, max-age=3600";

/// `(file name, content type, body)` for every bundled asset.
const ASSETS: &[(&str, &str, &str)] = &[
    ("site.css", "text/css; charset=utf-8", SITE_CSS),
    ("carousel.js", "text/javascript; charset=utf-8", CAROUSEL_JS),
    ("placeholder.svg", "image/svg+xml", PLACEHOLDER_SVG),
];

/// Looks up a bundled asset by file name.
pub fn lookup(name: &str) -> Option<(&'static str, &'static str)> {
    ASSETS
        .iter()
        .find(|(file, _, _)| *file == name)
        .map(|(_, content_type, body)| (*content_type, *body))
}

/// `GET /static/{file}`
pub async fn serve(Path(file): Path<String>) -> Result<Response, SiteError> {
    let (content_type, body) =
        lookup(&file).ok_or_else(|| SiteError::NotFound(format!("/static/{file}")))?;
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let (content_type, body) = lookup("carousel.js").unwrap();
        assert_eq!(content_type, "text/javascript; charset=utf-8");
        assert!(body.contains("/live/carousel") || body.contains("dataset.live"));
        assert!(lookup("placeholder.svg").unwrap().1.starts_with("<svg"));
        assert!(lookup("../Cargo.toml").is_none());
    }
}
