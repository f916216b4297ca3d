//! # Sitemap
//!
//! Builds `sitemap.xml` from the static routes plus one entry per blog post.
//!
//! | Route     | Priority | Change frequency |
//! |-----------|----------|------------------|
//! | `/`       | 1.0      | daily            |
//! | `/about`  | 0.8      | monthly          |
//! | `/menu`   | 0.9      | weekly           |
//! | `/blog`   | 0.7      | weekly           |
//! | `/contact`| 0.6      | monthly          |
//! | posts     | 0.6      | monthly          |
//!
//! Static routes carry the generation date as `lastmod`; posts carry their
//! own publication date when it parses.

use chrono::NaiveDate;

use crate::seo::absolute_url;
use crate::types::Post;

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: Option<NaiveDate>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const STATIC_ROUTES: &[(&str, ChangeFrequency, f32)] = &[
    ("/", ChangeFrequency::Daily, 1.0),
    ("/about", ChangeFrequency::Monthly, 0.8),
    ("/menu", ChangeFrequency::Weekly, 0.9),
    ("/blog", ChangeFrequency::Weekly, 0.7),
    ("/contact", ChangeFrequency::Monthly, 0.6),
];

/// Static routes followed by one entry per post with a slug.
pub fn sitemap_entries(base_url: &str, today: NaiveDate, posts: &[Post]) -> Vec<SitemapEntry> {
    let statics = STATIC_ROUTES
        .iter()
        .map(|(path, freq, priority)| SitemapEntry {
            loc: absolute_url(base_url, path),
            last_modified: Some(today),
            change_frequency: *freq,
            priority: *priority,
        });

    let dynamic = posts
        .iter()
        .filter(|post| !post.slug.is_empty())
        .map(|post| SitemapEntry {
            loc: absolute_url(base_url, &post.permalink()),
            last_modified: post.published_on(),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.6,
        });

    statics.chain(dynamic).collect()
}

/// Serialises entries as a sitemaps.org `urlset`.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(day) = entry.last_modified {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", day.format("%Y-%m-%d")));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackContent;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_static_routes_only() {
        let entries = sitemap_entries("https://sweetcrumbs.com", today(), &[]);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].loc, "https://sweetcrumbs.com/");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[2].loc, "https://sweetcrumbs.com/menu");
        assert_eq!(entries[2].change_frequency, ChangeFrequency::Weekly);
    }

    #[test]
    fn test_posts_appended_with_own_date() {
        let posts = FallbackContent::bakery().posts;
        let entries = sitemap_entries("https://sweetcrumbs.com", today(), &posts);
        assert_eq!(entries.len(), 7);

        let post = &entries[5];
        assert_eq!(post.loc, "https://sweetcrumbs.com/blog/art-of-sourdough");
        assert_eq!(post.last_modified, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(post.change_frequency, ChangeFrequency::Monthly);
    }

    #[test]
    fn test_posts_without_slug_skipped() {
        let posts = crate::fallback::placeholder_posts();
        let entries = sitemap_entries("https://sweetcrumbs.com", today(), &posts);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_render_xml() {
        let entries = sitemap_entries("https://x.com/?a=1&b=2", today(), &[]);
        let xml = render_sitemap(&entries[..1]);

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://x.com/?a=1&amp;b=2/</loc>"));
        assert!(xml.contains("<lastmod>2024-02-01</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
