//! # Query Documents
//!
//! The GraphQL documents the storefront sends and the `data` shapes they
//! come back in. The schema belongs to the CMS; these only name the fields
//! we read.

use crumbs_core::mapping::{Connection, RawHomepageContent, RawPage, RawPost};
use serde::Deserialize;

/// Posts used as products (home carousel and menu).
pub const GET_PRODUCTS: &str = r#"
query GetProducts($first: Int = 100) {
  posts(first: $first) {
    nodes {
      id
      databaseId
      title
      content
      slug
      featuredImage {
        node {
          sourceUrl
          altText
        }
      }
    }
  }
}
"#;

/// Hero and section copy stored on the `/homepage/` page.
pub const GET_HOMEPAGE_CONTENT: &str = r#"
query GetHomepageContent {
  pageBy(uri: "/homepage/") {
    title
    homepageContent {
      heroTitle
      heroSubtitle
      heroBgImage {
        node {
          sourceUrl
          altText
        }
      }
      featuredProductsSectionTitle
    }
  }
}
"#;

/// Blog index.
pub const GET_POSTS: &str = r#"
query GetPosts($first: Int = 10) {
  posts(first: $first) {
    nodes {
      id
      databaseId
      title
      excerpt
      content
      slug
      date
      author {
        node {
          name
        }
      }
      featuredImage {
        node {
          sourceUrl
          altText
        }
      }
    }
  }
}
"#;

/// One blog post.
pub const GET_POST_BY_SLUG: &str = r#"
query GetPostBySlug($slug: String!) {
  postBy(slug: $slug) {
    id
    databaseId
    title
    excerpt
    content
    slug
    date
    author {
      node {
        name
      }
    }
    featuredImage {
      node {
        sourceUrl
        altText
      }
    }
  }
}
"#;

/// One CMS page.
pub const GET_PAGE_BY_SLUG: &str = r#"
query GetPageBySlug($slug: String!) {
  pageBy(slug: $slug) {
    id
    databaseId
    title
    content
    slug
    featuredImage {
      node {
        sourceUrl
        altText
      }
    }
  }
}
"#;

// =============================================================================
// Response Data Shapes
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct PostsData {
    pub posts: Option<Connection<RawPost>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageData {
    pub page_by: Option<HomepagePage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepagePage {
    pub homepage_content: Option<RawHomepageContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub post_by: Option<RawPost>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub page_by: Option<RawPage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_queries_name_their_roots() {
        assert!(GET_PRODUCTS.contains("posts(first: $first)"));
        assert!(GET_HOMEPAGE_CONTENT.contains(r#"pageBy(uri: "/homepage/")"#));
        assert!(GET_POST_BY_SLUG.contains("postBy(slug: $slug)"));
        assert!(GET_PAGE_BY_SLUG.contains("pageBy(slug: $slug)"));
    }

    #[test]
    fn test_homepage_data_shape() {
        let data: HomepageData = serde_json::from_value(json!({
            "pageBy": {
                "title": "Homepage",
                "homepageContent": { "heroTitle": "Hi" }
            }
        }))
        .unwrap();
        let content = data.page_by.unwrap().homepage_content.unwrap();
        assert_eq!(content.hero_title.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_posts_data_null_connection() {
        let data: PostsData = serde_json::from_value(json!({ "posts": null })).unwrap();
        assert!(data.posts.is_none());
    }
}
