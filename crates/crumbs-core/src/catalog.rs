//! # Catalog Filtering
//!
//! The menu page's category filter.
//!
//! ```text
//!   all products ──┬──► category_options()  = ["All", "Pastries", "Breads", ...]
//!                  │         (always from the UNFILTERED list)
//!                  │
//!                  └──► filter_by_category(selected) ──► cards shown
//! ```
//!
//! Both functions preserve input order and never reorder or dedupe items.

/// The option that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Anything that belongs to a named category.
pub trait Categorized {
    fn category(&self) -> &str;
}

/// Items whose category equals `selected`, in their original order.
///
/// `"All"` returns the full input unchanged. Matching is exact.
///
/// ## Example
/// ```rust
/// use crumbs_core::catalog::filter_by_category;
/// use crumbs_core::fallback::FallbackContent;
///
/// let products = FallbackContent::bakery().products;
/// let breads = filter_by_category(&products, "Breads");
/// assert_eq!(breads.len(), 2);
/// assert_eq!(filter_by_category(&products, "All").len(), products.len());
/// ```
pub fn filter_by_category<T: Categorized + Clone>(items: &[T], selected: &str) -> Vec<T> {
    if selected == ALL_CATEGORIES {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.category() == selected)
        .cloned()
        .collect()
}

/// `"All"` followed by each distinct category in first-seen order.
pub fn category_options<T: Categorized>(items: &[T]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        let category = item.category();
        if !options.iter().any(|seen| seen == category) {
            options.push(category.to_string());
        }
    }
    options
}

/// Normalises a `?category=` value against the available options.
///
/// Unknown or missing selections fall back to `"All"`.
pub fn resolve_selection(options: &[String], requested: Option<&str>) -> String {
    match requested {
        Some(wanted) if options.iter().any(|o| o == wanted) => wanted.to_string(),
        _ => ALL_CATEGORIES.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str, &'static str);

    impl Categorized for Item {
        fn category(&self) -> &str {
            self.1
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item("croissant", "Pastries"),
            Item("sourdough", "Breads"),
            Item("eclair", "Desserts"),
            Item("roll", "Pastries"),
            Item("tart", "Desserts"),
            Item("wheat", "Breads"),
        ]
    }

    #[test]
    fn test_all_returns_everything_in_order() {
        assert_eq!(filter_by_category(&items(), "All"), items());
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let pastries = filter_by_category(&items(), "Pastries");
        assert_eq!(pastries, vec![Item("croissant", "Pastries"), Item("roll", "Pastries")]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        for category in ["Breads", "Desserts", "Pastries", "Cookies", "All"] {
            let once = filter_by_category(&items(), category);
            let twice = filter_by_category(&once, category);
            assert_eq!(once, twice, "category {category}");
        }
    }

    #[test]
    fn test_unknown_category_is_empty() {
        assert!(filter_by_category(&items(), "Cookies").is_empty());
        assert!(filter_by_category(&items(), "pastries").is_empty());
    }

    #[test]
    fn test_category_options_distinct_first_seen() {
        assert_eq!(
            category_options(&items()),
            vec!["All", "Pastries", "Breads", "Desserts"]
        );
        assert_eq!(category_options::<Item>(&[]), vec!["All"]);
    }

    #[test]
    fn test_options_stable_across_filtering() {
        let all = items();
        let before = category_options(&all);
        let _ = filter_by_category(&all, "Breads");
        assert_eq!(category_options(&all), before);
    }

    #[test]
    fn test_resolve_selection() {
        let options = category_options(&items());
        assert_eq!(resolve_selection(&options, Some("Breads")), "Breads");
        assert_eq!(resolve_selection(&options, Some("Cookies")), "All");
        assert_eq!(resolve_selection(&options, None), "All");
    }
}
