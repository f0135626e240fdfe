//! Catalog collection derivation and the product filter predicate.
//!
//! Pure functions over product lists; the stateful wrapper lives in
//! [`store`]. Collections are derived wholesale whenever the product list
//! changes, mirroring the frontend contract.

mod store;

pub use store::*;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::{FilterMode, Product, ProductFilterState};

/// Derived sub-collections recomputed from the full product list.
#[derive(Debug, Clone, Default)]
pub struct ProductCollections {
    /// id -> Product lookup; last entry wins on duplicate ids.
    pub by_id: HashMap<String, Product>,
    /// Products flagged hot, in original relative order.
    pub hot: Vec<Product>,
    /// Products flagged latest, newest `created_at` first.
    pub latest: Vec<Product>,
}

/// Parse a product timestamp, treating absent or unparseable values as epoch
/// so they sort last in newest-first orderings.
pub fn parse_timestamp(value: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = value else {
        return DateTime::<Utc>::UNIX_EPOCH;
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.and_utc();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc();
        }
    }

    DateTime::<Utc>::UNIX_EPOCH
}

/// Build the derived collections from the full product list.
pub fn build_collections(products: &[Product]) -> ProductCollections {
    let mut by_id = HashMap::new();
    for p in products {
        if !p.id.is_empty() {
            by_id.insert(p.id.clone(), p.clone());
        }
    }

    let hot: Vec<Product> = products.iter().filter(|p| p.is_hot).cloned().collect();

    let mut latest: Vec<Product> = products.iter().filter(|p| p.is_latest).cloned().collect();
    // Stable sort keeps input order for equal timestamps.
    latest.sort_by_key(|p| std::cmp::Reverse(parse_timestamp(p.created_at.as_deref())));

    ProductCollections { by_id, hot, latest }
}

/// Merge a saved product into a list: replace in place when the id is already
/// present, otherwise prepend as the newest entry.
pub fn upsert_in_list(mut list: Vec<Product>, saved: Product) -> Vec<Product> {
    match list.iter().position(|p| p.id == saved.id) {
        Some(idx) => {
            list[idx] = saved;
            list
        }
        None => {
            list.insert(0, saved);
            list
        }
    }
}

/// Apply the filter state over the selected base collection.
///
/// All active constraints are ANDed; an empty size/color set means no
/// constraint. Price bounds are inclusive.
pub fn apply_filters(
    filters: &ProductFilterState,
    latest: &[Product],
    hot: &[Product],
    all: &[Product],
) -> Vec<Product> {
    let base = match filters.mode {
        FilterMode::Latest => latest,
        FilterMode::Hot => hot,
        FilterMode::All => all,
    };

    let query = filters.search_term.trim().to_lowercase();

    base.iter()
        .filter(|p| {
            if !query.is_empty() {
                let matches_search = p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query);
                if !matches_search {
                    return false;
                }
            }

            if !filters.sizes.is_empty() {
                let has_size = p.sizes.iter().any(|s| filters.sizes.contains(s));
                if !has_size {
                    return false;
                }
            }

            if !filters.colors.is_empty() {
                let Some(color) = &p.color else {
                    return false;
                };
                let normalized = color.to_lowercase();
                let matches_color = filters
                    .colors
                    .iter()
                    .any(|c| normalized.contains(&c.to_lowercase()));
                if !matches_color {
                    return false;
                }
            }

            if let Some(min) = filters.min_price {
                if p.price < min {
                    return false;
                }
            }
            if let Some(max) = filters.max_price {
                if p.price > max {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Size;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            price: 10.0,
            gallery: None,
            images: None,
            image_url: String::new(),
            category: "Dresses".to_string(),
            sizes: vec![Size::M],
            color: None,
            is_hot: false,
            is_latest: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_collections_hot_and_latest() {
        let mut p1 = product("1");
        p1.is_hot = true;
        p1.price = 50.0;
        let mut p2 = product("2");
        p2.is_latest = true;
        p2.price = 80.0;
        p2.created_at = Some("2024-01-02".to_string());
        let mut p3 = product("3");
        p3.is_latest = true;
        p3.price = 20.0;
        p3.created_at = Some("2024-01-03".to_string());

        let collections = build_collections(&[p1, p2, p3]);

        let hot_ids: Vec<&str> = collections.hot.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(hot_ids, vec!["1"]);

        // 3 is newer than 2, so it sorts first
        let latest_ids: Vec<&str> = collections.latest.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(latest_ids, vec!["3", "2"]);

        assert_eq!(collections.by_id.len(), 3);
        assert_eq!(collections.by_id["2"].price, 80.0);
    }

    #[test]
    fn test_missing_created_at_sorts_last() {
        let mut p1 = product("dated");
        p1.is_latest = true;
        p1.created_at = Some("2024-06-01T10:00:00Z".to_string());
        let mut p2 = product("undated");
        p2.is_latest = true;

        let collections = build_collections(&[p2, p1]);
        let ids: Vec<&str> = collections.latest.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["dated", "undated"]);
    }

    #[test]
    fn test_latest_ties_keep_input_order() {
        let mut a = product("a");
        a.is_latest = true;
        a.created_at = Some("2024-01-01".to_string());
        let mut b = product("b");
        b.is_latest = true;
        b.created_at = Some("2024-01-01".to_string());

        let collections = build_collections(&[a, b]);
        let ids: Vec<&str> = collections.latest.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_ids_last_wins_in_map() {
        let mut first = product("dup");
        first.price = 10.0;
        let mut second = product("dup");
        second.price = 99.0;

        let collections = build_collections(&[first, second]);
        assert_eq!(collections.by_id["dup"].price, 99.0);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let list = vec![product("a"), product("b"), product("c")];
        let mut updated = product("b");
        updated.price = 123.0;

        let result = upsert_in_list(list, updated);

        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(result[1].price, 123.0);
    }

    #[test]
    fn test_upsert_prepends_new() {
        let list = vec![product("a"), product("b")];
        let result = upsert_in_list(list, product("new"));

        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "a", "b"]);
    }

    #[test]
    fn test_search_filter_matches_name() {
        let mut dress = product("1");
        dress.name = "Pink Dress".to_string();
        let mut jeans = product("2");
        jeans.name = "Blue Jeans".to_string();
        let all = vec![dress, jeans];

        let filters = ProductFilterState {
            search_term: "jeans".to_string(),
            ..Default::default()
        };

        let result = apply_filters(&filters, &[], &[], &all);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Blue Jeans");
    }

    #[test]
    fn test_color_filter_substring_case_insensitive() {
        let mut pink = product("1");
        pink.color = Some("Pink Floral".to_string());
        let mut blue = product("2");
        blue.color = Some("Blue".to_string());
        let no_color = product("3");
        let all = vec![pink, blue, no_color];

        let filters = ProductFilterState {
            colors: vec!["pink".to_string()],
            ..Default::default()
        };

        let result = apply_filters(&filters, &[], &[], &all);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_size_filter_needs_overlap() {
        let mut small = product("1");
        small.sizes = vec![Size::XS, Size::S];
        let mut large = product("2");
        large.sizes = vec![Size::L, Size::XL];
        let mut none = product("3");
        none.sizes = vec![];
        let all = vec![small, large, none];

        let filters = ProductFilterState {
            sizes: vec![Size::S, Size::M],
            ..Default::default()
        };

        let result = apply_filters(&filters, &[], &[], &all);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let mut cheap = product("cheap");
        cheap.price = 10.0;
        let mut mid = product("mid");
        mid.price = 50.0;
        let mut pricey = product("pricey");
        pricey.price = 100.0;
        let all = vec![cheap, mid, pricey];

        let filters = ProductFilterState {
            min_price: Some(50.0),
            max_price: Some(100.0),
            ..Default::default()
        };

        let result = apply_filters(&filters, &[], &[], &all);
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["mid", "pricey"]);
    }

    #[test]
    fn test_filters_are_conjunctive_over_base_mode() {
        let mut hot_pink = product("hot-pink");
        hot_pink.is_hot = true;
        hot_pink.color = Some("Pink".to_string());
        hot_pink.price = 30.0;
        let mut hot_blue = product("hot-blue");
        hot_blue.is_hot = true;
        hot_blue.color = Some("Blue".to_string());
        hot_blue.price = 30.0;
        let mut cold_pink = product("cold-pink");
        cold_pink.color = Some("Pink".to_string());

        let all = vec![hot_pink, hot_blue, cold_pink];
        let collections = build_collections(&all);

        let filters = ProductFilterState {
            mode: FilterMode::Hot,
            colors: vec!["Pink".to_string()],
            max_price: Some(40.0),
            ..Default::default()
        };

        let result = apply_filters(&filters, &collections.latest, &collections.hot, &all);
        // Result is a subset of the hot base list and satisfies every constraint.
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "hot-pink");
    }

    #[test]
    fn test_empty_constraint_sets_match_everything() {
        let all = vec![product("a"), product("b")];
        let filters = ProductFilterState::default();

        let result = apply_filters(&filters, &[], &[], &all);
        assert_eq!(result.len(), 2);
    }
}
