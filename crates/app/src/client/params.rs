//! Query-parameter sanitizing.
//!
//! The upstream API is forgiving, but we never forward junk: empty values,
//! `"all"` placeholders, out-of-range page numbers and unknown ordering keys
//! are filtered out here, before anything reaches the HTTP layer.

/// Default page size applied when a size value fails to parse.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Upper bound accepted for `page_size`/`limit`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Ordering keys the backend accepts. Anything else is dropped silently.
const ALLOWED_ORDERING: &[&str] = &[
    "-created_at",
    "created_at",
    "-views_count",
    "views_count",
    "-id",
    "id",
    "title",
    "-title",
    "-updated_at",
    "updated_at",
    "-is_hot",
    "is_hot",
    "-is_recommended",
    "is_recommended",
    "expires_at",
    "-expires_at",
    "-rating",
    "rating",
    "name",
    "-name",
    "-promocodes_count",
    "promocodes_count",
];

const ALLOWED_OFFER_TYPES: &[&str] = &["coupon", "deal", "financial", "cashback"];

/// Map a store-catalog sort key to a backend ordering string.
///
/// Unknown or missing keys fall back to alphabetical order.
pub fn store_sort_ordering(sort: Option<&str>) -> &'static str {
    match sort {
        Some("name-desc") => "-name",
        Some("rating-desc") => "-rating",
        Some("rating-asc") => "rating",
        Some("newest") => "-created_at",
        _ => "name",
    }
}

/// Sanitized query parameters for an upstream request.
///
/// Keys are inserted in call order; disallowed or empty values never make it
/// into the collection.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, applying the sanitizing rules for `key`.
    pub fn push(&mut self, key: &str, value: &str) {
        let value = value.trim();

        if value.is_empty() || value == "all" || value == "undefined" {
            return;
        }

        match key {
            "page" => {
                let page = value.parse::<u32>().unwrap_or(1).max(1);
                self.entries.push((key.to_owned(), page.to_string()));
            }
            "page_size" | "limit" => {
                let size = value
                    .parse::<u32>()
                    .unwrap_or(DEFAULT_PAGE_SIZE)
                    .clamp(1, MAX_PAGE_SIZE);
                self.entries.push((key.to_owned(), size.to_string()));
            }
            "ordering" => {
                if ALLOWED_ORDERING.contains(&value) {
                    self.entries.push((key.to_owned(), value.to_owned()));
                }
            }
            "offer_type" => {
                if ALLOWED_OFFER_TYPES.contains(&value) {
                    self.entries.push((key.to_owned(), value.to_owned()));
                }
            }
            _ => {
                self.entries.push((key.to_owned(), value.to_owned()));
            }
        }
    }

    /// Insert a pair when `value` is present.
    pub fn push_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Insert a numeric pair, subject to the same clamping rules.
    pub fn push_num(&mut self, key: &str, value: u32) {
        self.push(key, &value.to_string());
    }

    /// Insert a numeric pair when `value` is present.
    pub fn push_opt_num(&mut self, key: &str, value: Option<u32>) {
        if let Some(value) = value {
            self.push_num(key, value);
        }
    }

    /// Insert a boolean flag when `value` is present.
    pub fn push_opt_bool(&mut self, key: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.push(key, if value { "true" } else { "false" });
        }
    }

    /// The sanitized pairs, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Whether any pair survived sanitizing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
        params
            .entries()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn drops_empty_and_placeholder_values() {
        let mut params = QueryParams::new();
        params.push("search", "");
        params.push("category", "all");
        params.push("store", "undefined");
        params.push("search", "   ");

        assert!(params.is_empty(), "placeholder values should be dropped");
    }

    #[test]
    fn clamps_negative_page_to_one() {
        let mut params = QueryParams::new();
        params.push("page", "-3");

        assert_eq!(get(&params, "page"), Some("1"));
    }

    #[test]
    fn non_numeric_limit_falls_back_to_default() {
        let mut params = QueryParams::new();
        params.push("limit", "lots");

        assert_eq!(get(&params, "limit"), Some("12"));
    }

    #[test]
    fn oversized_page_size_is_capped() {
        let mut params = QueryParams::new();
        params.push("page_size", "500");

        assert_eq!(get(&params, "page_size"), Some("100"));
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let mut params = QueryParams::new();
        params.push("page_size", "0");

        assert_eq!(get(&params, "page_size"), Some("1"));
    }

    #[test]
    fn disallowed_ordering_is_dropped() {
        let mut params = QueryParams::new();
        params.push("ordering", "password");
        params.push("ordering", "-rating");

        assert_eq!(params.entries().len(), 1, "only the valid key survives");
        assert_eq!(get(&params, "ordering"), Some("-rating"));
    }

    #[test]
    fn disallowed_offer_type_is_dropped() {
        let mut params = QueryParams::new();
        params.push("offer_type", "bogus");
        params.push("offer_type", "cashback");

        assert_eq!(get(&params, "offer_type"), Some("cashback"));
    }

    #[test]
    fn free_text_values_are_trimmed() {
        let mut params = QueryParams::new();
        params.push("search", "  laptops  ");

        assert_eq!(get(&params, "search"), Some("laptops"));
    }

    #[test]
    fn sort_keys_map_to_backend_ordering() {
        assert_eq!(store_sort_ordering(Some("name-asc")), "name");
        assert_eq!(store_sort_ordering(Some("name-desc")), "-name");
        assert_eq!(store_sort_ordering(Some("rating-desc")), "-rating");
        assert_eq!(store_sort_ordering(Some("newest")), "-created_at");
        assert_eq!(store_sort_ordering(Some("mystery")), "name");
        assert_eq!(store_sort_ordering(None), "name");
    }
}
