//! Pagination info, computed client-side.
//!
//! Two sources: upstream DRF envelopes (`count`/`next`/`previous`) for
//! API-paginated lists, and in-memory slicing for the listings we filter and
//! sort ourselves (hot page, category catalog).

use serde::{Deserialize, Serialize};

/// Pagination state for a rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    /// Build from an upstream paginated envelope.
    ///
    /// `has_next`/`has_previous` come from the envelope's page URLs, not
    /// from arithmetic, so they stay truthful even if the backend's page
    /// size differs from ours.
    #[must_use]
    pub fn from_upstream(
        count: u64,
        page: u32,
        per_page: u32,
        next: Option<&str>,
        previous: Option<&str>,
    ) -> Self {
        let per_page = per_page.max(1);

        Self {
            current_page: page.max(1),
            total_pages: total_pages(count, per_page),
            total_items: count,
            items_per_page: per_page,
            has_next: next.is_some(),
            has_previous: previous.is_some(),
        }
    }
}

fn total_pages(count: u64, per_page: u32) -> u32 {
    let pages = count.div_ceil(u64::from(per_page));

    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice `items` down to one page and describe the result.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> (Vec<T>, PageInfo) {
    let page = page.max(1);
    let per_page = per_page.max(1);

    let total = items.len() as u64;
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let end = start.saturating_add(per_page as usize);

    let page_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    let info = PageInfo {
        current_page: page,
        total_pages: total_pages(total, per_page),
        total_items: total,
        items_per_page: per_page,
        has_next: (end as u64) < total,
        has_previous: page > 1,
    };

    (page_items, info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_second_of_two_pages() {
        // 30 items at page size 18, requesting page 2.
        let info = PageInfo::from_upstream(30, 2, 18, None, Some("/stores/?page=1"));

        assert_eq!(info.total_pages, 2);
        assert!(info.has_previous);
        assert!(!info.has_next);
        assert_eq!(info.total_items, 30);
    }

    #[test]
    fn upstream_zero_items_is_zero_pages() {
        let info = PageInfo::from_upstream(0, 1, 12, None, None);

        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
        assert!(!info.has_previous);
    }

    #[test]
    fn in_memory_pagination_slices_and_describes() {
        let items: Vec<u32> = (0..30).collect();

        let (page_items, info) = paginate(items, 2, 18);

        assert_eq!(page_items.len(), 12);
        assert_eq!(page_items.first(), Some(&18));
        assert_eq!(info.total_pages, 2);
        assert!(info.has_previous);
        assert!(!info.has_next);
    }

    #[test]
    fn page_past_the_end_is_empty_but_described() {
        let items: Vec<u32> = (0..5).collect();

        let (page_items, info) = paginate(items, 9, 12);

        assert!(page_items.is_empty());
        assert_eq!(info.current_page, 9);
        assert!(info.has_previous);
        assert!(!info.has_next);
    }

    #[test]
    fn garbage_page_numbers_are_clamped() {
        let items: Vec<u32> = (0..3).collect();

        let (page_items, info) = paginate(items, 0, 0);

        assert_eq!(info.current_page, 1);
        assert_eq!(info.items_per_page, 1);
        assert_eq!(page_items.len(), 1);
    }
}
