//! This module defines the common functionality for paging data.

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to use when none has been chosen yet.
    pub default_page: u64,
    /// The number of transactions to display per page by default.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// The sub-slice of `items` belonging to the 1-indexed `page`.
///
/// Out-of-range pages yield an empty slice rather than an error, so callers
/// may hold on to a stale page number after the underlying data shrinks.
pub fn page_slice<T>(items: &[T], page: u64, page_size: u64) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let start = usize::try_from(start).unwrap_or(usize::MAX);
    let page_size = usize::try_from(page_size).unwrap_or(usize::MAX);

    if start >= items.len() || page_size == 0 {
        return &items[..0];
    }

    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// How many pages `len` items occupy at `page_size` items per page.
///
/// An empty collection still reports one page: the UI always renders a
/// current page, even when it has no rows.
pub fn total_pages(len: usize, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }

    (len as u64).div_ceil(page_size).max(1)
}

#[cfg(test)]
mod tests {
    use super::{page_slice, total_pages};

    #[test]
    fn pages_partition_the_sequence() {
        let items: Vec<i64> = (1..=25).collect();
        let page_size = 10;

        let mut reassembled = Vec::new();
        for page in 1..=total_pages(items.len(), page_size) {
            reassembled.extend_from_slice(page_slice(&items, page, page_size));
        }

        assert_eq!(reassembled, items);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let items: Vec<i64> = (1..=25).collect();

        let got = page_slice(&items, 3, 10);

        assert_eq!(got, &[21, 22, 23, 24, 25]);
        assert_eq!(total_pages(items.len(), 10), 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<i64> = (1..=5).collect();

        assert!(page_slice(&items, 2, 10).is_empty());
        assert!(page_slice(&items, 400, 10).is_empty());
    }

    #[test]
    fn empty_collection_still_reports_one_page() {
        let items: Vec<i64> = Vec::new();

        assert_eq!(total_pages(items.len(), 10), 1);
        assert!(page_slice(&items, 1, 10).is_empty());
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(21, 10), 3);
    }
}
