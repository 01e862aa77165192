//! Page metadata for paginated API listings.

use serde::{Deserialize, Serialize};

/// Metadata the API returns alongside every paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (1-indexed).
    pub current_page: u32,
    /// Last page number; 1 for an empty result.
    pub last_page: u32,
    /// Number of items per page.
    #[serde(default)]
    pub per_page: u32,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
}

impl PageMeta {
    /// Metadata for a single page holding `total` items.
    pub fn single(total: u64) -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: total as u32,
            total,
        }
    }

    /// Whether there is a previous page.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether there is a next page.
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Get the previous page number if available.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.current_page - 1)
    }

    /// Get the next page number if available.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    /// Page numbers centered on the current page, `window_size` on each side.
    pub fn page_window(&self, window_size: u32) -> Vec<u32> {
        let last = self.last_page.max(1);
        let start = self.current_page.saturating_sub(window_size).max(1);
        let end = self.current_page.saturating_add(window_size).min(last);
        (start..=end).collect()
    }
}

/// One page of records plus its metadata (`{"data": [...], "meta": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current_page: u32, last_page: u32) -> PageMeta {
        PageMeta {
            current_page,
            last_page,
            per_page: 10,
            total: last_page as u64 * 10,
        }
    }

    #[test]
    fn test_first_page() {
        let m = meta(1, 5);
        assert!(!m.has_previous());
        assert!(m.has_next());
        assert_eq!(m.previous_page(), None);
        assert_eq!(m.next_page(), Some(2));
    }

    #[test]
    fn test_last_page() {
        let m = meta(5, 5);
        assert!(m.has_previous());
        assert!(!m.has_next());
        assert_eq!(m.next_page(), None);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(meta(5, 10).page_window(2), vec![3, 4, 5, 6, 7]);
        assert_eq!(meta(1, 10).page_window(2), vec![1, 2, 3]);
        assert_eq!(meta(10, 10).page_window(2), vec![8, 9, 10]);
        assert_eq!(meta(1, 0).page_window(2), vec![1]);
    }

    #[test]
    fn test_page_window_near_u32_max() {
        assert_eq!(
            meta(u32::MAX, u32::MAX).page_window(2),
            vec![u32::MAX - 2, u32::MAX - 1, u32::MAX]
        );
        assert_eq!(meta(u32::MAX - 1, u32::MAX).page_window(5).len(), 7);
    }
}
