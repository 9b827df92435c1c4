//! Page slicing for ranked lists.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self::with_limits(page, page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    /// Build with a configured default and upper bound for the page size.
    pub fn with_limits(
        page: Option<u32>,
        page_size: Option<u32>,
        default_size: u32,
        max_size: u32,
    ) -> Self {
        let max_size = max_size.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(default_size).clamp(1, max_size),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

/// Pagination metadata in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
    /// 1-based index of the first item on this page, 0 when the page is empty
    pub showing_from: u32,
    /// 1-based index of the last item on this page, 0 when the page is empty
    pub showing_to: u32,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u32, page_len: u32) -> Self {
        let total_pages = total_items.div_ceil(pagination.page_size);
        let (showing_from, showing_to) = if page_len == 0 {
            (0, 0)
        } else {
            let first = pagination.offset() as u32 + 1;
            (first, first + page_len - 1)
        };
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total_items,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
            showing_from,
            showing_to,
        }
    }

    /// "showing X–Y of N"
    pub fn summary(&self) -> String {
        format!(
            "showing {}\u{2013}{} of {}",
            self.showing_from, self.showing_to, self.total_items
        )
    }
}

/// One page of a list.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

/// Slice `items` into the requested page. Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], pagination: &Pagination) -> Page<T> {
    let start = pagination.offset().min(items.len());
    let end = (start + pagination.page_size as usize).min(items.len());
    let slice = items[start..end].to_vec();
    let meta = PaginationMeta::new(pagination, items.len() as u32, slice.len() as u32);
    Page { items: slice, meta }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_default() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_bounds() {
        assert_eq!(Pagination::new(Some(0), Some(10)).page, 1);
        assert_eq!(Pagination::new(Some(1), Some(500)).page_size, MAX_PAGE_SIZE);
        assert_eq!(Pagination::new(Some(1), Some(0)).page_size, 1);
        assert_eq!(Pagination::with_limits(None, None, 5, 10).page_size, 5);
    }

    #[test]
    fn test_pagination_meta_middle_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, &Pagination::new(Some(2), Some(10)));

        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next);
        assert!(page.meta.has_prev);
        assert_eq!(page.meta.summary(), "showing 11\u{2013}20 of 25");
    }

    #[test]
    fn test_last_page_is_short() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, &Pagination::new(Some(3), Some(10)));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!((page.meta.showing_from, page.meta.showing_to), (21, 25));
        assert!(!page.meta.has_next);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, &Pagination::new(Some(4), Some(10)));
        assert!(page.items.is_empty());
        assert_eq!(page.meta.summary(), "showing 0\u{2013}0 of 5");
    }

    #[test]
    fn test_pages_concatenate_to_whole() {
        for total in 0..30u32 {
            for size in 1..8u32 {
                let items: Vec<u32> = (0..total).collect();
                let pages = total.div_ceil(size).max(1);
                let mut joined = Vec::new();
                for page in 1..=pages {
                    let p = paginate(&items, &Pagination::new(Some(page), Some(size)));
                    if !p.items.is_empty() {
                        let shown = p.meta.showing_to - p.meta.showing_from + 1;
                        assert_eq!(shown, p.items.len() as u32);
                    }
                    joined.extend(p.items);
                }
                assert_eq!(joined, items);
            }
        }
    }
}
