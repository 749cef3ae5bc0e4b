//! Shared request/response primitives

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard cap on page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination parameters common to every listing endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        crate::utils::helpers::calculate_offset(self.page, self.limit)
    }
}

/// Pagination metadata returned alongside every page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(pagination: Pagination, total: i64) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: crate::utils::helpers::total_pages(total, pagination.limit),
        }
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: i64) -> Self {
        Self {
            items,
            meta: PageMeta::new(pagination, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta() {
        let meta = PageMeta::new(Pagination { page: 2, limit: 20 }, 45);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.page, 2);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination { page: 3, limit: 10 }.offset(), 20);
        assert_eq!(Pagination::default().offset(), 0);
    }
}
