//! Offset pagination parameters and response metadata

use serde::Serialize;

/// Page size used when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Largest page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-based)
    pub page: i64,
    /// Number of rows per page
    pub size: i64,
}

impl Pagination {
    /// Build a page request, falling back to page 1 and the default size
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Metadata describing this page within `total` rows
    pub fn meta(&self, total: i64) -> PageMeta {
        let last_page = if total == 0 {
            1
        } else {
            (total + self.size - 1) / self.size
        };

        PageMeta {
            current_page: self.page,
            per_page: self.size,
            last_page,
            total,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned next to a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub last_page: i64,
    pub total: i64,
}
