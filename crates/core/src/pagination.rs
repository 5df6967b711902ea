//! Page-based pagination for admin and public list endpoints.
//!
//! Clients send a 1-based `page` and a `limit`; the repositories work in
//! `LIMIT`/`OFFSET`. Every list response carries a [`PageInfo`] so the
//! admin tables can render page controls without a second request.

use serde::Serialize;

/// Page size used when the client does not send one.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned next to a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
}

impl PageInfo {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = (total + request.limit - 1) / request.limit;
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next: request.page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(200), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
    }

    #[test]
    fn defaults_to_first_page() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, DEFAULT_LIMIT);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        assert_eq!(PageRequest::new(Some(0), Some(10)).page, 1);
        assert_eq!(PageRequest::new(Some(-3), Some(10)).offset(), 0);
    }

    #[test]
    fn offset_for_later_pages() {
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn page_info_rounds_up() {
        let info = PageInfo::new(PageRequest::new(Some(1), Some(10)), 21);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next);
    }

    #[test]
    fn last_page_has_no_next() {
        let info = PageInfo::new(PageRequest::new(Some(3), Some(10)), 21);
        assert!(!info.has_next);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let info = PageInfo::new(PageRequest::default(), 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
    }

    #[test]
    fn exact_multiple() {
        let info = PageInfo::new(PageRequest::new(Some(2), Some(10)), 20);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_next);
    }
}
