/// Shared pagination for list endpoints
///
/// All list endpoints accept `page` and `limit` query parameters and
/// return a pagination summary alongside the records. This module owns
/// the page/limit -> skip/limit arithmetic and the total-page
/// computation so every controller paginates identically.
///
/// # Example
///
/// ```
/// use tatboard_shared::pagination::{PageRequest, PageSummary};
///
/// let page = PageRequest::from_params(Some("2"), Some("10"));
/// assert_eq!(page.skip(), 10);
///
/// let summary = PageSummary::new(&page, 25);
/// assert_eq!(summary.total_pages, 3);
/// ```

use serde::{Deserialize, Serialize};

/// Default page when the query parameter is absent or non-numeric
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when the query parameter is absent or non-numeric
pub const DEFAULT_LIMIT: u64 = 10;

/// Normalized pagination parameters for a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,

    /// Number of records per page
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Builds a page request from raw query parameters
    ///
    /// Absent, non-numeric, or non-positive values fall back to the
    /// defaults (page 1, limit 10).
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);

        let limit = limit
            .and_then(|l| l.parse::<u64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_LIMIT);

        Self { page, limit }
    }

    /// Number of records to skip: `(page - 1) * limit`
    ///
    /// Saturates instead of overflowing; `page` and `limit` come straight
    /// from the query string.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Page size as the signed limit the driver expects
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

/// Pagination summary returned alongside list results
///
/// Field names are camelCase on the wire to match existing clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// The page that was returned
    pub current_page: u64,

    /// Total pages: `ceil(total_items / items_per_page)`
    pub total_pages: u64,

    /// Total records matching the filter
    pub total_items: u64,

    /// Records per page
    pub items_per_page: u64,
}

impl PageSummary {
    /// Computes the summary for a page request and a total count
    pub fn new(page: &PageRequest, total_items: u64) -> Self {
        Self {
            current_page: page.page,
            total_pages: total_items.saturating_add(page.limit - 1) / page.limit,
            total_items,
            items_per_page: page.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_when_absent() {
        let page = PageRequest::from_params(None, None);
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn test_defaults_applied_when_non_numeric() {
        let page = PageRequest::from_params(Some("abc"), Some(""));
        assert_eq!(page.page, DEFAULT_PAGE);
        assert_eq!(page.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_defaults_applied_when_non_positive() {
        let page = PageRequest::from_params(Some("0"), Some("-5"));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn test_skip_arithmetic() {
        let page = PageRequest::from_params(Some("3"), Some("25"));
        assert_eq!(page.skip(), 50);
        assert_eq!(page.limit_i64(), 25);
    }

    #[test]
    fn test_skip_saturates_on_huge_page() {
        let page = PageRequest::from_params(Some("18446744073709551615"), Some("10"));
        assert_eq!(page.skip(), u64::MAX);

        let page = PageRequest::from_params(Some("2"), Some("18446744073709551615"));
        assert_eq!(page.skip(), u64::MAX);
        assert_eq!(page.limit_i64(), i64::MAX);
        assert_eq!(PageSummary::new(&page, 5).total_pages, 1);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let page = PageRequest::from_params(Some("1"), Some("10"));
        assert_eq!(PageSummary::new(&page, 0).total_pages, 0);
        assert_eq!(PageSummary::new(&page, 10).total_pages, 1);
        assert_eq!(PageSummary::new(&page, 11).total_pages, 2);
        assert_eq!(PageSummary::new(&page, 100).total_pages, 10);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let page = PageRequest::from_params(Some("2"), Some("10"));
        let summary = PageSummary::new(&page, 25);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["totalItems"], 25);
        assert_eq!(json["itemsPerPage"], 10);
    }
}
