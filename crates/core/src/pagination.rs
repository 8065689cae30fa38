//! Page/limit handling for the tribute listing.
//!
//! Query values arrive as raw strings; anything unparseable falls back to
//! the defaults instead of being forwarded to the Data Service as a
//! nonsense range.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// First page when the caller doesn't say otherwise.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size.
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on the page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    /// Parse raw query values, falling back to defaults on anything that
    /// isn't a positive integer and clamping the limit to [`MAX_LIMIT`].
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(limit)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        Self { page, limit }
    }

    /// Zero-based offset of the first record on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).filter(|v| *v >= 1)
}

// ---------------------------------------------------------------------------
// Response metadata
// ---------------------------------------------------------------------------

/// Pagination block returned alongside a tribute page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Build the metadata for a page of `total` overall records.
    pub fn new(params: PageParams, total: u64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            total,
            total_pages: total.div_ceil(u64::from(params.limit)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let p = PageParams::from_raw(None, None);
        assert_eq!(p, PageParams { page: 1, limit: 10 });
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let p = PageParams::from_raw(Some("abc"), Some("NaN"));
        assert_eq!(p, PageParams { page: 1, limit: 10 });

        let p = PageParams::from_raw(Some("-3"), Some("0"));
        assert_eq!(p, PageParams { page: 1, limit: 10 });
    }

    #[test]
    fn limit_is_clamped() {
        let p = PageParams::from_raw(Some("2"), Some("5000"));
        assert_eq!(p.limit, MAX_LIMIT);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageParams::from_raw(Some("1"), Some("10")).offset(), 0);
        assert_eq!(PageParams::from_raw(Some("3"), Some("10")).offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let params = PageParams { page: 1, limit: 10 };
        assert_eq!(Pagination::new(params, 0).total_pages, 0);
        assert_eq!(Pagination::new(params, 10).total_pages, 1);
        assert_eq!(Pagination::new(params, 11).total_pages, 2);
    }

    #[test]
    fn serializes_total_pages_in_camel_case() {
        let json = serde_json::to_value(Pagination::new(PageParams::default(), 25)).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["total"], 25);
    }
}
