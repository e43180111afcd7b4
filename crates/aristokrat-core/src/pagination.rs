//! Page-number pagination for list endpoints.
//!
//! Clients pass `page` (1-indexed) and `page_size`. The page size defaults to
//! 50 and is clamped to [1, 200].
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": { "total": 352, "page": 2, "page_size": 50, "has_more": true }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;

/// Treats empty query values (`?page=`) as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// Total number of matching items
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    /// Whether another page follows this one
    pub has_more: bool,
}

impl PageMeta {
    #[must_use]
    pub fn new(total: i64, params: &PageParams) -> Self {
        let page = params.page();
        let page_size = params.page_size();
        Self {
            total,
            page,
            page_size,
            has_more: page.saturating_mul(page_size) < total,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-indexed, default 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-200, default 50)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page_size: Option<i64>,
}

impl PageParams {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset of the page. Pages past `i64::MAX` rows saturate, which
    /// yields an empty page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}
