use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Hard ceiling on `limit`, whatever the caller asks for.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Raw paging controls as they arrive on the query string.
///
/// Endpoints differ in their default page size, so resolution happens in
/// [`PageParams::resolve`] rather than in the deserializer.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number, defaults to 1.
    pub page: Option<u64>,
    /// Rows per page, clamped to `1..=MAX_PAGE_LIMIT`.
    pub limit: Option<u64>,
}

impl PageParams {
    /// Applies defaults and clamps, yielding a concrete window.
    #[must_use]
    pub fn resolve(&self, default_limit: u64) -> PageSlice {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT);
        PageSlice { page, limit }
    }
}

/// A concrete page window after defaults and clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub page: u64,
    pub limit: u64,
}

impl PageSlice {
    /// Row offset of the window's first element.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// Paging summary attached to every list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// List response envelope: `{"data": [...], "pagination": {...}}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wraps one window of rows. `total` is the unpaged row count, from
    /// which `total_pages = ceil(total / limit)` is derived.
    #[must_use]
    pub fn new(data: Vec<T>, slice: PageSlice, total: u64) -> Self {
        Self {
            data,
            pagination: Pagination {
                page: slice.page,
                limit: slice.limit,
                total,
                total_pages: total.div_ceil(slice.limit),
            },
        }
    }

    /// Converts the rows while keeping the paging summary, e.g. domain
    /// items into their wire DTOs.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_applies_defaults() {
        let params = PageParams::default();
        assert_eq!(params.resolve(10), PageSlice { page: 1, limit: 10 });
        assert_eq!(params.resolve(20), PageSlice { page: 1, limit: 20 });
    }

    #[test]
    fn resolve_clamps_out_of_range_values() {
        let params = PageParams {
            page: Some(0),
            limit: Some(10_000),
        };
        let slice = params.resolve(20);
        assert_eq!(slice.page, 1);
        assert_eq!(slice.limit, MAX_PAGE_LIMIT);

        let params = PageParams {
            page: Some(3),
            limit: Some(0),
        };
        assert_eq!(params.resolve(20).limit, 1);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageSlice { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(PageSlice { page: 3, limit: 10 }.offset(), 20);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        let slice = PageSlice { page: 1, limit: 10 };
        assert_eq!(Page::<u8>::new(vec![], slice, 0).pagination.total_pages, 0);
        assert_eq!(Page::<u8>::new(vec![], slice, 1).pagination.total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], slice, 10).pagination.total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], slice, 11).pagination.total_pages, 2);
    }

    #[test]
    fn map_preserves_pagination() {
        let page = Page::new(vec![1, 2, 3], PageSlice { page: 1, limit: 3 }, 7);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.data, vec![10, 20, 30]);
        assert_eq!(mapped.pagination.total, 7);
        assert_eq!(mapped.pagination.total_pages, 3);
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let page = Page::new(vec![1, 2], PageSlice { page: 2, limit: 2 }, 5);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": [1, 2],
                "pagination": {"page": 2, "limit": 2, "total": 5, "totalPages": 3}
            })
        );
    }
}
