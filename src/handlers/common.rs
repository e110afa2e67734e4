use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Pagination parameters for list operations. An absent `per_page` falls
/// back to the configured default at resolution time.
#[derive(Debug, Deserialize, Serialize, IntoParams)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default)]
    pub per_page: Option<u64>,
}

fn default_page() -> u64 {
    1
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: None,
        }
    }
}

impl PaginationParams {
    /// Apply the configured default and maximum page sizes.
    pub fn resolve(&self, default_per_page: u64, max_per_page: u64) -> PageRequest {
        let per_page = self
            .per_page
            .unwrap_or(default_per_page)
            .min(max_per_page)
            .max(1);
        PageRequest {
            page: self.page.max(1),
            per_page,
        }
    }
}

/// A page request with the configured bounds already applied.
#[derive(Clone, Copy, Debug)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Calculate zero-based offset for pagination
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.per_page
    }
}

/// Standard pagination response metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Standard paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(page, per_page, total),
        }
    }
}

/// Slice a fully materialized list into the requested page.
pub fn paginate<T>(items: Vec<T>, page: &PageRequest) -> PaginatedResponse<T> {
    let total = items.len() as u64;
    let data: Vec<T> = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.per_page as usize)
        .collect();
    PaginatedResponse::new(data, page.page, page.per_page, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        let page = PageRequest {
            page: 3,
            per_page: 10,
        };
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn resolve_applies_configured_default_when_per_page_is_absent() {
        let params = PaginationParams {
            page: 1,
            per_page: None,
        };
        let page = params.resolve(25, 100);
        assert_eq!(page.per_page, 25);
    }

    #[test]
    fn resolve_caps_per_page_and_fixes_zero_page() {
        let params = PaginationParams {
            page: 0,
            per_page: Some(500),
        };
        let page = params.resolve(20, 100);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 100);
    }

    #[test]
    fn paginate_slices_the_middle_page() {
        let page = PageRequest {
            page: 2,
            per_page: 3,
        };
        let result = paginate((1..=8).collect::<Vec<_>>(), &page);
        assert_eq!(result.data, vec![4, 5, 6]);
        assert_eq!(result.pagination.total, 8);
        assert_eq!(result.pagination.total_pages, 3);
    }
}
