//! Common API DTOs

pub mod validated_json;

pub use validated_json::ValidatedJson;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response envelope
///
/// Every REST endpoint wraps its payload in this envelope.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Pagination query parameters for list requests
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1–100). Default: 10
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_limit() -> u32 {
    10
}

/// Paginated response
///
/// Carries the page slice and page metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total page count
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shapes() {
        let ok = ApiResponse::success(1);
        assert!(ok.success);
        assert_eq!(ok.data, Some(1));
        assert!(ok.error.is_none());

        let err = ApiResponse::<()>::error("boom");
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.error.as_deref(), Some("boom"));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 7, 1, 3);
        assert_eq!(page.total_pages, 3);
        let exact = PaginatedResponse::new(vec![1, 2, 3], 6, 1, 3);
        assert_eq!(exact.total_pages, 2);
    }
}
