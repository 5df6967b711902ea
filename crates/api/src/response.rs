//! Shared response envelope types for API handlers.
//!
//! Every successful response is `{ "success": true, "data": ... }`. The
//! confirmation flow adds a `warning`, list endpoints add `pagination`.

use careline_core::pagination::PageInfo;
use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(booking)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            warning: None,
            pagination: None,
        }
    }

    /// Success that still needs the admin's attention.
    pub fn with_warning(data: T, warning: Option<String>) -> Self {
        Self {
            warning,
            ..Self::ok(data)
        }
    }

    pub fn paginated(data: T, pagination: PageInfo) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::ok(data)
        }
    }
}
