//! Shared HTTP types: response envelope, pagination, error mapping

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::PaginatedResult;

pub use validated_json::ValidatedJson;

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; omitted on success
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

/// One page of a list endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Items across all pages
    pub total: u64,
    /// 1-based
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<U>(result: PaginatedResult<U>, f: impl FnMut(U) -> T) -> Self {
        let result = result.map(f);
        Self {
            items: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidInterval { .. } => StatusCode::BAD_REQUEST,
        DomainError::SlotUnavailable { .. } => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error to its HTTP status and envelope.
///
/// Storage failures are logged and reported without internals.
pub fn domain_error(error: DomainError) -> ApiError {
    let status = status_for(&error);
    let message = match &error {
        DomainError::Storage(detail) => {
            tracing::error!(error = %detail, "Storage failure");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            status_for(&DomainError::SlotUnavailable { space_id: "S1".into() }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::InvalidInterval {
                start: "a".into(),
                end: "b".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&DomainError::not_found("Space", "S1")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&DomainError::Forbidden("x".into())), StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflict_body_carries_user_message() {
        let (status, Json(body)) = domain_error(DomainError::SlotUnavailable { space_id: "S1".into() });
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Time slot is already booked"));
    }

    #[test]
    fn storage_details_are_hidden() {
        let (status, Json(body)) = domain_error(DomainError::Storage("disk I/O error".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
