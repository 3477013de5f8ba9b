//! HTTP error mapping.
//!
//! Every handler returns `ApiError`, which renders as a JSON `ErrorResponse`
//! with a stable `code` callers can branch on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::booking::BookingError;
use crate::domain::foundation::ErrorCode;
use crate::domain::inquiry::InquiryError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }
}

/// An error ready to be sent over HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    /// Malformed request that never reached the application layer.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorResponse::bad_request(message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let (status, body) = match &err {
            BookingError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(code, message).with_details(json!({ "field": field })),
            ),
            BookingError::Unauthorized { role, action } => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(code, message)
                    .with_details(json!({ "role": role.as_str(), "action": action.as_str() })),
            ),
            BookingError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(code, message)
                    .with_details(json!({ "from": from.as_str(), "to": to.as_str() })),
            ),
            BookingError::Conflict { booking_id, expected } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(code, message)
                    .with_details(json!({ "booking_id": booking_id, "expected": expected, "retryable": true })),
            ),
            BookingError::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(code, message).with_details(json!({ "resource": resource, "id": id })),
            ),
            BookingError::AlreadyAssigned { provider_id, .. } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(code, message).with_details(json!({ "provider_id": provider_id })),
            ),
            BookingError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(code, "Internal server error"),
            ),
        };
        ApiError::new(status, body)
    }
}

impl From<InquiryError> for ApiError {
    fn from(err: InquiryError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let status = match &err {
            InquiryError::Validation { .. } => StatusCode::BAD_REQUEST,
            InquiryError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            InquiryError::InvalidTransition { .. } => StatusCode::CONFLICT,
            InquiryError::NotFound(_) => StatusCode::NOT_FOUND,
            InquiryError::Infrastructure(_) => {
                return ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(code, "Internal server error"),
                )
            }
        };
        let body = match &err {
            InquiryError::Validation { field, .. } => {
                ErrorResponse::new(code, message).with_details(json!({ "field": field }))
            }
            _ => ErrorResponse::new(code, message),
        };
        ApiError::new(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::{Action, Role};
    use crate::domain::booking::BookingStatus;
    use crate::domain::foundation::{BookingId, InquiryId};

    #[test]
    fn booking_errors_map_to_expected_statuses() {
        let cases = [
            (BookingError::validation("patient_name", "required"), StatusCode::BAD_REQUEST),
            (
                BookingError::Unauthorized {
                    role: Role::Clinic,
                    action: Action::DeleteBooking,
                },
                StatusCode::FORBIDDEN,
            ),
            (
                BookingError::InvalidTransition {
                    from: BookingStatus::Pending,
                    to: BookingStatus::Completed,
                },
                StatusCode::CONFLICT,
            ),
            (
                BookingError::conflict(BookingId::new(), BookingStatus::Pending),
                StatusCode::CONFLICT,
            ),
            (BookingError::not_found("booking", "x"), StatusCode::NOT_FOUND),
            (
                BookingError::Infrastructure("pool timed out".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn infrastructure_details_are_not_leaked() {
        let err = ApiError::from(BookingError::Infrastructure("password=hunter2".into()));
        assert_eq!(err.body.code, "INTERNAL_ERROR");
        assert!(!err.body.message.contains("hunter2"));
    }

    #[test]
    fn conflict_is_marked_retryable() {
        let err = ApiError::from(BookingError::conflict(BookingId::new(), BookingStatus::Pending));
        assert_eq!(err.body.code, "CONCURRENCY_CONFLICT");
        assert_eq!(err.body.details.unwrap()["retryable"], true);
    }

    #[test]
    fn missing_inquiry_is_404() {
        let err = ApiError::from(InquiryError::NotFound(InquiryId::new()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body.code, "INQUIRY_NOT_FOUND");
    }
}
