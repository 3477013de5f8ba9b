//! Surgery inquiry module - a simple three-state request outside the booking
//! lifecycle. Patients submit; only admins manage.

mod aggregate;
mod status;

pub use aggregate::{InquirySubmission, InquiryUpdate, SurgeryInquiry};
pub use status::InquiryStatus;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::access::{Action, PermissionDenied, Role};
use crate::domain::foundation::{
    domain_event, DomainError, ErrorCode, EventId, InquiryId, ReferenceNumber, Timestamp,
    ValidationError,
};

/// Errors from inquiry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InquiryError {
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Role '{role}' is not allowed to {action}")]
    Unauthorized { role: Role, action: Action },

    #[error("Cannot move inquiry from {from} to {to}")]
    InvalidTransition { from: InquiryStatus, to: InquiryStatus },

    #[error("Surgery inquiry not found: {0}")]
    NotFound(InquiryId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl InquiryError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InquiryError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InquiryError::Validation { .. } => ErrorCode::ValidationFailed,
            InquiryError::Unauthorized { .. } => ErrorCode::Forbidden,
            InquiryError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            InquiryError::NotFound(_) => ErrorCode::InquiryNotFound,
            InquiryError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for InquiryError {
    fn from(err: ValidationError) -> Self {
        InquiryError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<PermissionDenied> for InquiryError {
    fn from(denied: PermissionDenied) -> Self {
        InquiryError::Unauthorized {
            role: denied.role,
            action: denied.action,
        }
    }
}

impl From<DomainError> for InquiryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InquiryNotFound => match err.detail("id").and_then(|id| id.parse().ok()) {
                Some(id) => InquiryError::NotFound(id),
                None => InquiryError::Infrastructure(err.to_string()),
            },
            ErrorCode::ValidationFailed => InquiryError::Validation {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => InquiryError::Infrastructure(err.to_string()),
        }
    }
}

/// Published when a patient submits an inquiry, so staff can be notified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurgeryInquiryReceived {
    pub event_id: EventId,
    pub inquiry_id: InquiryId,
    pub inquiry_number: ReferenceNumber,
    pub surgery_type: String,
    pub patient_phone: String,
    pub received_at: Timestamp,
}

domain_event!(
    SurgeryInquiryReceived,
    event_type = "surgery_inquiry.received.v1",
    aggregate_id = inquiry_id,
    aggregate_type = "SurgeryInquiry",
    occurred_at = received_at,
    event_id = event_id
);
