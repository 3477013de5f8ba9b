//! Booking error taxonomy.

use thiserror::Error;

use super::BookingStatus;
use crate::domain::access::{Action, PermissionDenied, Role};
use crate::domain::cart::{CartError, CompositeId};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, ProviderId, ValidationError};

/// Errors returned by booking creation, transitions and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Malformed or incomplete input. The user corrects it.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The role lacks the capability or the booking is outside its scope.
    #[error("Role '{role}' is not allowed to {action}")]
    Unauthorized { role: Role, action: Action },

    /// The target is not a direct successor of the current status.
    #[error("Cannot transition booking from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },

    /// Lost a conditional update; refetch and retry or abort.
    #[error("Booking {booking_id} is no longer {expected}")]
    Conflict { booking_id: String, expected: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Booking {booking_id} is already assigned to provider {provider_id}")]
    AlreadyAssigned { booking_id: BookingId, provider_id: ProviderId },

    /// Collaborator failure, surfaced unchanged.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        BookingError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn conflict(booking_id: BookingId, expected: BookingStatus) -> Self {
        BookingError::Conflict {
            booking_id: booking_id.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Only a lost conditional update is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Conflict { .. })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::Validation { .. } => ErrorCode::ValidationFailed,
            BookingError::Unauthorized { .. } => ErrorCode::Forbidden,
            BookingError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            BookingError::Conflict { .. } => ErrorCode::ConcurrencyConflict,
            BookingError::NotFound { resource, .. } => match *resource {
                "test" => ErrorCode::TestNotFound,
                "provider" => ErrorCode::ProviderNotFound,
                "pricing" => ErrorCode::PricingNotFound,
                _ => ErrorCode::BookingNotFound,
            },
            BookingError::AlreadyAssigned { .. } => ErrorCode::AlreadyExists,
            BookingError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<PermissionDenied> for BookingError {
    fn from(denied: PermissionDenied) -> Self {
        BookingError::Unauthorized {
            role: denied.role,
            action: denied.action,
        }
    }
}

impl From<CartError> for BookingError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::PriceMismatch { test_id, provider_id }
            | CartError::Unavailable { test_id, provider_id } => BookingError::NotFound {
                resource: "pricing",
                id: CompositeId::new(test_id, provider_id).to_string(),
            },
            CartError::CartFull { .. } => BookingError::validation("items", err.to_string()),
            CartError::Serialization(message) => BookingError::validation("cart", message),
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        let id = err.detail("id").unwrap_or("unknown").to_string();
        match err.code {
            ErrorCode::ConcurrencyConflict => BookingError::Conflict {
                booking_id: err.detail("booking_id").unwrap_or("unknown").to_string(),
                expected: err.detail("expected").unwrap_or("unknown").to_string(),
            },
            ErrorCode::BookingNotFound => BookingError::NotFound { resource: "booking", id },
            ErrorCode::TestNotFound => BookingError::NotFound { resource: "test", id },
            ErrorCode::ProviderNotFound => BookingError::NotFound { resource: "provider", id },
            ErrorCode::PricingNotFound => BookingError::NotFound { resource: "pricing", id },
            ErrorCode::ValidationFailed => BookingError::Validation {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_cart_item_is_missing_pricing() {
        let err: BookingError = CartError::Unavailable {
            test_id: crate::domain::foundation::TestId::new(),
            provider_id: ProviderId::new(),
        }
        .into();
        assert!(matches!(err, BookingError::NotFound { resource: "pricing", .. }));
        assert_eq!(err.code(), ErrorCode::PricingNotFound);
    }

    #[test]
    fn conflict_from_domain_error_keeps_details() {
        let id = BookingId::new();
        let err = DomainError::new(ErrorCode::ConcurrencyConflict, "status changed")
            .with_detail("booking_id", id.to_string())
            .with_detail("expected", "pending");

        let mapped = BookingError::from(err);
        assert_eq!(mapped, BookingError::conflict(id, BookingStatus::Pending));
        assert!(mapped.is_retryable());
    }

    #[test]
    fn not_found_codes_map_to_not_found() {
        let err = DomainError::new(ErrorCode::ProviderNotFound, "gone").with_detail("id", "p-1");
        assert_eq!(
            BookingError::from(err),
            BookingError::NotFound { resource: "provider", id: "p-1".to_string() }
        );
    }

    #[test]
    fn database_errors_surface_as_infrastructure() {
        let err = DomainError::new(ErrorCode::DatabaseError, "connection reset");
        let mapped = BookingError::from(err);
        assert!(matches!(mapped, BookingError::Infrastructure(_)));
        assert!(!mapped.is_retryable());
    }

    #[test]
    fn permission_denied_becomes_unauthorized() {
        let denied = PermissionDenied { role: Role::Clinic, action: Action::AssignProvider };
        assert_eq!(
            BookingError::from(denied),
            BookingError::Unauthorized { role: Role::Clinic, action: Action::AssignProvider }
        );
    }
}
