//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, money, event infrastructure and error
//! types that form the vocabulary of the ChekUp marketplace domain.

mod errors;
mod events;
mod ids;
mod money;
mod reference;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{BookingId, FileId, InquiryId, ProviderId, TestId, UserId};
pub use money::{Currency, Money};
pub use reference::ReferenceNumber;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
