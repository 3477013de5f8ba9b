//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Catalog and persistence
//!
//! - `PricingCatalog` - Read-only tests, providers and prices
//! - `BookingRepository` - Booking persistence with conditional status updates
//! - `InquiryRepository` - Surgery inquiry persistence
//! - `ResultStorage` - External store for result documents
//!
//! ## Events and identity
//!
//! - `EventPublisher` / `EventSubscriber` / `EventHandler` - Domain event flow
//! - `SessionValidator` - Bearer token to actor

mod booking_repository;
mod event_publisher;
mod event_subscriber;
mod inquiry_repository;
mod pricing_catalog;
mod result_storage;
mod session_validator;

pub use booking_repository::{
    booking_not_found, conflict_error, BookingFilter, BookingRepository, BookingScope,
};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use inquiry_repository::InquiryRepository;
pub use pricing_catalog::PricingCatalog;
pub use result_storage::{ResultFile, ResultStorage};
pub use session_validator::{AuthError, SessionValidator};
