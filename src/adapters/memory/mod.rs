//! In-memory adapters for tests and database-less runs.

mod booking_repository;
mod catalog;
mod inquiry_repository;
mod result_storage;

pub use booking_repository::InMemoryBookingRepository;
pub use catalog::InMemoryPricingCatalog;
pub use inquiry_repository::InMemoryInquiryRepository;
pub use result_storage::InMemoryResultStorage;
