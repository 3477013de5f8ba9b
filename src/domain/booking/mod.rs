//! Booking module - lifecycle, assignment and creation of bookings.
//!
//! # Components
//!
//! - `BookingFactory` - checkout draft to pending bookings, all or nothing
//! - `BookingStateMachine` - role-gated status transitions
//! - `AssignmentCoordinator` - single-provider assignment and admin reset
//!
//! All three only plan. Persistence happens through the `BookingRepository`
//! port as a conditional update on the expected status.

pub(crate) mod aggregate;
mod assignment;
mod errors;
mod events;
mod factory;
mod lifecycle;
mod statistics;
mod status;
mod values;

pub use aggregate::{Booking, BookingRecord, NewBooking};
pub use assignment::AssignmentCoordinator;
pub use errors::BookingError;
pub use events::{
    BookingCreated, BookingStatusChanged, ProviderAssigned, ProviderUnassigned, ResultsUploaded,
};
pub use factory::{BookingDraft, BookingFactory, DraftGroup};
pub use lifecycle::{BookingStateMachine, ProviderChange, StatusUpdate};
pub use statistics::{BookingStatistics, ProviderActivity};
pub use status::BookingStatus;
pub use values::{BookingLine, DeliveryMethod, PatientDetails, ResultAttachment};
