//! Application layer - command and query handlers.
//!
//! Orchestrates domain operations and coordinates between ports. Writes
//! (checkout, status changes, assignment, result upload, inquiries) and
//! reads (catalog, booking lists, statistics) live in separate handlers.

pub mod handlers;

pub use handlers::*;
