//! Booking endpoints: checkout, queries and fulfilment transitions.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::booking_routes;
