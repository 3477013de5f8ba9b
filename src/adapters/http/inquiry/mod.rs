//! Surgery inquiry endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::inquiry_routes;
