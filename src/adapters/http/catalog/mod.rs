//! Public catalog endpoints: tests, providers and prices.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::catalog_routes;
