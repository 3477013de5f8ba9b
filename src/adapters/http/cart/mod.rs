//! Cart quoting endpoint. The cart itself lives on the client.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::cart_routes;
