//! HTTP adapter - the axum REST API.
//!
//! Each resource has its own module with `dto`, `handlers` and `routes`.
//! `router::api_router` merges them behind the auth middleware.

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod inquiry;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{auth_middleware, AuthState, CurrentActor};
pub use router::api_router;
pub use state::AppState;
