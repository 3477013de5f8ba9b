//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token to `Actor` resolution and the `CurrentActor` extractor

pub mod auth;

pub use auth::{auth_middleware, AuthState, CurrentActor};
