//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token validation
//! - `events` - In-process event bus and the notification log handler
//! - `http` - axum REST API
//! - `memory` - In-memory catalog, repositories and result store
//! - `postgres` - PostgreSQL catalog and repositories
//! - `storage` - Result documents on the local filesystem

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use events::{InMemoryEventBus, NotificationLogger};
