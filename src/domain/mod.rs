//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, money, errors, events)
//! - `catalog` - Tests, providers and price entries read from the catalog
//! - `cart` - Client-held multi-provider cart and its observers
//! - `access` - Roles, actors and the role permission gate
//! - `booking` - Booking aggregate, factory, state machine and assignment
//! - `inquiry` - Surgery inquiry aggregate and its small lifecycle

pub mod access;
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod foundation;
pub mod inquiry;
