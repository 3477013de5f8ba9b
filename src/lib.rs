//! ChekUp - lab-test marketplace backend
//!
//! Patients price a multi-provider cart and check out into one booking per
//! provider. Staff then move each booking through
//! `pending → confirmed → sample_collected → results_ready → completed`
//! under role-based permissions, with conditional writes so concurrent
//! staff actions never silently overwrite each other.
//!
//! Layout follows hexagonal architecture: `domain` holds the rules, `ports`
//! the contracts, `application` the use-case handlers, and `adapters` the
//! HTTP, Postgres, in-memory and event implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
