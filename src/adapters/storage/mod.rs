//! Storage Adapters
//!
//! Disk-backed implementation of the ResultStorage port. Tests and the
//! in-memory profile use `memory::InMemoryResultStorage` instead.

mod file_result_storage;

pub use file_result_storage::FileResultStorage;
