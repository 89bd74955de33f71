//! Persistence contracts for the directory working set.
//!
//! # Responsibility
//! - Define the snapshot store boundary used by the directory service.
//! - Keep SQL details inside the repository implementation.

pub mod snapshot_repo;
