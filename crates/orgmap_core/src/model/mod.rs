//! Domain model for the organization directory.
//!
//! # Responsibility
//! - Define the canonical person record shared by import, directory and
//!   projection code.
//! - Keep derived hierarchy views as read models, never as stored state.
//!
//! # Invariants
//! - Every person is identified by a stable `PersonId`.
//! - Manager links form a forest; derived views are rebuilt from
//!   `manager_id` on read.

pub mod person;
