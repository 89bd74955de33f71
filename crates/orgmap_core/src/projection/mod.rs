//! Horizon-scoped department projections.
//!
//! # Responsibility
//! - Define the future-horizon vocabulary.
//! - Merge synthetic per-horizon additions onto the real department
//!   assignments.
//!
//! # Invariants
//! - Longer horizons only ever grow department employee sets.

pub mod horizon;
pub mod merger;
