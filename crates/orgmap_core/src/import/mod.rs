//! Tabular import pipeline: raw rows -> records -> person forest.
//!
//! # Responsibility
//! - Extract person records from loosely structured tabular rows.
//! - Resolve name-based manager references into a consistent forest.
//!
//! # Invariants
//! - Record extraction and hierarchy linking never fail; problems are
//!   reported, not raised.
//! - Built forests are acyclic by construction.

pub mod hierarchy;
pub mod record;
pub mod tabular;
