//! Use-case services over the directory working set.
//!
//! # Responsibility
//! - Enforce forest invariants above the persistence boundary.
//! - Keep the service layer storage-agnostic behind the snapshot trait.

pub mod directory_service;
