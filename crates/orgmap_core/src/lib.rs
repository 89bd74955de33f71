//! Core domain logic for orgmap.
//! This crate is the single source of truth for hierarchy invariants.

pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod seed;
pub mod service;

pub use import::hierarchy::{
    build_hierarchy, seed_openings, ImportReport, OpeningSeed, UnresolvedManager,
};
pub use import::record::{parse_record, ImportRecord, RawRow};
pub use import::tabular::{parse_rows, TabularError, TabularResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person::{ManagerPatch, NewPerson, OrgNode, Person, PersonId, PersonUpdate};
pub use projection::horizon::Horizon;
pub use projection::merger::{project, DepartmentAdditions, DepartmentGroup, ProjectionLibrary};
pub use repo::snapshot_repo::{
    SnapshotError, SnapshotResult, SnapshotStore, SqliteSnapshotStore, DEFAULT_NAMESPACE,
};
pub use service::directory_service::{DirectoryError, DirectoryService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
