//! Snapshot store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and reload the whole person collection as one snapshot.
//! - Keep serialization and SQL details inside the repository boundary.
//!
//! # Invariants
//! - A save fully replaces the stored snapshot for its namespace; there
//!   are no partial writes.
//! - `load` returns `None` when the namespace has never been saved.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::person::Person;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Namespace under which the directory keeps its working set.
pub const DEFAULT_NAMESPACE: &str = "orgmap.people";

/// Result type used by snapshot store operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors from snapshot store operations.
#[derive(Debug)]
pub enum SnapshotError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Stored or outgoing payload could not be (de)serialized.
    Payload(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "invalid snapshot payload: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "snapshot store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "snapshot store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Payload(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for SnapshotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

/// Store interface for whole-collection snapshots.
pub trait SnapshotStore {
    /// Loads the stored collection, or `None` when nothing was saved yet.
    fn load(&self) -> SnapshotResult<Option<Vec<Person>>>;
    /// Replaces the stored collection with the given one.
    fn save(&self, people: &[Person]) -> SnapshotResult<()>;
}

/// SQLite-backed snapshot store, one row per namespace.
#[derive(Debug)]
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
    namespace: &'static str,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    /// Creates a store on the default namespace from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> SnapshotResult<Self> {
        Self::with_namespace(conn, DEFAULT_NAMESPACE)
    }

    /// Creates a store on a caller-chosen namespace.
    pub fn with_namespace(
        conn: &'conn Connection,
        namespace: &'static str,
    ) -> SnapshotResult<Self> {
        ensure_snapshot_connection_ready(conn)?;
        Ok(Self { conn, namespace })
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn load(&self) -> SnapshotResult<Option<Vec<Person>>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload
                 FROM snapshots
                 WHERE namespace = ?1;",
                [self.namespace],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            None => Ok(None),
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
        }
    }

    fn save(&self, people: &[Person]) -> SnapshotResult<()> {
        let payload = serde_json::to_string(people)?;
        self.conn.execute(
            "INSERT INTO snapshots (namespace, payload)
             VALUES (?1, ?2)
             ON CONFLICT(namespace) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.namespace, payload],
        )?;
        Ok(())
    }
}

fn ensure_snapshot_connection_ready(conn: &Connection) -> SnapshotResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(SnapshotError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "snapshots")? {
        return Err(SnapshotError::MissingRequiredTable("snapshots"));
    }

    for column in ["namespace", "payload", "created_at", "updated_at"] {
        if !table_has_column(conn, "snapshots", column)? {
            return Err(SnapshotError::MissingRequiredColumn {
                table: "snapshots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> SnapshotResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> SnapshotResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
