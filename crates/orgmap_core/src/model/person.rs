//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical record for real employees and open positions.
//! - Provide draft/patch types used by directory write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another person.
//! - `manager_id == None` marks a forest root.
//! - Open positions (`is_hiring`) may have a manager but never reports.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every person in the directory.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = Uuid;

/// Canonical record for one directory entry.
///
/// A person is either a real employee or a synthetic open position
/// (`is_hiring = true`). Both participate in the same forest structure.
/// Hierarchy back-references are intentionally not stored here; they are
/// derived on read from `manager_id` (see [`OrgNode`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Stable global ID used for linking and snapshots.
    pub id: PersonId,
    /// Display name. Sole matching key for manager resolution at import
    /// time; not guaranteed unique.
    pub name: String,
    /// Role label, free text.
    pub title: String,
    /// Optional contact address.
    pub email: Option<String>,
    /// Optional department name; exact-match key for projection grouping.
    pub department: Option<String>,
    /// Optional office/location label.
    pub location: Option<String>,
    /// Manager link. `None` means forest root.
    pub manager_id: Option<PersonId>,
    /// Marks a synthetic open position instead of a real employee.
    pub is_hiring: bool,
}

impl Person {
    /// Creates a new person with a generated stable ID.
    ///
    /// # Invariants
    /// - Optional descriptive fields start as `None`.
    /// - The person starts as a forest root (`manager_id = None`).
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, title)
    }

    /// Creates a new person with a caller-provided stable ID.
    ///
    /// Used by import paths where the ID was already generated for index
    /// bookkeeping.
    pub fn with_id(id: PersonId, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: title.into(),
            email: None,
            department: None,
            location: None,
            manager_id: None,
            is_hiring: false,
        }
    }

    /// Creates a synthetic open-position placeholder for one department.
    pub fn opening(title: impl Into<String>, department: impl Into<String>) -> Self {
        let mut person = Self::new("Open position", title);
        person.department = Some(department.into());
        person.is_hiring = true;
        person
    }

    /// Returns whether this person is a forest root.
    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }
}

/// Draft for creating one person through the directory.
///
/// The ID is generated by the directory; everything else is caller input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub title: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub manager_id: Option<PersonId>,
    pub is_hiring: bool,
}

/// Manager change requested through [`PersonUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerPatch {
    /// Re-parent under the given manager.
    Assign(PersonId),
    /// Detach into a forest root.
    Clear,
}

/// Partial field merge for updating one person.
///
/// `None` leaves the corresponding field unchanged; the ID is never
/// touched. Manager changes go through [`ManagerPatch`] so the directory
/// can run existence and cycle checks before applying them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub manager: Option<ManagerPatch>,
}

/// Derived hierarchy read model for renderers.
///
/// Built on demand from `manager_id` links; never persisted. Reports keep
/// directory insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNode {
    /// The person at this node.
    pub person: Person,
    /// Direct reports, in directory insertion order.
    pub employees: Vec<OrgNode>,
}
