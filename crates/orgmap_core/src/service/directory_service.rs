//! Directory use-case service.
//!
//! # Responsibility
//! - Hold the current person forest as the single source of truth.
//! - Provide create/update/delete/import operations that preserve forest
//!   invariants, including re-parenting on delete.
//! - Persist the working set after every mutation.
//!
//! # Invariants
//! - Manager links always target an existing, non-placeholder person.
//! - Manager chains never cycle, including self-reference.
//! - Hierarchy back-references are derived on read, never stored.
//! - A failed save surfaces an error but does not roll back the in-memory
//!   mutation; the working set is the new, not-yet-persisted value.

use crate::import::hierarchy::{build_hierarchy, seed_openings, ImportReport, OpeningSeed};
use crate::import::record::{normalize_cell, ImportRecord};
use crate::model::person::{ManagerPatch, NewPerson, OrgNode, Person, PersonId, PersonUpdate};
use crate::repo::snapshot_repo::{SnapshotError, SnapshotStore};
use crate::seed;
use log::{error, info};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Errors from directory service operations.
#[derive(Debug)]
pub enum DirectoryError {
    /// A person with the same display name already exists.
    DuplicateName(String),
    /// Target person does not exist.
    PersonNotFound(PersonId),
    /// Requested manager does not exist.
    ManagerNotFound(PersonId),
    /// Requested manager is an open-position placeholder.
    ManagerIsOpening(PersonId),
    /// Requested manager link would create a cycle.
    CycleDetected {
        person: PersonId,
        manager: PersonId,
    },
    /// Snapshot persistence failure; the in-memory state was kept.
    Snapshot(SnapshotError),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "person named `{name}` already exists"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::ManagerNotFound(id) => write!(f, "manager not found: {id}"),
            Self::ManagerIsOpening(id) => {
                write!(f, "open position cannot have reports: {id}")
            }
            Self::CycleDetected { person, manager } => write!(
                f,
                "manager link would create cycle: person {person} under manager {manager}"
            ),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SnapshotError> for DirectoryError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Directory service facade over a snapshot store.
pub struct DirectoryService<S: SnapshotStore> {
    store: S,
    people: Vec<Person>,
}

impl<S: SnapshotStore> DirectoryService<S> {
    /// Opens the directory from its snapshot store.
    ///
    /// Loads the stored working set, or seeds the fixed default dataset
    /// (and persists it) when the store holds no snapshot yet.
    pub fn open(store: S) -> Result<Self, DirectoryError> {
        match store.load()? {
            Some(people) => {
                info!(
                    "event=directory_open module=service status=ok source=snapshot count={}",
                    people.len()
                );
                Ok(Self { store, people })
            }
            None => {
                let mut report = build_hierarchy(&seed::default_records());
                seed_openings(&mut report.people, &seed::default_openings());
                info!(
                    "event=directory_open module=service status=ok source=seed count={}",
                    report.people.len()
                );
                let mut service = Self {
                    store,
                    people: report.people,
                };
                service.persist()?;
                Ok(service)
            }
        }
    }

    /// Returns the working set in insertion order.
    pub fn list(&self) -> &[Person] {
        &self.people
    }

    /// Returns one person by ID.
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    /// Resolves the manager back-reference for one person.
    pub fn manager_of(&self, id: PersonId) -> Option<&Person> {
        let manager_id = self.get(id)?.manager_id?;
        self.get(manager_id)
    }

    /// Lists direct reports of one person, in insertion order.
    pub fn employees_of(&self, id: PersonId) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|person| person.manager_id == Some(id))
            .collect()
    }

    /// Builds the derived hierarchy view for renderers.
    ///
    /// Roots and reports keep insertion order. Persons whose manager ID
    /// resolves to nothing are treated as roots rather than dropped.
    pub fn forest(&self) -> Vec<OrgNode> {
        let known: HashSet<PersonId> = self.people.iter().map(|person| person.id).collect();
        let mut children: HashMap<PersonId, Vec<&Person>> = HashMap::new();
        let mut roots: Vec<&Person> = Vec::new();

        for person in &self.people {
            match person.manager_id {
                Some(manager_id) if known.contains(&manager_id) => {
                    children.entry(manager_id).or_default().push(person);
                }
                _ => roots.push(person),
            }
        }

        roots
            .into_iter()
            .map(|person| build_node(person, &children))
            .collect()
    }

    /// Creates one person.
    ///
    /// Rejects duplicate display names (case-insensitive on the normalized
    /// name); the bulk import path deliberately does not apply this check.
    /// A supplied manager must exist and must not be an open position.
    pub fn create(&mut self, draft: NewPerson) -> Result<Person, DirectoryError> {
        let name = normalize_cell(&draft.name);
        if self.name_taken(&name) {
            return Err(DirectoryError::DuplicateName(name));
        }
        if let Some(manager_id) = draft.manager_id {
            self.ensure_valid_manager(manager_id)?;
        }

        let mut person = Person::with_id(Uuid::new_v4(), name, draft.title);
        person.email = draft.email;
        person.department = draft.department;
        person.location = draft.location;
        person.manager_id = draft.manager_id;
        person.is_hiring = draft.is_hiring;

        self.people.push(person.clone());
        self.persist()?;
        Ok(person)
    }

    /// Merges the supplied fields into one person.
    ///
    /// The ID is never touched. Manager changes are fully supported: the
    /// new manager must exist, must not be an open position, and must not
    /// close a cycle through the updated person.
    pub fn update(&mut self, id: PersonId, patch: PersonUpdate) -> Result<Person, DirectoryError> {
        let index = self
            .people
            .iter()
            .position(|person| person.id == id)
            .ok_or(DirectoryError::PersonNotFound(id))?;

        if let Some(ManagerPatch::Assign(manager_id)) = patch.manager {
            if manager_id == id {
                return Err(DirectoryError::CycleDetected {
                    person: id,
                    manager: manager_id,
                });
            }
            self.ensure_valid_manager(manager_id)?;
            if self.would_create_cycle(id, manager_id) {
                return Err(DirectoryError::CycleDetected {
                    person: id,
                    manager: manager_id,
                });
            }
        }

        let person = &mut self.people[index];
        if let Some(name) = patch.name {
            person.name = normalize_cell(&name);
        }
        if let Some(title) = patch.title {
            person.title = title;
        }
        if let Some(email) = patch.email {
            person.email = Some(email);
        }
        if let Some(department) = patch.department {
            person.department = Some(department);
        }
        if let Some(location) = patch.location {
            person.location = Some(location);
        }
        match patch.manager {
            Some(ManagerPatch::Assign(manager_id)) => person.manager_id = Some(manager_id),
            Some(ManagerPatch::Clear) => person.manager_id = None,
            None => {}
        }

        let updated = person.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Deletes one person, re-parenting their direct reports.
    ///
    /// Every report of the deleted person is re-pointed at the deleted
    /// person's own manager, so the subtree loses exactly one level and
    /// the count shrinks by exactly one.
    pub fn delete(&mut self, id: PersonId) -> Result<(), DirectoryError> {
        let index = self
            .people
            .iter()
            .position(|person| person.id == id)
            .ok_or(DirectoryError::PersonNotFound(id))?;
        let grand_manager = self.people[index].manager_id;

        for person in &mut self.people {
            if person.manager_id == Some(id) {
                person.manager_id = grand_manager;
            }
        }
        self.people.remove(index);
        self.persist()?;
        Ok(())
    }

    /// Replaces the working set with a freshly imported batch.
    ///
    /// Re-importing never appends: the previous working set is discarded
    /// wholesale. Opening seeds are applied after linking; pass an empty
    /// slice to skip demo seeding.
    pub fn import(
        &mut self,
        records: &[ImportRecord],
        openings: &[OpeningSeed],
    ) -> Result<ImportReport, DirectoryError> {
        let mut report = build_hierarchy(records);
        seed_openings(&mut report.people, openings);
        info!(
            "event=directory_import module=service status=ok count={} duplicates={} unresolved={}",
            report.people.len(),
            report.duplicate_names.len(),
            report.unresolved_managers.len()
        );

        self.people = report.people.clone();
        self.persist()?;
        Ok(report)
    }

    fn name_taken(&self, name: &str) -> bool {
        self.people
            .iter()
            .any(|person| person.name.eq_ignore_ascii_case(name))
    }

    fn ensure_valid_manager(&self, manager_id: PersonId) -> Result<(), DirectoryError> {
        let manager = self
            .get(manager_id)
            .ok_or(DirectoryError::ManagerNotFound(manager_id))?;
        if manager.is_hiring {
            return Err(DirectoryError::ManagerIsOpening(manager_id));
        }
        Ok(())
    }

    fn would_create_cycle(&self, person_id: PersonId, candidate_manager_id: PersonId) -> bool {
        let mut visited = HashSet::new();
        let mut cursor = Some(candidate_manager_id);
        while let Some(current) = cursor {
            if current == person_id {
                return true;
            }
            if !visited.insert(current) {
                return true;
            }
            cursor = self.get(current).and_then(|person| person.manager_id);
        }
        false
    }

    fn persist(&mut self) -> Result<(), DirectoryError> {
        if let Err(err) = self.store.save(&self.people) {
            error!(
                "event=snapshot_save module=service status=error count={} error={}",
                self.people.len(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }
}

fn build_node<'a>(person: &'a Person, children: &HashMap<PersonId, Vec<&'a Person>>) -> OrgNode {
    let employees = children
        .get(&person.id)
        .map(|reports| {
            reports
                .iter()
                .map(|report| build_node(report, children))
                .collect()
        })
        .unwrap_or_default();
    OrgNode {
        person: person.clone(),
        employees,
    }
}
