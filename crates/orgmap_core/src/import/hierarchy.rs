//! Hierarchy builder: import records -> person forest.
//!
//! # Responsibility
//! - Materialize uniquely identified persons from one import batch.
//! - Resolve name-based manager references into forest links.
//! - Report resolution problems without failing the import.
//!
//! # Invariants
//! - The built forest is acyclic, including self-references; a link that
//!   would close a loop is dropped and reported instead.
//! - Duplicate names keep one index entry (last write wins); the collision
//!   is reported, not corrected.
//! - Empty or unmatched manager names leave the person a forest root.

use crate::import::record::ImportRecord;
use crate::model::person::{Person, PersonId};
use log::info;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// One unresolved manager reference from a bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedManager {
    /// Display name of the person whose manager could not be resolved.
    pub person_name: String,
    /// The manager name that matched nothing (or only the person itself).
    pub manager_name: String,
}

/// Outcome of one bulk import build.
///
/// The build itself always succeeds; this report carries the forest plus
/// the diagnostics a caller may want to surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// The built forest, in input order.
    pub people: Vec<Person>,
    /// Names that collided in the resolution index.
    pub duplicate_names: Vec<String>,
    /// Manager references that fell back to root.
    pub unresolved_managers: Vec<UnresolvedManager>,
}

/// Open-position seeding policy entry.
///
/// Seeding is explicit caller policy layered on top of a built forest, not
/// builder behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningSeed {
    /// Department whose first root-level person anchors the opening.
    pub department: String,
    /// Role label for the placeholder.
    pub title: String,
}

impl OpeningSeed {
    pub fn new(department: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            title: title.into(),
        }
    }
}

/// Builds a person forest from one batch of import records.
///
/// Two passes: first every record becomes a person with a fresh ID and the
/// name index is filled; then manager names are resolved against that
/// index. A manager name resolving to the person's own entry, or one whose
/// link would close a loop through already-set links, is treated as
/// unresolved.
pub fn build_hierarchy(records: &[ImportRecord]) -> ImportReport {
    let mut people = Vec::with_capacity(records.len());
    let mut name_index: HashMap<String, PersonId> = HashMap::new();
    let mut duplicate_names = Vec::new();
    let mut seen_duplicates = HashSet::new();

    for record in records {
        let mut person =
            Person::with_id(Uuid::new_v4(), record.name.as_str(), record.title.as_str());
        person.email = record.email.clone();
        person.department = record.department.clone();
        person.location = record.location.clone();

        if !record.name.is_empty() {
            let previous = name_index.insert(record.name.clone(), person.id);
            if previous.is_some() && seen_duplicates.insert(record.name.clone()) {
                duplicate_names.push(record.name.clone());
            }
        }
        people.push(person);
    }

    // Mutual references through duplicate or crossed names could close a
    // loop; links are only set when the chain stays acyclic.
    let mut manager_links: HashMap<PersonId, PersonId> = HashMap::new();
    let mut unresolved_managers = Vec::new();
    for (record, person) in records.iter().zip(people.iter_mut()) {
        let Some(manager_name) = record.manager_name.as_deref() else {
            continue;
        };
        match name_index.get(manager_name) {
            Some(&manager_id)
                if manager_id != person.id
                    && !links_back(&manager_links, manager_id, person.id) =>
            {
                person.manager_id = Some(manager_id);
                manager_links.insert(person.id, manager_id);
            }
            _ => unresolved_managers.push(UnresolvedManager {
                person_name: person.name.clone(),
                manager_name: manager_name.to_string(),
            }),
        }
    }

    info!(
        "event=import_build module=import status=ok people={} duplicates={} unresolved={}",
        people.len(),
        duplicate_names.len(),
        unresolved_managers.len()
    );

    ImportReport {
        people,
        duplicate_names,
        unresolved_managers,
    }
}

fn links_back(
    links: &HashMap<PersonId, PersonId>,
    from: PersonId,
    target: PersonId,
) -> bool {
    let mut visited = HashSet::new();
    let mut cursor = Some(from);
    while let Some(current) = cursor {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            return true;
        }
        cursor = links.get(&current).copied();
    }
    false
}

/// Appends open-position placeholders according to the given seeds.
///
/// Each seed attaches one `is_hiring` placeholder under the first
/// root-level real person of the named department; seeds with no such
/// anchor are skipped. Returns how many placeholders were appended.
pub fn seed_openings(people: &mut Vec<Person>, seeds: &[OpeningSeed]) -> usize {
    let mut appended = 0;
    for seed in seeds {
        let anchor = people.iter().find(|person| {
            person.is_root()
                && !person.is_hiring
                && person.department.as_deref() == Some(seed.department.as_str())
        });
        let Some(anchor_id) = anchor.map(|person| person.id) else {
            continue;
        };

        let mut opening = Person::opening(seed.title.as_str(), seed.department.as_str());
        opening.manager_id = Some(anchor_id);
        people.push(opening);
        appended += 1;
    }
    appended
}
