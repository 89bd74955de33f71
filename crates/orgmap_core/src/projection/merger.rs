//! Projection merger: directory + horizon library -> department groups.
//!
//! # Responsibility
//! - Group the real directory by department.
//! - Layer per-horizon synthetic additions cumulatively on top.
//!
//! # Invariants
//! - Department merge is by exact name; employee lists are concatenated,
//!   never deduplicated.
//! - Group order and in-group order are first-seen-first-kept.
//! - For horizons H1 < H2, every department's employee list at H1 is a
//!   prefix of its list at H2 (monotonic growth).

use crate::model::person::Person;
use crate::projection::horizon::Horizon;
use serde::Serialize;
use std::collections::HashMap;

/// Stable palette cycled over departments in first-seen order.
const COLOR_KEYS: [&str; 8] = [
    "indigo", "teal", "amber", "rose", "emerald", "violet", "cyan", "slate",
];

/// Renderer-facing department group for one horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentGroup {
    /// Exact department name used as the merge key.
    #[serde(rename = "departmentName")]
    pub name: String,
    /// Stable display color key from the fixed palette.
    pub color_key: String,
    /// Merged employees (real + synthetic) at the requested horizon.
    pub employees: Vec<Person>,
}

/// Hand-authored synthetic additions for one department at one horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentAdditions {
    /// Exact department name to merge into.
    pub department: String,
    /// Synthetic `is_hiring` entries that would exist at the horizon.
    pub hires: Vec<Person>,
}

impl DepartmentAdditions {
    pub fn new(department: impl Into<String>, hires: Vec<Person>) -> Self {
        Self {
            department: department.into(),
            hires,
        }
    }
}

/// Per-horizon library of synthetic department additions.
///
/// `current` has no additions by definition; each longer horizon's view is
/// built on top of the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionLibrary {
    pub six_months: Vec<DepartmentAdditions>,
    pub one_year: Vec<DepartmentAdditions>,
    pub three_years: Vec<DepartmentAdditions>,
}

impl ProjectionLibrary {
    /// Returns the additions authored for exactly one horizon.
    pub fn additions_for(&self, horizon: Horizon) -> &[DepartmentAdditions] {
        match horizon {
            Horizon::Current => &[],
            Horizon::SixMonths => &self.six_months,
            Horizon::OneYear => &self.one_year,
            Horizon::ThreeYears => &self.three_years,
        }
    }
}

/// Computes the department-grouped view for one horizon.
///
/// Base groups come from the real directory (persons without a department
/// stay out of the department view); every horizon up to and including the
/// requested one then appends its additions. Departments introduced only
/// by additions are appended in first-seen order.
pub fn project(
    people: &[Person],
    library: &ProjectionLibrary,
    horizon: Horizon,
) -> Vec<DepartmentGroup> {
    let mut groups: Vec<DepartmentGroup> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for person in people {
        let Some(department) = person.department.as_deref() else {
            continue;
        };
        let index = group_index(&mut groups, &mut index_by_name, department);
        groups[index].employees.push(person.clone());
    }

    for layer in Horizon::ALL {
        if layer > horizon {
            break;
        }
        for additions in library.additions_for(layer) {
            let index = group_index(&mut groups, &mut index_by_name, &additions.department);
            groups[index].employees.extend(additions.hires.iter().cloned());
        }
    }

    groups
}

fn group_index(
    groups: &mut Vec<DepartmentGroup>,
    index_by_name: &mut HashMap<String, usize>,
    department: &str,
) -> usize {
    if let Some(index) = index_by_name.get(department) {
        return *index;
    }
    let index = groups.len();
    groups.push(DepartmentGroup {
        name: department.to_string(),
        color_key: COLOR_KEYS[index % COLOR_KEYS.len()].to_string(),
        employees: Vec::new(),
    });
    index_by_name.insert(department.to_string(), index);
    index
}
