//! Fixed default datasets.
//!
//! # Responsibility
//! - Provide the seed directory used when the snapshot store is empty.
//! - Provide the default opening seeds and projection library.
//!
//! # Invariants
//! - Seed records go through the regular import pipeline, so seeding
//!   exercises the same linking rules as a real import.

use crate::import::hierarchy::OpeningSeed;
use crate::import::record::ImportRecord;
use crate::model::person::Person;
use crate::projection::merger::{DepartmentAdditions, ProjectionLibrary};

/// Seed records for a fresh session with no stored snapshot.
///
/// Two forest roots on purpose: the default opening seeds anchor on the
/// first root-level person of their department.
pub fn default_records() -> Vec<ImportRecord> {
    vec![
        ImportRecord::new("Evelyn Park", "Chief Executive Officer")
            .with_department("Technology")
            .with_email("evelyn.park@orgmap.dev")
            .with_location("San Francisco"),
        ImportRecord::new("Marcus Webb", "Chief Financial Officer")
            .with_department("Finance")
            .with_email("marcus.webb@orgmap.dev")
            .with_location("New York"),
        ImportRecord::new("Dana Kovacs", "VP Engineering")
            .with_manager("Evelyn Park")
            .with_department("Technology")
            .with_location("Berlin"),
        ImportRecord::new("Sofia Ramos", "Backend Engineer")
            .with_manager("Dana Kovacs")
            .with_department("Technology"),
        ImportRecord::new("Elena Petrova", "Frontend Engineer")
            .with_manager("Dana Kovacs")
            .with_department("Technology"),
        ImportRecord::new("Noah Lindqvist", "Product Designer")
            .with_manager("Dana Kovacs")
            .with_department("Technology")
            .with_location("Stockholm"),
        ImportRecord::new("James Whitfield", "Controller")
            .with_manager("Marcus Webb")
            .with_department("Finance"),
        ImportRecord::new("Amara Diallo", "Marketing Lead")
            .with_manager("Evelyn Park")
            .with_department("Marketing"),
    ]
}

/// Default open-position seeds applied when seeding a fresh store.
pub fn default_openings() -> Vec<OpeningSeed> {
    vec![
        OpeningSeed::new("Technology", "Senior Backend Engineer"),
        OpeningSeed::new("Finance", "Financial Analyst"),
    ]
}

/// Hand-authored synthetic additions for the three future horizons.
///
/// Authored so no person appears in two layers; the merger concatenates
/// without deduplication.
pub fn default_projection_library() -> ProjectionLibrary {
    ProjectionLibrary {
        six_months: vec![
            DepartmentAdditions::new(
                "Technology",
                vec![
                    Person::opening("Site Reliability Engineer", "Technology"),
                    Person::opening("QA Engineer", "Technology"),
                ],
            ),
            DepartmentAdditions::new(
                "Finance",
                vec![Person::opening("Accounts Payable Specialist", "Finance")],
            ),
        ],
        one_year: vec![
            DepartmentAdditions::new(
                "Technology",
                vec![Person::opening("Platform Engineer", "Technology")],
            ),
            DepartmentAdditions::new(
                "Marketing",
                vec![
                    Person::opening("Content Strategist", "Marketing"),
                    Person::opening("Growth Marketer", "Marketing"),
                ],
            ),
        ],
        three_years: vec![
            DepartmentAdditions::new(
                "Technology",
                vec![
                    Person::opening("Engineering Manager", "Technology"),
                    Person::opening("Data Engineer", "Technology"),
                ],
            ),
            DepartmentAdditions::new(
                "Finance",
                vec![Person::opening("Payroll Specialist", "Finance")],
            ),
            DepartmentAdditions::new(
                "People Operations",
                vec![
                    Person::opening("Head of People", "People Operations"),
                    Person::opening("Talent Partner", "People Operations"),
                ],
            ),
        ],
    }
}
