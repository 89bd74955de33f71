//! Row-to-record extraction for tabular imports.
//!
//! # Responsibility
//! - Pull person fields out of one raw row keyed by arbitrary column names.
//! - Normalize extracted text for downstream name matching.
//!
//! # Invariants
//! - Column lookup is case-insensitive against a fixed alias set.
//! - Extraction never fails; a row without a usable name yields a record
//!   with an empty name. Downstream code must tolerate empty and duplicate
//!   names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One raw tabular row: column name -> cell text.
pub type RawRow = HashMap<String, String>;

/// Normalized person fields extracted from one raw row.
///
/// `manager_name` is a display name, not an ID; resolution happens in the
/// hierarchy builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRecord {
    pub name: String,
    pub title: String,
    pub manager_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
}

impl ImportRecord {
    /// Convenience constructor for seed data and tests.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: normalize_cell(&name.into()),
            title: normalize_cell(&title.into()),
            ..Self::default()
        }
    }

    /// Sets the manager display name.
    pub fn with_manager(mut self, manager_name: impl Into<String>) -> Self {
        self.manager_name = some_nonempty(&manager_name.into());
        self
    }

    /// Sets the department name.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = some_nonempty(&department.into());
        self
    }

    /// Sets the contact address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = some_nonempty(&email.into());
        self
    }

    /// Sets the office/location label.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = some_nonempty(&location.into());
        self
    }
}

/// Extracts one [`ImportRecord`] from a raw row.
///
/// Column names are matched case-insensitively against the fixed alias set
/// (`name`, `title`, `manager`, `email`, `department`, `location`). Values
/// are trimmed and internal whitespace is collapsed. Missing or blank name
/// and title come back as empty strings; the optional fields as `None`.
pub fn parse_record(row: &RawRow) -> ImportRecord {
    ImportRecord {
        name: lookup(row, "name").unwrap_or_default(),
        title: lookup(row, "title").unwrap_or_default(),
        manager_name: lookup(row, "manager"),
        email: lookup(row, "email"),
        department: lookup(row, "department"),
        location: lookup(row, "location"),
    }
}

/// Collapses runs of whitespace and trims the ends of one cell value.
pub fn normalize_cell(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

fn lookup(row: &RawRow, column: &str) -> Option<String> {
    row.iter()
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(column))
        .and_then(|(_, value)| some_nonempty(value))
}

fn some_nonempty(value: &str) -> Option<String> {
    let normalized = normalize_cell(value);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_cell, parse_record, RawRow};

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn extracts_capitalized_and_lowercase_columns() {
        let capitalized = parse_record(&row(&[
            ("Name", "Ada Lovelace"),
            ("Title", "CTO"),
            ("Manager", "Charles Babbage"),
        ]));
        assert_eq!(capitalized.name, "Ada Lovelace");
        assert_eq!(capitalized.title, "CTO");
        assert_eq!(capitalized.manager_name.as_deref(), Some("Charles Babbage"));

        let lowercase = parse_record(&row(&[("name", "Ada Lovelace"), ("title", "CTO")]));
        assert_eq!(lowercase.name, "Ada Lovelace");
        assert_eq!(lowercase.title, "CTO");
    }

    #[test]
    fn missing_name_yields_empty_record_not_error() {
        let record = parse_record(&row(&[("Title", "Engineer")]));
        assert_eq!(record.name, "");
        assert_eq!(record.title, "Engineer");
        assert!(record.manager_name.is_none());
    }

    #[test]
    fn blank_optional_cells_become_none() {
        let record = parse_record(&row(&[
            ("Name", "Ada"),
            ("Manager", "   "),
            ("Email", ""),
            ("Department", "Technology"),
        ]));
        assert!(record.manager_name.is_none());
        assert!(record.email.is_none());
        assert_eq!(record.department.as_deref(), Some("Technology"));
    }

    #[test]
    fn normalize_cell_collapses_internal_whitespace() {
        assert_eq!(normalize_cell("  Ada \t Lovelace \n"), "Ada Lovelace");
        assert_eq!(normalize_cell(""), "");
    }
}
