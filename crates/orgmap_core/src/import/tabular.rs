//! CSV text ingestion into raw rows.
//!
//! # Responsibility
//! - Turn CSV text with a header row into the row maps consumed by the
//!   record extractor.
//! - Stay permissive: ragged rows are tolerated, fields are trimmed.
//!
//! # Invariants
//! - Only structurally unreadable CSV produces an error.
//! - Cells beyond the header width are dropped; missing cells are absent
//!   from the row map.

use crate::import::record::RawRow;
use csv::ReaderBuilder;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for tabular ingestion.
pub type TabularResult<T> = Result<T, TabularError>;

/// Error for unreadable tabular input.
#[derive(Debug)]
pub enum TabularError {
    /// The CSV reader could not decode the input structure.
    Csv(csv::Error),
}

impl Display for TabularError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "unreadable tabular input: {err}"),
        }
    }
}

impl Error for TabularError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for TabularError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Reads CSV text with a header row into raw row maps.
///
/// Header names are kept verbatim; case-insensitive alias matching happens
/// in the record extractor. Rows shorter or longer than the header are
/// accepted.
pub fn parse_rows(text: &str) -> TabularResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (index, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = record.get(index) {
                row.insert(header.to_string(), value.to_string());
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::parse_rows;

    #[test]
    fn reads_header_keyed_rows() {
        let rows = parse_rows("Name,Title,Manager\nAda,CEO,\nGrace,CTO,Ada\n")
            .expect("well-formed csv parses");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Name").map(String::as_str), Some("Ada"));
        assert_eq!(rows[1].get("Manager").map(String::as_str), Some("Ada"));
    }

    #[test]
    fn tolerates_short_rows() {
        let rows = parse_rows("Name,Title,Manager\nAda\n").expect("ragged csv parses");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Name").map(String::as_str), Some("Ada"));
        assert!(rows[0].get("Title").is_none());
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let rows = parse_rows("").expect("empty input parses");
        assert!(rows.is_empty());
    }
}
