//! Projection horizon vocabulary.
//!
//! # Responsibility
//! - Name the fixed set of time horizons and their wire tokens.
//!
//! # Invariants
//! - Horizons are totally ordered from `current` outward.
//! - Unrecognized tokens fall back to `current`.

use serde::{Deserialize, Serialize};

/// Named future time point for projected department views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// The real, unprojected directory.
    #[serde(rename = "current")]
    Current,
    /// Six months out.
    #[serde(rename = "+6months")]
    SixMonths,
    /// One year out.
    #[serde(rename = "+1year")]
    OneYear,
    /// Three years out.
    #[serde(rename = "+3years")]
    ThreeYears,
}

impl Horizon {
    /// All horizons, shortest first.
    pub const ALL: [Horizon; 4] = [
        Horizon::Current,
        Horizon::SixMonths,
        Horizon::OneYear,
        Horizon::ThreeYears,
    ];

    /// Returns the wire token for this horizon.
    pub fn token(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::SixMonths => "+6months",
            Self::OneYear => "+1year",
            Self::ThreeYears => "+3years",
        }
    }

    /// Parses a wire token, or `None` when unrecognized.
    pub fn from_token(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "current" => Some(Self::Current),
            "+6months" => Some(Self::SixMonths),
            "+1year" => Some(Self::OneYear),
            "+3years" => Some(Self::ThreeYears),
            _ => None,
        }
    }

    /// Parses a wire token with the documented fallback to `current`.
    pub fn parse(value: &str) -> Self {
        Self::from_token(value).unwrap_or(Self::Current)
    }
}
