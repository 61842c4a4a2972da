//! Task priority codes and their ranking.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Rank assigned to any priority code outside `H|M|L`.
pub const UNRECOGNIZED_RANK: u8 = 99;

/// Task urgency level.
///
/// Persisted as the single-character codes `H`, `M` and `L`. Any other code
/// is kept verbatim so that stored data round-trips, and ranks last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
    Unrecognized(UnrecognizedCode),
}

/// A priority code outside `H|M|L` in either case.
///
/// Only `Priority::from_code` builds one, so a known code can never hide
/// behind `Priority::Unrecognized` and change meaning on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnrecognizedCode(char);

impl UnrecognizedCode {
    pub fn code(self) -> char {
        self.0
    }
}

impl Priority {
    /// Returns the ordering rank: lower is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Unrecognized(_) => UNRECOGNIZED_RANK,
        }
    }

    /// Parses a one-character priority code, case-insensitively.
    pub fn from_code(code: char) -> Self {
        match code.to_ascii_uppercase() {
            'H' => Self::High,
            'M' => Self::Medium,
            'L' => Self::Low,
            _ => Self::Unrecognized(UnrecognizedCode(code)),
        }
    }

    /// Returns the one-character persisted code.
    pub fn code(self) -> char {
        match self {
            Self::High => 'H',
            Self::Medium => 'M',
            Self::Low => 'L',
            Self::Unrecognized(unrecognized) => unrecognized.code(),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrecognized(_) => "Unknown",
        }
    }
}

impl From<char> for Priority {
    fn from(value: char) -> Self {
        Self::from_code(value)
    }
}

impl From<Priority> for char {
    fn from(value: Priority) -> Self {
        value.code()
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
