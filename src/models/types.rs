//! Common domain type definitions
//!
//! This module contains common enum types used across the record models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recorded sex of an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male
    #[serde(rename = "M")]
    Male,
    /// Female
    #[serde(rename = "F")]
    Female,
    /// Unknown or not specified
    #[serde(rename = "U")]
    Unknown,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "U",
        };
        f.write_str(code)
    }
}

/// Role of an individual within a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyRole {
    /// Listed as the family's husband
    Husband,
    /// Listed as the family's wife
    Wife,
    /// Listed among the family's children
    Child,
}

impl FamilyRole {
    /// Field name used when reporting problems with this role
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Child => "children",
        }
    }
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Child => "child",
        };
        f.write_str(role)
    }
}
