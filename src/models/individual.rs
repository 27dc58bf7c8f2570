//! Individual entity model
//!
//! An Individual is one person in the record set. Dates are kept exactly as the
//! upstream parser produced them and are parsed on access, so a malformed date
//! only affects the rules that read it.

use crate::error::Result;
use crate::models::types::Sex;
use crate::utils::date_utils::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Core Individual entity representing a person in the record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// Unique identifier token (e.g. `I1`)
    pub id: String,
    /// Full name, surname delimited by slashes (`John /Smith/`)
    pub name: String,
    /// Recorded sex
    pub sex: Sex,
    /// Birth date text, if recorded
    #[serde(default)]
    pub birth: Option<String>,
    /// Death date text; absence means presumed alive
    #[serde(default)]
    pub death: Option<String>,
    /// Families in which this individual is listed as a child
    #[serde(default)]
    pub child_families: BTreeSet<String>,
    /// Families in which this individual is husband or wife
    #[serde(default)]
    pub spouse_families: BTreeSet<String>,
}

impl Individual {
    /// Create a new Individual with minimal required information
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, sex: Sex) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sex,
            birth: None,
            death: None,
            child_families: BTreeSet::new(),
            spouse_families: BTreeSet::new(),
        }
    }

    /// Set the birth date text
    #[must_use]
    pub fn with_birth(mut self, date: impl Into<String>) -> Self {
        self.birth = Some(date.into());
        self
    }

    /// Set the death date text
    #[must_use]
    pub fn with_death(mut self, date: impl Into<String>) -> Self {
        self.death = Some(date.into());
        self
    }

    /// Record a family in which this individual is a child
    #[must_use]
    pub fn with_child_family(mut self, family_id: impl Into<String>) -> Self {
        self.child_families.insert(family_id.into());
        self
    }

    /// Record a family in which this individual is a spouse
    #[must_use]
    pub fn with_spouse_family(mut self, family_id: impl Into<String>) -> Self {
        self.spouse_families.insert(family_id.into());
        self
    }

    /// Whether the individual is presumed alive (no death recorded)
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    /// Parsed birth date
    pub fn birth_date(&self) -> Result<Option<NaiveDate>> {
        self.parse_field(self.birth.as_deref(), "birth")
    }

    /// Parsed death date
    pub fn death_date(&self) -> Result<Option<NaiveDate>> {
        self.parse_field(self.death.as_deref(), "death")
    }

    /// First given name (the first whitespace-separated token of the name)
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Surname between the slashes of the name, if present
    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        let mut parts = self.name.split('/');
        parts.next()?;
        let surname = parts.next()?.trim();
        (!surname.is_empty()).then_some(surname)
    }

    fn parse_field(&self, value: Option<&str>, field: &'static str) -> Result<Option<NaiveDate>> {
        value
            .map(|text| parse_date(text).map_err(|e| e.for_field(&self.id, field)))
            .transpose()
    }
}
