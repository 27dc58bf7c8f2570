//! Family unit representation
//!
//! A Family links up to two spouses with the children born to them, along with
//! the marriage and divorce events of the union.

use crate::error::Result;
use crate::models::types::FamilyRole;
use crate::utils::date_utils::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Representation of a family unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    /// Unique family identifier (e.g. `F1`)
    pub id: String,
    /// Husband's individual id
    #[serde(default)]
    pub husband_id: Option<String>,
    /// Wife's individual id
    #[serde(default)]
    pub wife_id: Option<String>,
    /// Children's individual ids, in birth order when known
    #[serde(default)]
    pub children: Vec<String>,
    /// Marriage date text
    #[serde(default)]
    pub marriage: Option<String>,
    /// Divorce date text
    #[serde(default)]
    pub divorce: Option<String>,
}

impl Family {
    /// Create a new family with no members
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            husband_id: None,
            wife_id: None,
            children: Vec::new(),
            marriage: None,
            divorce: None,
        }
    }

    /// Set the husband for this family
    #[must_use]
    pub fn with_husband(mut self, id: impl Into<String>) -> Self {
        self.husband_id = Some(id.into());
        self
    }

    /// Set the wife for this family
    #[must_use]
    pub fn with_wife(mut self, id: impl Into<String>) -> Self {
        self.wife_id = Some(id.into());
        self
    }

    /// Append a child to this family
    #[must_use]
    pub fn with_child(mut self, id: impl Into<String>) -> Self {
        self.children.push(id.into());
        self
    }

    /// Set the marriage date text
    #[must_use]
    pub fn with_marriage(mut self, date: impl Into<String>) -> Self {
        self.marriage = Some(date.into());
        self
    }

    /// Set the divorce date text
    #[must_use]
    pub fn with_divorce(mut self, date: impl Into<String>) -> Self {
        self.divorce = Some(date.into());
        self
    }

    /// Parsed marriage date
    pub fn marriage_date(&self) -> Result<Option<NaiveDate>> {
        self.parse_field(self.marriage.as_deref(), "marriage")
    }

    /// Parsed divorce date
    pub fn divorce_date(&self) -> Result<Option<NaiveDate>> {
        self.parse_field(self.divorce.as_deref(), "divorce")
    }

    /// Spouse ids present on this family, husband first
    pub fn spouse_ids(&self) -> impl Iterator<Item = (FamilyRole, &str)> {
        self.husband_id
            .as_deref()
            .map(|id| (FamilyRole::Husband, id))
            .into_iter()
            .chain(self.wife_id.as_deref().map(|id| (FamilyRole::Wife, id)))
    }

    /// Every referenced individual id with the role it is referenced under
    pub fn member_ids(&self) -> impl Iterator<Item = (FamilyRole, &str)> {
        self.spouse_ids().chain(
            self.children
                .iter()
                .map(|id| (FamilyRole::Child, id.as_str())),
        )
    }

    /// Whether `id` is the husband or wife of this family
    #[must_use]
    pub fn is_spouse(&self, id: &str) -> bool {
        self.husband_id.as_deref() == Some(id) || self.wife_id.as_deref() == Some(id)
    }

    /// Whether `id` is listed among the children of this family
    #[must_use]
    pub fn has_child(&self, id: &str) -> bool {
        self.children.iter().any(|child| child == id)
    }

    /// The other spouse of `id` in this family, if any
    #[must_use]
    pub fn partner_of(&self, id: &str) -> Option<&str> {
        if self.husband_id.as_deref() == Some(id) {
            self.wife_id.as_deref()
        } else if self.wife_id.as_deref() == Some(id) {
            self.husband_id.as_deref()
        } else {
            None
        }
    }

    /// Number of children in the family
    #[must_use]
    pub fn family_size(&self) -> usize {
        self.children.len()
    }

    fn parse_field(&self, value: Option<&str>, field: &'static str) -> Result<Option<NaiveDate>> {
        value
            .map(|text| parse_date(text).map_err(|e| e.for_field(&self.id, field)))
            .transpose()
    }
}
