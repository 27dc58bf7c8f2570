//! Record set collection
//!
//! The record set owns every individual and family handed over by the parser
//! and indexes both by id for constant-time lookup.

use crate::error::{Result, ValidationError};
use crate::models::{Family, Individual};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Individuals and families, sorted by id, with id lookup indexes
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    individuals: Vec<Individual>,
    families: Vec<Family>,
    individual_index: FxHashMap<String, usize>,
    family_index: FxHashMap<String, usize>,
}

/// Serialized form of a record set as produced by the upstream parser
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordDocument {
    #[serde(default)]
    individuals: Vec<Individual>,
    #[serde(default)]
    families: Vec<Family>,
}

impl RecordSet {
    /// Create a record set from parsed records
    ///
    /// Both collections are sorted by id. Duplicate ids are kept so that the
    /// unique-ids rule can report them; lookups resolve to the first record
    /// carrying the id.
    #[must_use]
    pub fn new(mut individuals: Vec<Individual>, mut families: Vec<Family>) -> Self {
        individuals.sort_by(|a, b| a.id.cmp(&b.id));
        families.sort_by(|a, b| a.id.cmp(&b.id));

        let mut individual_index = FxHashMap::default();
        for (position, individual) in individuals.iter().enumerate() {
            individual_index
                .entry(individual.id.clone())
                .or_insert(position);
        }

        let mut family_index = FxHashMap::default();
        for (position, family) in families.iter().enumerate() {
            family_index.entry(family.id.clone()).or_insert(position);
        }

        log::debug!(
            "Indexed {} individuals and {} families",
            individuals.len(),
            families.len()
        );

        Self {
            individuals,
            families,
            individual_index,
            family_index,
        }
    }

    /// Decode a record set from the parser's JSON output
    pub fn from_json(json: &str) -> Result<Self> {
        let document: RecordDocument = serde_json::from_str(json)?;
        Ok(Self::new(document.individuals, document.families))
    }

    /// Encode the record set back to JSON
    pub fn to_json(&self) -> Result<String> {
        let document = RecordDocument {
            individuals: self.individuals.clone(),
            families: self.families.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// All individuals, sorted by id
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// All families, sorted by id
    #[must_use]
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Get an individual by id
    #[must_use]
    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individual_index
            .get(id)
            .map(|&position| &self.individuals[position])
    }

    /// Get a family by id
    #[must_use]
    pub fn family(&self, id: &str) -> Option<&Family> {
        self.family_index
            .get(id)
            .map(|&position| &self.families[position])
    }

    /// Resolve an individual referenced from another record
    ///
    /// Fails with a dangling reference error naming the referencing record and
    /// field when the target does not exist.
    pub fn resolve_individual(
        &self,
        record_id: &str,
        field: &'static str,
        target: &str,
    ) -> Result<&Individual> {
        self.individual(target)
            .ok_or_else(|| ValidationError::dangling(record_id, field, target))
    }

    /// Number of individual records (duplicates included)
    #[must_use]
    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    /// Number of family records (duplicates included)
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}
