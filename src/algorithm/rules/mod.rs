//! Rule catalog
//!
//! Each rule is an independent check over a read-only record set. Rules never
//! see each other's results, so they can be evaluated in any order or in
//! parallel. A data error met while checking one subject becomes an
//! inconclusive result for that subject only.

pub mod cardinality;
pub mod integrity;
pub mod lineage;
pub mod temporal;
pub mod uniqueness;

use crate::algorithm::relationships::RelationshipIndex;
use crate::collections::RecordSet;
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::models::{Family, FamilyRole, Individual};
use crate::report::RuleResult;
use chrono::NaiveDate;
use std::fmt;

/// Stable identifier of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    // Temporal
    BirthBeforeDeath,
    BirthBeforeParentsDeath,
    BirthBeforeMarriage,
    BirthAfterParentsMarriage,
    MarriageBeforeDeath,
    DivorceBeforeDeath,
    MarriageAfter14,
    LessThan150YearsOld,
    DatesBeforeCurrentDate,
    ParentsNotTooOld,
    // Integrity
    RecordsResolve,
    CorrespondingRecords,
    CorrectGenderForRole,
    UniqueIds,
    // Lineage
    NoMarriageToDescendant,
    NoSiblingMarriage,
    NoFirstCousinMarriage,
    NoAuntUncleMarriage,
    NoBigamy,
    // Cardinality
    FewerThan15Siblings,
    MultipleBirthsAtMost5,
    SiblingSpacing,
    // Uniqueness
    UniqueNameAndBirthDate,
    UniqueFamiliesBySpouses,
    UniqueFirstNamesInFamily,
    MaleLastNames,
}

/// Group a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCategory {
    /// Ordering of life events
    Temporal,
    /// Cross-references between records
    Integrity,
    /// Marriages between relatives
    Lineage,
    /// Plausible counts of children
    Cardinality,
    /// Duplicate records
    Uniqueness,
}

impl RuleId {
    /// Every rule id in report order
    pub const ALL: [Self; 26] = [
        Self::BirthBeforeDeath,
        Self::BirthBeforeParentsDeath,
        Self::BirthBeforeMarriage,
        Self::BirthAfterParentsMarriage,
        Self::MarriageBeforeDeath,
        Self::DivorceBeforeDeath,
        Self::MarriageAfter14,
        Self::LessThan150YearsOld,
        Self::DatesBeforeCurrentDate,
        Self::ParentsNotTooOld,
        Self::RecordsResolve,
        Self::CorrespondingRecords,
        Self::CorrectGenderForRole,
        Self::UniqueIds,
        Self::NoMarriageToDescendant,
        Self::NoSiblingMarriage,
        Self::NoFirstCousinMarriage,
        Self::NoAuntUncleMarriage,
        Self::NoBigamy,
        Self::FewerThan15Siblings,
        Self::MultipleBirthsAtMost5,
        Self::SiblingSpacing,
        Self::UniqueNameAndBirthDate,
        Self::UniqueFamiliesBySpouses,
        Self::UniqueFirstNamesInFamily,
        Self::MaleLastNames,
    ];

    /// Stable code used in reports
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BirthBeforeDeath => "birth-before-death",
            Self::BirthBeforeParentsDeath => "birth-before-parents-death",
            Self::BirthBeforeMarriage => "birth-before-marriage",
            Self::BirthAfterParentsMarriage => "birth-after-parents-marriage",
            Self::MarriageBeforeDeath => "marriage-before-death",
            Self::DivorceBeforeDeath => "divorce-before-death",
            Self::MarriageAfter14 => "marriage-after-14",
            Self::LessThan150YearsOld => "less-than-150-years-old",
            Self::DatesBeforeCurrentDate => "dates-before-current-date",
            Self::ParentsNotTooOld => "parents-not-too-old",
            Self::RecordsResolve => "records-resolve",
            Self::CorrespondingRecords => "corresponding-records",
            Self::CorrectGenderForRole => "correct-gender-for-role",
            Self::UniqueIds => "unique-ids",
            Self::NoMarriageToDescendant => "no-marriage-to-descendant",
            Self::NoSiblingMarriage => "no-sibling-marriage",
            Self::NoFirstCousinMarriage => "no-first-cousin-marriage",
            Self::NoAuntUncleMarriage => "no-aunt-uncle-marriage",
            Self::NoBigamy => "no-bigamy",
            Self::FewerThan15Siblings => "fewer-than-15-siblings",
            Self::MultipleBirthsAtMost5 => "multiple-births-at-most-5",
            Self::SiblingSpacing => "sibling-spacing",
            Self::UniqueNameAndBirthDate => "unique-name-and-birth-date",
            Self::UniqueFamiliesBySpouses => "unique-families-by-spouses",
            Self::UniqueFirstNamesInFamily => "unique-first-names-in-family",
            Self::MaleLastNames => "male-last-names",
        }
    }

    /// One-line description of what the rule checks
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::BirthBeforeDeath => "Birth occurs on or before death",
            Self::BirthBeforeParentsDeath => {
                "Children are born before the mother's death and within 9 months of the father's death"
            }
            Self::BirthBeforeMarriage => "Spouses are born before their marriage",
            Self::BirthAfterParentsMarriage => {
                "Children are born after the parents' marriage and within 9 months of their divorce"
            }
            Self::MarriageBeforeDeath => "Marriage occurs on or before the death of either spouse",
            Self::DivorceBeforeDeath => {
                "Divorce occurs after marriage and on or before the death of either spouse"
            }
            Self::MarriageAfter14 => "Both spouses are at least 14 at the marriage date",
            Self::LessThan150YearsOld => "Lifespans are shorter than 150 years",
            Self::DatesBeforeCurrentDate => "No event is dated after the processing date",
            Self::ParentsNotTooOld => {
                "Mothers are at most 60 and fathers at most 80 years older than their children"
            }
            Self::RecordsResolve => {
                "Family members exist and every individual belongs to a family"
            }
            Self::CorrespondingRecords => {
                "Individual and family records reference each other consistently"
            }
            Self::CorrectGenderForRole => "Husbands are male and wives are female",
            Self::UniqueIds => "Record ids are unique",
            Self::NoMarriageToDescendant => "No one marries their ancestor or descendant",
            Self::NoSiblingMarriage => "Siblings do not marry",
            Self::NoFirstCousinMarriage => "First cousins do not marry",
            Self::NoAuntUncleMarriage => "Aunts and uncles do not marry nieces and nephews",
            Self::NoBigamy => "No one is married to two living spouses at once",
            Self::FewerThan15Siblings => "Families have fewer than 15 children",
            Self::MultipleBirthsAtMost5 => "No more than 5 siblings share a birth",
            Self::SiblingSpacing => {
                "Sibling births are a multiple birth or at least 280 days apart"
            }
            Self::UniqueNameAndBirthDate => "No two individuals share name and birth date",
            Self::UniqueFamiliesBySpouses => "No two families share spouses and marriage date",
            Self::UniqueFirstNamesInFamily => {
                "No two children of a family share first name and birth date"
            }
            Self::MaleLastNames => "Male members of a family share the same last name",
        }
    }

    /// Category of the rule
    #[must_use]
    pub const fn category(self) -> RuleCategory {
        match self {
            Self::BirthBeforeDeath
            | Self::BirthBeforeParentsDeath
            | Self::BirthBeforeMarriage
            | Self::BirthAfterParentsMarriage
            | Self::MarriageBeforeDeath
            | Self::DivorceBeforeDeath
            | Self::MarriageAfter14
            | Self::LessThan150YearsOld
            | Self::DatesBeforeCurrentDate
            | Self::ParentsNotTooOld => RuleCategory::Temporal,
            Self::RecordsResolve
            | Self::CorrespondingRecords
            | Self::CorrectGenderForRole
            | Self::UniqueIds => RuleCategory::Integrity,
            Self::NoMarriageToDescendant
            | Self::NoSiblingMarriage
            | Self::NoFirstCousinMarriage
            | Self::NoAuntUncleMarriage
            | Self::NoBigamy => RuleCategory::Lineage,
            Self::FewerThan15Siblings | Self::MultipleBirthsAtMost5 | Self::SiblingSpacing => {
                RuleCategory::Cardinality
            }
            Self::UniqueNameAndBirthDate
            | Self::UniqueFamiliesBySpouses
            | Self::UniqueFirstNamesInFamily
            | Self::MaleLastNames => RuleCategory::Uniqueness,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Read-only view handed to every rule
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The record set under validation
    pub records: &'a RecordSet,
    /// Relationships derived from the record set
    pub index: &'a RelationshipIndex<'a>,
    /// Thresholds and the processing date
    pub config: &'a ValidatorConfig,
}

impl<'a> RuleContext<'a> {
    /// Create a rule context
    #[must_use]
    pub fn new(
        records: &'a RecordSet,
        index: &'a RelationshipIndex<'a>,
        config: &'a ValidatorConfig,
    ) -> Self {
        Self {
            records,
            index,
            config,
        }
    }

    /// Processing date
    #[must_use]
    pub fn as_of(&self) -> NaiveDate {
        self.config.as_of
    }

    /// Resolve the husband of a family
    pub fn husband(&self, family: &Family) -> Result<Option<&'a Individual>> {
        family
            .husband_id
            .as_deref()
            .map(|id| self.records.resolve_individual(&family.id, "husband", id))
            .transpose()
    }

    /// Resolve the wife of a family
    pub fn wife(&self, family: &Family) -> Result<Option<&'a Individual>> {
        family
            .wife_id
            .as_deref()
            .map(|id| self.records.resolve_individual(&family.id, "wife", id))
            .transpose()
    }

    /// Resolve both spouses of a family, husband first
    pub fn spouses(&self, family: &Family) -> Result<Vec<(FamilyRole, &'a Individual)>> {
        family
            .spouse_ids()
            .map(|(role, id)| {
                self.records
                    .resolve_individual(&family.id, role.field(), id)
                    .map(|person| (role, person))
            })
            .collect()
    }

    /// Resolve every child of a family, in listed order
    pub fn children(&self, family: &Family) -> Result<Vec<&'a Individual>> {
        family
            .children
            .iter()
            .map(|id| self.records.resolve_individual(&family.id, "children", id))
            .collect()
    }

    /// Apply a per-family check, turning data errors into inconclusive results
    pub fn each_family<F>(&self, rule_id: RuleId, check: F) -> Vec<RuleResult>
    where
        F: Fn(&'a Family) -> Result<RuleResult>,
    {
        self.records
            .families()
            .iter()
            .map(|family| {
                check(family).unwrap_or_else(|err| RuleResult::inconclusive(rule_id, &family.id, &err))
            })
            .collect()
    }

    /// Apply a per-individual check, turning data errors into inconclusive results
    pub fn each_individual<F>(&self, rule_id: RuleId, check: F) -> Vec<RuleResult>
    where
        F: Fn(&'a Individual) -> Result<RuleResult>,
    {
        self.records
            .individuals()
            .iter()
            .map(|individual| {
                check(individual)
                    .unwrap_or_else(|err| RuleResult::inconclusive(rule_id, &individual.id, &err))
            })
            .collect()
    }
}

/// Death date of an optional individual
pub(crate) fn death_of(person: Option<&Individual>) -> Result<Option<NaiveDate>> {
    Ok(person.map(Individual::death_date).transpose()?.flatten())
}

/// Birth date of an optional individual
pub(crate) fn birth_of(person: Option<&Individual>) -> Result<Option<NaiveDate>> {
    Ok(person.map(Individual::birth_date).transpose()?.flatten())
}

/// A validation rule
pub trait Rule: Send + Sync {
    /// Stable id of the rule
    fn id(&self) -> RuleId;

    /// Evaluate the rule over the whole record set
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult>;

    /// One-line description of the rule
    fn description(&self) -> &'static str {
        self.id().description()
    }
}

/// The full rule catalog, in report order
#[must_use]
pub fn catalog() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(temporal::BirthBeforeDeath),
        Box::new(temporal::BirthBeforeParentsDeath),
        Box::new(temporal::BirthBeforeMarriage),
        Box::new(temporal::BirthAfterParentsMarriage),
        Box::new(temporal::MarriageBeforeDeath),
        Box::new(temporal::DivorceBeforeDeath),
        Box::new(temporal::MarriageAfter14),
        Box::new(temporal::LessThan150YearsOld),
        Box::new(temporal::DatesBeforeCurrentDate),
        Box::new(temporal::ParentsNotTooOld),
        Box::new(integrity::RecordsResolve),
        Box::new(integrity::CorrespondingRecords),
        Box::new(integrity::CorrectGenderForRole),
        Box::new(integrity::UniqueIds),
        Box::new(lineage::NoMarriageToDescendant),
        Box::new(lineage::NoSiblingMarriage),
        Box::new(lineage::NoFirstCousinMarriage),
        Box::new(lineage::NoAuntUncleMarriage),
        Box::new(lineage::NoBigamy),
        Box::new(cardinality::FewerThan15Siblings),
        Box::new(cardinality::MultipleBirthsAtMost5),
        Box::new(cardinality::SiblingSpacing),
        Box::new(uniqueness::UniqueNameAndBirthDate),
        Box::new(uniqueness::UniqueFamiliesBySpouses),
        Box::new(uniqueness::UniqueFirstNamesInFamily),
        Box::new(uniqueness::MaleLastNames),
    ]
}

/// Evaluate a single rule against a record set as of 2020-01-01
#[cfg(test)]
pub(crate) fn evaluate_rule(rule: &dyn Rule, records: &RecordSet) -> Vec<RuleResult> {
    let config = ValidatorConfig::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    let index = RelationshipIndex::new(records);
    let ctx = RuleContext::new(records, &index, &config);
    rule.evaluate(&ctx)
}
