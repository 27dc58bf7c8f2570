//! Validation results and the aggregated report
//!
//! Every rule emits [`RuleResult`]s; the validator collects them into a
//! [`Report`] ordered by rule id and subject ids.

use crate::algorithm::rules::{RuleCategory, RuleId};
use crate::error::{Result, ValidationError};
use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// Ids of the records a result concerns: one record, or a pair
pub type SubjectIds = SmallVec<[String; 2]>;

/// Outcome of applying one rule to one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The subject satisfies the rule
    Passed,
    /// The subject violates the rule
    Failed,
    /// The rule does not apply (a required optional field is absent)
    NotApplicable,
    /// The rule could not be evaluated because of a data error
    Inconclusive,
}

impl Outcome {
    /// Short marker used in text reports
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::NotApplicable => "N/A",
            Self::Inconclusive => "????",
        }
    }
}

/// Structured outcome of one rule applied to one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    /// Rule that produced the result
    pub rule_id: RuleId,
    /// Records the result concerns
    pub subject_ids: SubjectIds,
    /// Outcome of the check
    pub outcome: Outcome,
    /// Human-readable explanation
    pub message: String,
}

impl RuleResult {
    /// Create a result for a single subject
    #[must_use]
    pub fn new(rule_id: RuleId, subject: &str, outcome: Outcome, message: impl Into<String>) -> Self {
        let mut subject_ids = SubjectIds::new();
        subject_ids.push(subject.to_string());
        Self {
            rule_id,
            subject_ids,
            outcome,
            message: message.into(),
        }
    }

    /// Create a passing result
    #[must_use]
    pub fn pass(rule_id: RuleId, subject: &str, message: impl Into<String>) -> Self {
        Self::new(rule_id, subject, Outcome::Passed, message)
    }

    /// Create a failing result
    #[must_use]
    pub fn fail(rule_id: RuleId, subject: &str, message: impl Into<String>) -> Self {
        Self::new(rule_id, subject, Outcome::Failed, message)
    }

    /// Create a not-applicable result
    #[must_use]
    pub fn not_applicable(rule_id: RuleId, subject: &str, message: impl Into<String>) -> Self {
        Self::new(rule_id, subject, Outcome::NotApplicable, message)
    }

    /// Create an inconclusive result from a data error
    #[must_use]
    pub fn inconclusive(rule_id: RuleId, subject: &str, error: &ValidationError) -> Self {
        Self::new(rule_id, subject, Outcome::Inconclusive, error.to_string())
    }

    /// Passed when `ok`, failed otherwise
    #[must_use]
    pub fn check(
        rule_id: RuleId,
        subject: &str,
        ok: bool,
        pass_message: impl Into<String>,
        fail_message: impl Into<String>,
    ) -> Self {
        if ok {
            Self::pass(rule_id, subject, pass_message)
        } else {
            Self::fail(rule_id, subject, fail_message)
        }
    }

    /// Whether the subject satisfied the rule
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    /// Whether the subject violated the rule
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    /// Whether the result concerns the given record id
    #[must_use]
    pub fn concerns(&self, id: &str) -> bool {
        self.subject_ids.iter().any(|subject| subject == id)
    }

    fn sort_key(&self) -> (RuleId, &[String], Outcome, &str) {
        (
            self.rule_id,
            self.subject_ids.as_slice(),
            self.outcome,
            self.message.as_str(),
        )
    }
}

impl Serialize for RuleResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RuleResult", 5)?;
        state.serialize_field("rule_id", self.rule_id.code())?;
        state.serialize_field("subject_ids", &self.subject_ids)?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("outcome", &self.outcome)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

impl fmt::Display for RuleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} {:<30} {:<12} {}",
            self.outcome.marker(),
            self.rule_id.code(),
            self.subject_ids.join(","),
            self.message
        )
    }
}

/// Outcome counts for one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    /// Rule the counts belong to
    #[serde(serialize_with = "serialize_rule_code")]
    pub rule_id: RuleId,
    /// Number of passing subjects
    pub passed: usize,
    /// Number of failing subjects
    pub failed: usize,
    /// Number of subjects the rule did not apply to
    pub not_applicable: usize,
    /// Number of subjects that could not be evaluated
    pub inconclusive: usize,
}

fn serialize_rule_code<S: Serializer>(
    rule_id: &RuleId,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(rule_id.code())
}

/// Ordered collection of every result of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    as_of: NaiveDate,
    results: Vec<RuleResult>,
}

impl Report {
    /// Create a report, ordering results by rule id then subject ids
    #[must_use]
    pub fn new(as_of: NaiveDate, mut results: Vec<RuleResult>) -> Self {
        results.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self { as_of, results }
    }

    /// Processing date the report was produced for
    #[must_use]
    pub const fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// All results in report order
    #[must_use]
    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    /// Total number of results
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Results with the given outcome
    pub fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(move |result| result.outcome == outcome)
    }

    /// Failed results
    #[must_use]
    pub fn failures(&self) -> Vec<&RuleResult> {
        self.with_outcome(Outcome::Failed).collect()
    }

    /// Results that could not be evaluated
    #[must_use]
    pub fn inconclusive(&self) -> Vec<&RuleResult> {
        self.with_outcome(Outcome::Inconclusive).collect()
    }

    /// Results for subjects the rule did not apply to
    #[must_use]
    pub fn not_applicable(&self) -> Vec<&RuleResult> {
        self.with_outcome(Outcome::NotApplicable).collect()
    }

    /// Whether no rule failed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.results.iter().any(RuleResult::is_failure)
    }

    /// Results grouped by rule id
    #[must_use]
    pub fn by_rule(&self) -> BTreeMap<RuleId, Vec<&RuleResult>> {
        let mut grouped: BTreeMap<RuleId, Vec<&RuleResult>> = BTreeMap::new();
        for result in &self.results {
            grouped.entry(result.rule_id).or_default().push(result);
        }
        grouped
    }

    /// Results of one rule
    #[must_use]
    pub fn for_rule(&self, rule_id: RuleId) -> Vec<&RuleResult> {
        self.results
            .iter()
            .filter(|result| result.rule_id == rule_id)
            .collect()
    }

    /// Result of one rule for one subject
    #[must_use]
    pub fn find(&self, rule_id: RuleId, subject: &str) -> Option<&RuleResult> {
        self.results
            .iter()
            .find(|result| result.rule_id == rule_id && result.concerns(subject))
    }

    /// Outcome counts per rule, in rule order
    #[must_use]
    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.by_rule()
            .into_iter()
            .map(|(rule_id, results)| {
                let count = |outcome: Outcome| results.iter().filter(|r| r.outcome == outcome).count();
                RuleSummary {
                    rule_id,
                    passed: count(Outcome::Passed),
                    failed: count(Outcome::Failed),
                    not_applicable: count(Outcome::NotApplicable),
                    inconclusive: count(Outcome::Inconclusive),
                }
            })
            .collect()
    }

    /// Failure counts per rule category
    #[must_use]
    pub fn failures_by_category(&self) -> BTreeMap<RuleCategory, usize> {
        let mut counts = BTreeMap::new();
        for result in self.results.iter().filter(|r| r.is_failure()) {
            *counts.entry(result.rule_id.category()).or_insert(0) += 1;
        }
        counts
    }

    /// Encode the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Report (as of {}):", self.as_of)?;
        writeln!(
            f,
            "  {} results, {} failed, {} not applicable, {} inconclusive",
            self.total(),
            self.with_outcome(Outcome::Failed).count(),
            self.with_outcome(Outcome::NotApplicable).count(),
            self.with_outcome(Outcome::Inconclusive).count()
        )?;
        writeln!(f)?;
        writeln!(f, "{:<4} {:<30} {:<12} MESSAGE", "", "RULE", "SUBJECT")?;
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        Ok(())
    }
}
