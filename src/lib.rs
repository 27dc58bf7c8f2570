//! A Rust library for validating genealogical record sets against a catalog
//! of consistency rules, producing an ordered diagnostic report.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::ValidatorConfig;
pub use error::{Result, ValidationError};
pub use models::{Family, FamilyRole, Individual, Sex};
pub use collections::RecordSet;

// Validation
pub use algorithm::relationships::{AncestorChain, RelationshipIndex};
pub use algorithm::rules::{Rule, RuleCategory, RuleContext, RuleId, catalog};
pub use algorithm::validator::Validator;
pub use report::{Outcome, Report, RuleResult, RuleSummary};

// Date utilities
pub use utils::date_utils::{age, days_between, parse_date};
