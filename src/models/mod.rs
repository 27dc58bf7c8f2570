//! Record models for the genealogy validator
//!
//! This module contains the two record types produced by the upstream parser.
//! Both are read-only once handed to the validator.

pub mod family;
pub mod individual;
pub mod types;

// Re-export commonly used types
pub use family::Family;
pub use individual::Individual;
pub use types::{FamilyRole, Sex};
