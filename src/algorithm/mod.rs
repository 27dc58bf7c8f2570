//! Algorithm implementations for record validation
//!
//! This module contains the relationship index, the rule catalog, the
//! validator that runs it, and read-only record listings.

pub mod listings;
pub mod relationships;
pub mod rules;
pub mod validator;
