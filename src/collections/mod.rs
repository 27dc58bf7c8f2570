//! Record collections
//!
//! The validator reads its input through a single [`RecordSet`], which owns the
//! parsed individuals and families and provides id lookups into both.

pub mod record_set;

pub use record_set::RecordSet;
