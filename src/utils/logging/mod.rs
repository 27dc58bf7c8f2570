//! Logging utilities for output and progress tracking
//!
//! This module provides consistent log lines for validation runs and an
//! optional progress bar over the rule catalog.

pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{RULE_PROGRESS_TEMPLATE, create_rule_progress_bar};
