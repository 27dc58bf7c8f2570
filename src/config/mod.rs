//! Configuration for the `Validator`.

use crate::error::{Result, ValidationError};
use chrono::{Local, NaiveDate};
use std::fmt;

/// Configuration for a validation run
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Processing date; events after it count as dated in the future
    pub as_of: NaiveDate,
    /// Minimum age of each spouse at the marriage date
    pub min_marriage_age: u32,
    /// Lifespans of this many years or more are rejected
    pub max_lifespan_years: u32,
    /// A family must have fewer children than this
    pub max_children: usize,
    /// Maximum number of children sharing one birth event
    pub max_multiple_births: usize,
    /// Minimum gap in days between births that are not a multiple birth
    pub sibling_spacing_days: i64,
    /// Days after the father's death (or divorce) within which a birth is accepted
    pub posthumous_birth_days: i64,
    /// Mother may be at most this many years older than a child
    pub max_mother_age_gap: u32,
    /// Father may be at most this many years older than a child
    pub max_father_age_gap: u32,
    /// Age above which an unmarried living individual is listed as single
    pub single_over_age: u32,
    /// Depth bound for ancestor traversal
    pub max_ancestor_depth: usize,
    /// Dispatch rules to a thread pool
    pub parallel: bool,
    /// Number of worker threads used when `parallel` is set
    pub worker_threads: usize,
    /// Show a progress bar while rules are evaluated
    pub show_progress: bool,
}

impl ValidatorConfig {
    /// Create a configuration with default thresholds and a fixed processing date
    #[must_use]
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            ..Self::default()
        }
    }

    /// Set the processing date
    #[must_use]
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Set the age above which unmarried living individuals are listed as single
    #[must_use]
    pub fn with_single_over_age(mut self, single_over_age: u32) -> Self {
        self.single_over_age = single_over_age;
        self
    }

    /// Enable or disable parallel rule evaluation
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the number of worker threads
    #[must_use]
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Enable or disable the progress bar
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check that thresholds are usable
    pub fn validate(&self) -> Result<()> {
        if self.parallel && self.worker_threads == 0 {
            return Err(ValidationError::Config(
                "worker_threads must be at least 1 when parallel evaluation is enabled".to_string(),
            ));
        }
        if self.max_ancestor_depth == 0 {
            return Err(ValidationError::Config(
                "max_ancestor_depth must be at least 1".to_string(),
            ));
        }
        if self.sibling_spacing_days <= 1 {
            return Err(ValidationError::Config(format!(
                "sibling_spacing_days must exceed the 1-day multiple birth window, got {}",
                self.sibling_spacing_days
            )));
        }
        if self.max_children == 0 || self.max_multiple_births == 0 {
            return Err(ValidationError::Config(
                "child count limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            as_of: Local::now().date_naive(),
            min_marriage_age: 14,
            max_lifespan_years: 150,
            max_children: 15,
            max_multiple_births: 5,
            sibling_spacing_days: 280,
            posthumous_birth_days: 270,
            max_mother_age_gap: 60,
            max_father_age_gap: 80,
            single_over_age: 30,
            max_ancestor_depth: 64,
            parallel: false,
            worker_threads: num_cpus::get(),
            show_progress: false,
        }
    }
}

impl fmt::Display for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validator Configuration:")?;
        writeln!(f, "  As Of: {}", self.as_of)?;
        writeln!(f, "  Minimum Marriage Age: {}", self.min_marriage_age)?;
        writeln!(f, "  Maximum Lifespan: {} years", self.max_lifespan_years)?;
        writeln!(f, "  Children Per Family: < {}", self.max_children)?;
        writeln!(f, "  Multiple Births: <= {}", self.max_multiple_births)?;
        writeln!(f, "  Sibling Spacing: {} days", self.sibling_spacing_days)?;
        writeln!(f, "  Posthumous Birth Window: {} days", self.posthumous_birth_days)?;
        writeln!(
            f,
            "  Parent Age Gap: mother <= {}, father <= {}",
            self.max_mother_age_gap, self.max_father_age_gap
        )?;
        writeln!(f, "  Ancestor Depth: {}", self.max_ancestor_depth)?;
        if self.parallel {
            writeln!(f, "  Parallel: {} threads", self.worker_threads)?;
        } else {
            writeln!(f, "  Parallel: off")?;
        }
        Ok(())
    }
}
