//! Error handling for the validator.
//!
//! Data errors are raised while reading records (a date that does not parse,
//! an id that does not resolve, an ancestry loop). Rule findings are never
//! errors; they are reported through [`crate::report::RuleResult`].

/// Specialized error type for record access and validator setup
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A date string could not be parsed by any supported format
    #[error("Unparseable date: '{0}'")]
    InvalidDate(String),

    /// A date field on a record could not be parsed
    #[error("Malformed date in {record_id}.{field}: '{value}'")]
    MalformedDate {
        /// Id of the record carrying the date
        record_id: String,
        /// Field name (`birth`, `death`, `marriage`, `divorce`)
        field: &'static str,
        /// Raw value as received from the parser
        value: String,
    },

    /// A record references an id that does not exist in the record set
    #[error("Dangling reference in {record_id}.{field}: '{target}' does not exist")]
    DanglingReference {
        /// Id of the referencing record
        record_id: String,
        /// Field holding the reference
        field: &'static str,
        /// The id that could not be resolved
        target: String,
    },

    /// An individual appears among their own ancestors
    #[error("Cyclic ancestry: {individual_id} is recorded as an ancestor of itself (via {via})")]
    CyclicAncestry {
        /// The individual whose chain loops
        individual_id: String,
        /// The ancestor whose parent family closed the loop
        via: String,
    },

    /// Invalid validator configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Record set input could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidationError {
    /// Attach record context to an [`ValidationError::InvalidDate`]
    #[must_use]
    pub fn for_field(self, record_id: &str, field: &'static str) -> Self {
        match self {
            Self::InvalidDate(value) => Self::MalformedDate {
                record_id: record_id.to_string(),
                field,
                value,
            },
            other => other,
        }
    }

    /// Create a dangling reference error
    #[must_use]
    pub fn dangling(record_id: &str, field: &'static str, target: &str) -> Self {
        Self::DanglingReference {
            record_id: record_id.to_string(),
            field,
            target: target.to_string(),
        }
    }
}

/// Result type for validator operations
pub type Result<T> = std::result::Result<T, ValidationError>;
