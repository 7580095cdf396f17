//! Error types for the validation engine.
//!
//! Data-quality problems are never errors: they are reported as [`Finding`](crate::Finding)s.
//! The types in this module cover caller mistakes and faults inside a rule.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Category name not recognized
    #[error("Unknown rule category: {0}")]
    UnknownCategory(String),

    /// Coordinate system name not recognized
    #[error("Unknown coordinate system: {0} (expected auto, LV95 or WGS84)")]
    UnknownCoordinateSystem(String),

    /// Option value has the wrong shape
    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption {
        /// Option key
        option: String,
        /// Why the value was rejected
        message: String,
    },
}

/// Failure of a single rule execution.
///
/// Returned by `Rule::validate` when a rule cannot do its job for reasons unrelated to
/// the quality of the data. The engine records the rule as skipped and continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The rule hit an internal fault while running
    #[error("Rule '{rule_id}' failed: {message}")]
    Execution {
        /// Id of the failing rule
        rule_id: String,
        /// Failure details
        message: String,
    },

    /// The rule panicked; the panic was caught at the engine boundary
    #[error("Rule '{rule_id}' panicked: {message}")]
    Panicked {
        /// Id of the failing rule
        rule_id: String,
        /// Panic payload, when it was a string
        message: String,
    },
}

impl RuleError {
    /// Creates a new execution error.
    pub fn execution(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Creates a new panic error.
    pub fn panicked(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Panicked {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Returns the id of the rule that failed.
    pub fn rule_id(&self) -> &str {
        match self {
            Self::Execution { rule_id, .. } | Self::Panicked { rule_id, .. } => rule_id,
        }
    }
}
