//! The rule contract.
//!
//! A rule is a self-contained validator: it declares its identity, whether it applies
//! to a dataset, and produces findings. Rules are stateless across calls; one instance
//! serves every validation run of a registry.

use geocheck_core::{DataSet, Finding, RuleError, RuleMetadata, ValidationConfig};

/// Outcome of one rule execution.
pub type RuleResult = std::result::Result<Vec<Finding>, RuleError>;

/// A validation rule.
///
/// # Example
///
/// ```rust
/// use geocheck_core::{Category, DataSet, Finding, RuleMetadata, Severity, ValidationConfig};
/// use geocheck_validator::{Rule, RuleResult};
///
/// struct NoTestRows {
///     metadata: RuleMetadata,
/// }
///
/// impl Rule for NoTestRows {
///     fn metadata(&self) -> &RuleMetadata {
///         &self.metadata
///     }
///
///     fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
///         let Some(column) = self.get_column(dataset, config, "name") else {
///             return Ok(Vec::new());
///         };
///         Ok(dataset
///             .column_values(column)
///             .filter(|(_, v)| v.to_text() == "TEST")
///             .map(|(idx, _)| Finding::new(&self.metadata, idx, column, "Test row"))
///             .collect())
///     }
/// }
///
/// let rule = NoTestRows {
///     metadata: RuleMetadata::new("R-CUSTOM-01", Category::Custom, Severity::Warning)
///         .with_required_columns(&["name"]),
/// };
/// assert!(!rule.is_applicable(&DataSet::empty(), &ValidationConfig::new()));
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule's metadata. Pure and stable across calls.
    fn metadata(&self) -> &RuleMetadata;

    /// Checks whether the rule should run on this dataset.
    ///
    /// Default: every required logical column must resolve to a dataset column
    /// (see [`resolve_column`]). Rules without required columns always apply.
    fn is_applicable(&self, dataset: &DataSet, config: &ValidationConfig) -> bool {
        self.metadata()
            .required_columns
            .iter()
            .all(|logical| resolve_column(dataset, config, logical).is_some())
    }

    /// Validates the dataset.
    ///
    /// Bad data produces findings, never an `Err`. An `Err` means the rule itself
    /// could not run.
    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult;

    /// Resolves a logical column name to an actual dataset column.
    ///
    /// `None` means "skip silently", not an error.
    fn get_column<'d>(
        &self,
        dataset: &'d DataSet,
        config: &ValidationConfig,
        logical_name: &str,
    ) -> Option<&'d str> {
        resolve_column(dataset, config, logical_name)
    }
}

/// Resolves a logical column through the config mapping (defaulting to the logical
/// name itself), matching dataset headers exactly first and case-insensitively second.
pub fn resolve_column<'d>(
    dataset: &'d DataSet,
    config: &ValidationConfig,
    logical_name: &str,
) -> Option<&'d str> {
    dataset.find_column(config.resolve_column(logical_name))
}
