//! Main validation engine.
//!
//! This module provides the [`ValidationEngine`] that checks every selected rule for
//! applicability, runs it, and collects the findings into a [`ValidationResult`].
//! A failing rule never aborts the run.

use crate::{Rule, RuleRegistry, ValidationResult, detect_columns};
use geocheck_core::{ColumnMapping, DataSet, Finding, RuleError, ValidationConfig};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// What happened when the engine offered a dataset to one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The rule ran and returned these findings
    Executed(Vec<Finding>),
    /// A required column did not resolve; the rule did not run
    NotApplicable,
    /// The rule returned an error or panicked
    Failed(RuleError),
}

/// Offers `dataset` to `rule`: checks applicability, then runs it with panics caught.
pub fn execute_rule(rule: &dyn Rule, dataset: &DataSet, config: &ValidationConfig) -> RuleOutcome {
    let rule_id = rule.metadata().id.as_str();

    if !rule.is_applicable(dataset, config) {
        return RuleOutcome::NotApplicable;
    }

    match panic::catch_unwind(AssertUnwindSafe(|| rule.validate(dataset, config))) {
        Ok(Ok(findings)) => RuleOutcome::Executed(findings),
        Ok(Err(e)) => RuleOutcome::Failed(e),
        Err(payload) => {
            RuleOutcome::Failed(RuleError::panicked(rule_id, panic_message(payload.as_ref())))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Validation engine over a rule registry.
///
/// # Example
///
/// ```rust
/// use geocheck_core::{DataSet, DataValue, ValidationConfig};
/// use geocheck_validator::{ValidationEngine, build_default_registry};
///
/// let engine = ValidationEngine::new(build_default_registry());
/// let dataset = DataSet::from_records(["EGID"], vec![
///     vec![DataValue::Int(123)],
///     vec![DataValue::Int(123)],
///     vec![DataValue::Int(456)],
/// ]);
///
/// let config = ValidationConfig::new().with_rule_ids(["R-EGID-02"]);
/// let result = engine.validate(&dataset, &config);
///
/// assert_eq!(result.findings.len(), 1);
/// assert_eq!(result.findings[0].row_index, 1);
/// ```
pub struct ValidationEngine {
    registry: RuleRegistry,
}

impl ValidationEngine {
    /// Creates an engine over `registry`.
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates `dataset`, running the rules selected by `config.rule_ids` (all rules
    /// when unset or empty).
    pub fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> ValidationResult {
        self.validate_rules(dataset, config, config.selected_rule_ids())
    }

    /// Validates `dataset` with an explicit rule subset.
    ///
    /// Unknown rule ids are dropped silently. Rules run in the order of `rule_ids`, or
    /// in registration order when no subset is given.
    pub fn validate_rules(
        &self,
        dataset: &DataSet,
        config: &ValidationConfig,
        rule_ids: Option<&[String]>,
    ) -> ValidationResult {
        let mut result = ValidationResult::new(dataset.len());

        let rules: Vec<&dyn Rule> = match rule_ids {
            Some(ids) if !ids.is_empty() => ids
                .iter()
                .filter_map(|id| {
                    let rule = self.registry.get_rule(id);
                    if rule.is_none() {
                        debug!("Ignoring unknown rule id: {}", id);
                    }
                    rule
                })
                .collect(),
            _ => self.registry.rules().collect(),
        };

        for rule in rules {
            let rule_id = rule.metadata().id.clone();

            match execute_rule(rule, dataset, config) {
                RuleOutcome::Executed(findings) => {
                    debug!("Rule {} produced {} findings", rule_id, findings.len());
                    result.findings.extend(findings);
                    result.rules_executed.push(rule_id);
                }
                RuleOutcome::NotApplicable => {
                    debug!("Rule {} not applicable, skipping", rule_id);
                    result.rules_skipped.push(rule_id);
                }
                RuleOutcome::Failed(e) => {
                    warn!("Error executing rule {}: {}", rule_id, e);
                    result.rules_skipped.push(rule_id);
                }
            }
        }

        info!(
            "Validated {} rows: {} errors, {} warnings, {} rules executed, {} skipped",
            result.total_rows,
            result.error_count(),
            result.warning_count(),
            result.rules_executed.len(),
            result.rules_skipped.len()
        );

        result
    }

    /// Best-effort logical → actual column mapping for `dataset`.
    pub fn detect_columns(&self, dataset: &DataSet) -> ColumnMapping {
        detect_columns(dataset)
    }
}
