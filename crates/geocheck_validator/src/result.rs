//! Validation results and their derived views.

use geocheck_core::{Category, DataSet, Finding, FindingRecord, Severity, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Dimension value used for rows where the dimension column is missing.
pub const EMPTY_DIMENSION: &str = "(empty)";

/// Complete result of one validation run.
///
/// `total_rows` is fixed to the dataset length before any rule runs. Every other count
/// is derived from the findings on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Number of rows in the validated dataset
    pub total_rows: usize,
    /// Findings in rule execution order
    pub findings: Vec<Finding>,
    /// Ids of rules that ran to completion
    pub rules_executed: Vec<String>,
    /// Ids of rules that were not applicable or failed
    pub rules_skipped: Vec<String>,
}

/// Row and finding counts for one value of a dimension column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionCounts {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Breakdown of a dimension column: value → counts.
pub type DimensionBreakdown = BTreeMap<String, DimensionCounts>;

/// Serializable summary of a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub passed_rows: usize,
    pub pass_rate: f64,
    /// Finding records, including the display row
    pub errors: Vec<FindingRecord>,
    pub errors_by_category: BTreeMap<String, usize>,
    pub errors_by_rule: BTreeMap<String, usize>,
    pub rules_executed: Vec<String>,
    pub rules_skipped: Vec<String>,
    /// `by_<dimension>` breakdowns
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, DimensionBreakdown>,
}

impl ValidationResult {
    /// Creates an empty result for a dataset of `total_rows` rows.
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Self::default()
        }
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count_severity(Severity::Info)
    }

    /// Returns true if no finding has ERROR severity.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Rows without any ERROR finding. Warnings and infos do not fail a row.
    pub fn passed_rows(&self) -> usize {
        let error_rows: BTreeSet<usize> = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .map(|f| f.row_index)
            .collect();
        self.total_rows.saturating_sub(error_rows.len())
    }

    /// Percentage of passed rows, rounded to one decimal with ties to even.
    /// An empty dataset passes fully.
    pub fn pass_rate(&self) -> f64 {
        if self.total_rows == 0 {
            return 100.0;
        }
        let rate = self.passed_rows() as f64 / self.total_rows as f64 * 100.0;
        (rate * 10.0).round_ties_even() / 10.0
    }

    /// Counts findings per category, derived from the second segment of the rule id.
    ///
    /// Rule ids without a `-` separator are not counted.
    pub fn errors_by_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            if let Some(segment) = finding.rule_id.split('-').nth(1) {
                let label = Category::label_for_rule_segment(segment);
                *counts.entry(label.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Counts findings per rule id.
    pub fn errors_by_rule(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.rule_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Breaks rows and findings down by the values of `dimension_column`.
    ///
    /// Every distinct value of the column gets an entry, flagged or not. Returns an empty
    /// map when the dataset has no such column.
    pub fn errors_by_dimension(&self, dataset: &DataSet, dimension_column: &str) -> DimensionBreakdown {
        let mut breakdown = DimensionBreakdown::new();
        if !dataset.has_column(dimension_column) {
            return breakdown;
        }

        let dimension_value = |row: usize| {
            let value = dataset.value(row, dimension_column);
            if value.is_missing() {
                EMPTY_DIMENSION.to_string()
            } else {
                value.to_text()
            }
        };

        for row in 0..dataset.len() {
            breakdown.entry(dimension_value(row)).or_default().total += 1;
        }

        for finding in self.findings.iter().filter(|f| f.row_index < dataset.len()) {
            let counts = breakdown.entry(dimension_value(finding.row_index)).or_default();
            match finding.severity {
                Severity::Error => counts.errors += 1,
                Severity::Warning => counts.warnings += 1,
                Severity::Info => {}
            }
        }

        breakdown
    }

    /// Builds the serializable summary.
    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            total_rows: self.total_rows,
            error_count: self.error_count(),
            warning_count: self.warning_count(),
            info_count: self.info_count(),
            passed_rows: self.passed_rows(),
            pass_rate: self.pass_rate(),
            errors: self.findings.iter().map(Finding::to_record).collect(),
            errors_by_category: self.errors_by_category(),
            errors_by_rule: self.errors_by_rule(),
            rules_executed: self.rules_executed.clone(),
            rules_skipped: self.rules_skipped.clone(),
            dimensions: BTreeMap::new(),
        }
    }

    /// Builds the summary with a `by_<name>` breakdown for every configured dimension
    /// column present in the dataset.
    pub fn summary_with_dimensions(
        &self,
        dataset: &DataSet,
        config: &ValidationConfig,
    ) -> ValidationSummary {
        let mut summary = self.summary();
        for (name, column) in &config.dimension_columns {
            if dataset.has_column(column) {
                summary
                    .dimensions
                    .insert(format!("by_{name}"), self.errors_by_dimension(dataset, column));
            }
        }
        summary
    }
}
