//! Validation findings.

use crate::{RuleMetadata, Severity};
use serde::{Deserialize, Serialize};

/// Offset between a 0-based row index and the spreadsheet row a user sees
/// (1-based numbering plus one header row).
pub const DISPLAY_ROW_OFFSET: usize = 2;

/// Converts a 0-based row index into the spreadsheet row number.
pub fn display_row(row_index: usize) -> usize {
    row_index + DISPLAY_ROW_OFFSET
}

/// One validation outcome produced by a rule.
///
/// Findings are created by rules and never mutated once they are part of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 0-based index into the dataset
    pub row_index: usize,
    /// Column name, or [`WHOLE_ROW`](crate::fields::WHOLE_ROW)
    pub column: String,
    /// Id of the rule that produced the finding
    pub rule_id: String,
    /// Name of the rule that produced the finding
    pub rule_name: String,
    /// Severity of this finding
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Offending value, stringified
    pub value: Option<String>,
    /// Hint for fixing the value
    pub suggestion: Option<String>,
}

impl Finding {
    /// Creates a finding attributed to `rule`, using its default severity.
    pub fn new(
        rule: &RuleMetadata,
        row_index: usize,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            column: column.into(),
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            severity: rule.severity,
            message: message.into(),
            value: None,
            suggestion: None,
        }
    }

    /// Attaches the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attaches a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Overrides the rule's default severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the spreadsheet row number of this finding.
    pub fn display_row(&self) -> usize {
        display_row(self.row_index)
    }

    /// Returns the serializable record of this finding.
    pub fn to_record(&self) -> FindingRecord {
        FindingRecord {
            row_index: self.row_index,
            display_row: self.display_row(),
            column: self.column.clone(),
            rule_id: self.rule_id.clone(),
            rule_name: self.rule_name.clone(),
            severity: self.severity,
            message: self.message.clone(),
            value: self.value.clone(),
            suggestion: self.suggestion.clone(),
        }
    }
}

/// Wire representation of a [`Finding`], including the display row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingRecord {
    pub row_index: usize,
    pub display_row: usize,
    pub column: String,
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    pub value: Option<String>,
    pub suggestion: Option<String>,
}
