//! General data quality rules.

use super::truncate_chars;
use crate::{Rule, RuleResult};
use geocheck_core::{
    Category, DataSet, DataValue, Finding, RuleMetadata, Severity, ValidationConfig, display_row,
    fields,
};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Logical columns that are implicitly numeric when explicitly mapped.
const NUMERIC_FIELDS: [&str; 4] = [fields::PLZ, fields::EGID, fields::EASTING, fields::NORTHING];

/// Substrings that betray mis-decoded text.
const ENCODING_INDICATORS: [&str; 8] = [
    "\u{FFFD}", // replacement character
    "Ã¼",       // ü decoded as Latin-1
    "Ã¤",       // ä
    "Ã¶",       // ö
    "Ã©",       // é
    "Ã¨",       // è
    "Ã ",       // à
    "\u{0}",
];

/// Hex digest of the `|`-joined cell texts. Missing cells render as `nan`.
fn row_fingerprint<'a>(values: impl Iterator<Item = &'a DataValue>) -> String {
    let joined = values
        .map(|v| {
            if v.is_missing() {
                "nan".to_string()
            } else {
                v.to_text()
            }
        })
        .collect::<Vec<_>>()
        .join("|");
    hex::encode(Sha256::digest(joined.as_bytes()))
}

/// Detects rows that repeat an earlier row, on all columns or on configured key columns.
pub struct DuplicateRowsRule {
    metadata: RuleMetadata,
}

impl DuplicateRowsRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-GEN-01", Category::General, Severity::Warning)
                .with_name("Duplicate Rows", "Doppelte Zeilen")
                .with_description(
                    "Detects rows that appear to be duplicates based on key fields",
                    "Erkennt Zeilen, die auf Basis von Schlüsselfeldern Duplikate zu sein scheinen",
                )
                .with_examples("Every row is unique", "Row 5 and row 10 are identical"),
        }
    }

    /// Columns that make up the duplicate key, or `None` when nothing is left to compare.
    fn key_columns<'a>(dataset: &'a DataSet, config: &'a ValidationConfig) -> Option<Vec<&'a str>> {
        match config.options.duplicate_key_columns.as_deref() {
            Some(keys) if !keys.is_empty() => {
                let existing: Vec<&str> = keys
                    .iter()
                    .map(String::as_str)
                    .filter(|key| dataset.has_column(key))
                    .collect();
                (!existing.is_empty()).then_some(existing)
            }
            _ => Some(dataset.columns().iter().map(String::as_str).collect()),
        }
    }
}

impl Default for DuplicateRowsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DuplicateRowsRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some(key_columns) = Self::key_columns(dataset, config) else {
            return Ok(Vec::new());
        };

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut findings = Vec::new();

        for idx in 0..dataset.len() {
            let fingerprint =
                row_fingerprint(key_columns.iter().map(|column| dataset.value(idx, column)));

            match seen.get(&fingerprint) {
                Some(&first) => findings.push(
                    Finding::new(
                        &self.metadata,
                        idx,
                        fields::WHOLE_ROW,
                        format!("Possible duplicate of row {}", display_row(first)),
                    )
                    .with_suggestion("Check whether this row was entered twice by mistake"),
                ),
                None => {
                    seen.insert(fingerprint, idx);
                }
            }
        }

        Ok(findings)
    }
}

/// Reports rows where every cell is empty.
pub struct EmptyRowsRule {
    metadata: RuleMetadata,
}

impl EmptyRowsRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-GEN-02", Category::General, Severity::Info)
                .with_name("Empty Rows", "Leere Zeilen")
                .with_description(
                    "Detects rows where all cells are empty",
                    "Erkennt Zeilen, in denen alle Zellen leer sind",
                )
                .with_examples("Row has at least one value", "Completely empty row"),
        }
    }
}

impl Default for EmptyRowsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EmptyRowsRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, _config: &ValidationConfig) -> RuleResult {
        Ok((0..dataset.len())
            .filter(|&idx| dataset.row_values(idx).all(DataValue::is_blank))
            .map(|idx| {
                Finding::new(&self.metadata, idx, fields::WHOLE_ROW, "Row is completely empty")
            })
            .collect())
    }
}

/// Checks that numeric columns only hold numbers.
pub struct DataTypeConsistencyRule {
    metadata: RuleMetadata,
}

impl DataTypeConsistencyRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-GEN-03", Category::General, Severity::Warning)
                .with_name("Data Type Consistency", "Datentyp-Konsistenz")
                .with_description(
                    "Checks that numeric columns contain only numeric values",
                    "Prüft, ob numerische Spalten nur numerische Werte enthalten",
                )
                .with_examples(
                    "Postal code column contains only numbers",
                    "Postal code column contains 'k.A.', 'n/a'",
                ),
        }
    }

    /// Configured numeric columns followed by explicitly mapped numeric fields, deduplicated.
    fn numeric_columns<'c>(dataset: &DataSet, config: &'c ValidationConfig) -> Vec<&'c str> {
        let mut columns: Vec<&str> = Vec::new();
        for column in &config.options.numeric_columns {
            if !columns.contains(&column.as_str()) {
                columns.push(column);
            }
        }
        for logical in NUMERIC_FIELDS {
            if let Some(actual) = config.columns.get(logical)
                && dataset.has_column(actual)
                && !columns.contains(&actual.as_str())
            {
                columns.push(actual);
            }
        }
        columns
    }
}

impl Default for DataTypeConsistencyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DataTypeConsistencyRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let mut findings = Vec::new();

        for column in Self::numeric_columns(dataset, config) {
            if !dataset.has_column(column) {
                continue;
            }

            for (idx, value) in dataset.column_values(column) {
                if value.is_blank() || value.as_float().is_some() {
                    continue;
                }
                let raw = value.to_text();
                findings.push(
                    Finding::new(
                        &self.metadata,
                        idx,
                        column,
                        format!("Non-numeric value in numeric column: '{raw}'"),
                    )
                    .with_value(raw),
                );
            }
        }

        Ok(findings)
    }
}

/// Detects text that was decoded with the wrong character set.
pub struct EncodingIssuesRule {
    metadata: RuleMetadata,
}

impl EncodingIssuesRule {
    const MESSAGE_PREVIEW_CHARS: usize = 50;
    const VALUE_MAX_CHARS: usize = 100;

    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-GEN-04", Category::General, Severity::Warning)
                .with_name("Encoding Issues", "Zeichenkodierung")
                .with_description(
                    "Detects potential character encoding problems (replacement characters, etc.)",
                    "Erkennt mögliche Zeichenkodierungsprobleme (Ersetzungszeichen, etc.)",
                )
                .with_examples("Zürich, Genève, Müller", "Z\u{FFFD}rich, Gen\u{FFFD}ve, M\u{FFFD}ller"),
        }
    }

    fn message(text: &str) -> String {
        if text.chars().count() > Self::MESSAGE_PREVIEW_CHARS {
            format!(
                "Possible encoding issue: '{}...'",
                truncate_chars(text, Self::MESSAGE_PREVIEW_CHARS)
            )
        } else {
            format!("Possible encoding issue: '{text}'")
        }
    }
}

impl Default for EncodingIssuesRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EncodingIssuesRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, _config: &ValidationConfig) -> RuleResult {
        let mut findings = Vec::new();

        // Column-major, at most one finding per cell.
        for column in dataset.columns() {
            for (idx, value) in dataset.column_values(column) {
                if value.is_missing() {
                    continue;
                }
                let text = value.to_text();
                if ENCODING_INDICATORS.iter().any(|issue| text.contains(issue)) {
                    findings.push(
                        Finding::new(&self.metadata, idx, column.as_str(), Self::message(&text))
                            .with_value(truncate_chars(&text, Self::VALUE_MAX_CHARS))
                            .with_suggestion(
                                "Check the character encoding of the source file (UTF-8 recommended)",
                            ),
                    );
                }
            }
        }

        Ok(findings)
    }
}
