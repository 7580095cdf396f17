//! EGID (federal building identifier) validation rules.

use super::truncate_to_integer_text;
use crate::{Rule, RuleResult};
use geocheck_core::{
    Category, DataSet, Finding, RuleMetadata, Severity, ValidationConfig, display_row, fields,
};
use std::collections::HashMap;
use std::num::IntErrorKind;

/// Largest EGID considered plausible (nine digits).
pub const MAX_PLAUSIBLE_EGID: i128 = 999_999_999;

/// Interpretation of an EGID cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsedEgid {
    Number(i128),
    TooLarge,
    Negative,
    Invalid,
}

/// Parses an EGID, accepting spreadsheet floats such as `123456.0`.
fn parse_egid(text: &str) -> ParsedEgid {
    let text = text.trim();
    if text.contains('.') {
        return match text.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let truncated = value.trunc();
                if truncated > MAX_PLAUSIBLE_EGID as f64 {
                    ParsedEgid::TooLarge
                } else {
                    ParsedEgid::Number(truncated as i128)
                }
            }
            _ => ParsedEgid::Invalid,
        };
    }

    match text.parse::<i128>() {
        Ok(value) => ParsedEgid::Number(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => ParsedEgid::TooLarge,
            IntErrorKind::NegOverflow => ParsedEgid::Negative,
            _ => ParsedEgid::Invalid,
        },
    }
}

/// Normalized uniqueness key of an EGID cell, `None` for malformed values.
fn egid_key(text: &str) -> Option<String> {
    let text = text.trim();
    if text.contains('.') {
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(truncate_to_integer_text(value)),
            _ => None,
        }
    } else if matches!(
        parse_egid(text),
        ParsedEgid::Number(_) | ParsedEgid::TooLarge | ParsedEgid::Negative
    ) {
        Some(text.to_string())
    } else {
        None
    }
}

/// Validates that EGIDs are positive integers.
pub struct EgidFormatRule {
    metadata: RuleMetadata,
}

impl EgidFormatRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-EGID-01", Category::Egid, Severity::Error)
                .with_name("EGID Format", "EGID-Format")
                .with_description(
                    "EGID must be a positive integer (federal building identifier)",
                    "EGID muss eine positive Ganzzahl sein (Eidgenössischer Gebäudeidentifikator)",
                )
                .with_required_columns(&[fields::EGID])
                .with_examples("123456789", "12-345, EGID123, -500"),
        }
    }
}

impl Default for EgidFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EgidFormatRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some(column) = self.get_column(dataset, config, fields::EGID) else {
            return Ok(Vec::new());
        };

        let mut findings = Vec::new();
        for (idx, value) in dataset.column_values(column) {
            // Missing EGIDs are reported by the presence rule.
            if value.is_blank() {
                continue;
            }

            let raw = value.to_text();
            let finding = match parse_egid(&raw) {
                ParsedEgid::Invalid => Finding::new(
                    &self.metadata,
                    idx,
                    column,
                    format!("Invalid EGID format: '{raw}' (must be a number)"),
                ),
                ParsedEgid::Negative => Finding::new(
                    &self.metadata,
                    idx,
                    column,
                    format!("EGID must be positive: '{raw}'"),
                ),
                ParsedEgid::Number(egid) if egid <= 0 => Finding::new(
                    &self.metadata,
                    idx,
                    column,
                    format!("EGID must be positive: '{raw}'"),
                ),
                ParsedEgid::Number(egid) if egid <= MAX_PLAUSIBLE_EGID => continue,
                ParsedEgid::Number(_) | ParsedEgid::TooLarge => Finding::new(
                    &self.metadata,
                    idx,
                    column,
                    format!("EGID unusually large: '{raw}'"),
                )
                .with_severity(Severity::Warning),
            };
            findings.push(finding.with_value(raw));
        }

        Ok(findings)
    }
}

/// Reports EGIDs that appear on more than one row.
pub struct EgidUniquenessRule {
    metadata: RuleMetadata,
}

impl EgidUniquenessRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-EGID-02", Category::Egid, Severity::Warning)
                .with_name("EGID Uniqueness", "EGID-Eindeutigkeit")
                .with_description(
                    "Each EGID should appear only once (unless multiple units per building)",
                    "Jedes EGID sollte nur einmal vorkommen (ausser bei mehreren Einheiten pro Gebäude)",
                )
                .with_required_columns(&[fields::EGID])
                .with_examples("123, 456, 789 (all different)", "123, 123, 456 (123 twice)"),
        }
    }
}

impl Default for EgidUniquenessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EgidUniquenessRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some(column) = self.get_column(dataset, config, fields::EGID) else {
            return Ok(Vec::new());
        };

        // Groups keep first-seen order.
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (idx, value) in dataset.column_values(column) {
            if value.is_blank() {
                continue;
            }
            let Some(key) = egid_key(&value.to_text()) else {
                continue;
            };

            match positions.get(&key) {
                Some(&pos) => groups[pos].1.push(idx),
                None => {
                    positions.insert(key.clone(), groups.len());
                    groups.push((key, vec![idx]));
                }
            }
        }

        let mut findings = Vec::new();
        for (egid, rows) in groups.iter().filter(|(_, rows)| rows.len() > 1) {
            let listed = rows
                .iter()
                .map(|&r| display_row(r).to_string())
                .collect::<Vec<_>>()
                .join(", ");

            for &idx in &rows[1..] {
                findings.push(
                    Finding::new(
                        &self.metadata,
                        idx,
                        column,
                        format!("EGID '{egid}' occurs multiple times (rows: {listed})"),
                    )
                    .with_value(egid.clone())
                    .with_suggestion("Check whether these are duplicates or different units"),
                );
            }
        }

        Ok(findings)
    }
}

/// Checks that every record carries an EGID.
pub struct EgidPresenceRule {
    metadata: RuleMetadata,
}

impl EgidPresenceRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-EGID-03", Category::Egid, Severity::Error)
                .with_name("EGID Presence", "EGID vorhanden")
                .with_description(
                    "Every building record should have an EGID",
                    "Jeder Gebäudedatensatz sollte eine EGID haben",
                )
                .with_required_columns(&[fields::EGID])
                .with_examples("123456789", "(empty)"),
        }
    }
}

impl Default for EgidPresenceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EgidPresenceRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some(column) = self.get_column(dataset, config, fields::EGID) else {
            return Ok(Vec::new());
        };

        Ok(dataset
            .column_values(column)
            .filter(|(_, value)| value.is_blank())
            .map(|(idx, _)| Finding::new(&self.metadata, idx, column, "EGID is missing"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocheck_core::DataValue;
    use pretty_assertions::assert_eq;

    fn egids(values: Vec<DataValue>) -> DataSet {
        DataSet::from_records(["EGID"], values.into_iter().map(|v| vec![v]).collect())
    }

    #[test]
    fn test_parse_egid() {
        assert_eq!(parse_egid("123456"), ParsedEgid::Number(123456));
        assert_eq!(parse_egid(" 123456.0 "), ParsedEgid::Number(123456));
        assert_eq!(parse_egid("-500"), ParsedEgid::Number(-500));
        assert_eq!(parse_egid("12-345"), ParsedEgid::Invalid);
        assert_eq!(parse_egid("EGID123"), ParsedEgid::Invalid);
        assert_eq!(parse_egid("nan.0"), ParsedEgid::Invalid);
        assert_eq!(
            parse_egid("999999999999999999999999999999999999999999"),
            ParsedEgid::TooLarge
        );
    }

    #[test]
    fn test_format_rule() {
        let dataset = egids(vec![
            DataValue::Int(123456789),
            "12-345".into(),
            DataValue::Int(-500),
            DataValue::Int(0),
            DataValue::Int(1_234_567_890),
            DataValue::Float(190_123.0),
            DataValue::Null,
        ]);

        let findings = EgidFormatRule::new()
            .validate(&dataset, &ValidationConfig::new())
            .unwrap();

        let rows: Vec<_> = findings.iter().map(|f| (f.row_index, f.severity)).collect();
        assert_eq!(
            rows,
            vec![
                (1, Severity::Error),
                (2, Severity::Error),
                (3, Severity::Error),
                (4, Severity::Warning),
            ]
        );
        assert_eq!(findings[0].message, "Invalid EGID format: '12-345' (must be a number)");
        assert_eq!(findings[1].message, "EGID must be positive: '-500'");
        assert_eq!(findings[3].value.as_deref(), Some("1234567890"));
    }

    #[test]
    fn test_uniqueness_reports_later_occurrences() {
        let dataset = egids(vec![
            DataValue::Int(123),
            DataValue::Int(123),
            DataValue::Int(456),
        ]);

        let findings = EgidUniquenessRule::new()
            .validate(&dataset, &ValidationConfig::new())
            .unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].row_index, 1);
        assert_eq!(findings[0].message, "EGID '123' occurs multiple times (rows: 2, 3)");
        assert_eq!(findings[0].value.as_deref(), Some("123"));
    }

    #[test]
    fn test_uniqueness_normalizes_floats() {
        let dataset = egids(vec![
            DataValue::Float(123.0),
            "123".into(),
            "abc".into(),
            "abc".into(),
            DataValue::Float(123.0),
        ]);

        let findings = EgidUniquenessRule::new()
            .validate(&dataset, &ValidationConfig::new())
            .unwrap();

        let rows: Vec<_> = findings.iter().map(|f| f.row_index).collect();
        assert_eq!(rows, vec![1, 4]);
        assert!(findings[0].message.contains("rows: 2, 3, 6"));
    }

    #[test]
    fn test_presence_rule() {
        let dataset = egids(vec![DataValue::Int(1), DataValue::Null, " ".into()]);

        let findings = EgidPresenceRule::new()
            .validate(&dataset, &ValidationConfig::new())
            .unwrap();

        let rows: Vec<_> = findings.iter().map(|f| f.row_index).collect();
        assert_eq!(rows, vec![1, 2]);
        assert!(findings.iter().all(|f| f.value.is_none()));
    }
}
