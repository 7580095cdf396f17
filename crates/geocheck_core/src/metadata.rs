//! Rule identity and documentation.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity levels for validation findings.
///
/// Ordered by strictness: `Error > Warning > Info`. A row passes validation
/// iff no `Error` finding references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note
    Info,
    /// Suspicious value, row still passes
    Warning,
    /// Invalid value, row fails
    Error,
}

impl Severity {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories for grouping validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Address fields: postal code, city, street, canton
    Address,
    /// LV95 / WGS84 coordinates
    Coordinates,
    /// Federal building identifier
    Egid,
    /// Dataset-wide quality checks
    General,
    /// Rules registered by the embedding application
    Custom,
}

impl Category {
    /// All categories in documentation order.
    pub const ALL: [Category; 5] = [
        Category::Address,
        Category::Coordinates,
        Category::Egid,
        Category::General,
        Category::Custom,
    ];

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Address => "address",
            Category::Coordinates => "coordinates",
            Category::Egid => "egid",
            Category::General => "general",
            Category::Custom => "custom",
        }
    }

    /// Maps the category segment of a rule id (`R-<SEGMENT>-NN`) to a category name.
    ///
    /// Unknown segments count as `general`.
    pub fn label_for_rule_segment(segment: &str) -> &'static str {
        match segment {
            "ADDR" => "address",
            "COORD" => "coordinates",
            "EGID" => "egid",
            "GEN" => "general",
            "CUSTOM" => "custom",
            _ => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Metadata for a validation rule, used for documentation and for findings.
///
/// Created once when a rule is constructed and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Stable identifier, `R-<CATEGORY>-<NN>`
    pub id: String,
    /// English name
    pub name: String,
    /// German name
    pub name_de: String,
    /// English description
    pub description: String,
    /// German description
    pub description_de: String,
    /// Rule category
    pub category: Category,
    /// Default severity of findings
    pub severity: Severity,
    /// Logical columns that must resolve for the rule to apply
    pub required_columns: Vec<String>,
    /// Example of a valid value
    pub example_valid: Option<String>,
    /// Example of an invalid value
    pub example_invalid: Option<String>,
}

impl RuleMetadata {
    /// Creates metadata with the given identity; names default to the id.
    pub fn new(id: impl Into<String>, category: Category, severity: Severity) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            name_de: id.clone(),
            description: String::new(),
            description_de: String::new(),
            id,
            category,
            severity,
            required_columns: Vec::new(),
            example_valid: None,
            example_invalid: None,
        }
    }

    /// Sets the English and German names.
    pub fn with_name(mut self, name: impl Into<String>, name_de: impl Into<String>) -> Self {
        self.name = name.into();
        self.name_de = name_de.into();
        self
    }

    /// Sets the English and German descriptions.
    pub fn with_description(
        mut self,
        description: impl Into<String>,
        description_de: impl Into<String>,
    ) -> Self {
        self.description = description.into();
        self.description_de = description_de.into();
        self
    }

    /// Sets the logical columns the rule requires.
    pub fn with_required_columns(mut self, columns: &[&str]) -> Self {
        self.required_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Sets the documentation examples.
    pub fn with_examples(mut self, valid: impl Into<String>, invalid: impl Into<String>) -> Self {
        self.example_valid = Some(valid.into());
        self.example_invalid = Some(invalid.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("address".parse::<Category>().unwrap(), Category::Address);
        assert_eq!("EGID".parse::<Category>().unwrap(), Category::Egid);
        assert!("parking".parse::<Category>().is_err());
    }

    #[test]
    fn test_rule_segment_labels() {
        assert_eq!(Category::label_for_rule_segment("ADDR"), "address");
        assert_eq!(Category::label_for_rule_segment("COORD"), "coordinates");
        assert_eq!(Category::label_for_rule_segment("XYZ"), "general");
    }

    #[test]
    fn test_metadata_builder() {
        let metadata = RuleMetadata::new("R-TEST-01", Category::Custom, Severity::Info)
            .with_name("Test", "Test DE")
            .with_required_columns(&["plz"])
            .with_examples("ok", "bad");

        assert_eq!(metadata.name_de, "Test DE");
        assert_eq!(metadata.required_columns, vec!["plz".to_string()]);
        assert_eq!(metadata.example_invalid.as_deref(), Some("bad"));
        assert_eq!(metadata.description, "");
    }

    #[test]
    fn test_metadata_serializes_lowercase_enums() {
        let metadata = RuleMetadata::new("R-GEN-09", Category::General, Severity::Warning);
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["category"], "general");
        assert_eq!(json["severity"], "warning");
    }
}
