//! Address validation rules for Swiss addresses.

use super::{is_all_digits, strip_float_suffix};
use crate::{Rule, RuleResult};
use geocheck_core::{
    Category, DataSet, Finding, RuleMetadata, Severity, ValidationConfig, fields,
};
use regex::Regex;
use std::sync::LazyLock;

/// Valid Swiss canton abbreviations, sorted.
pub const SWISS_CANTONS: [&str; 26] = [
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW",
    "SG", "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH",
];

static UNUSUAL_STREET_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>{}|\\^~\[\]]").expect("static regex is valid"));

/// Checks that postal code, city and street are filled in.
pub struct RequiredFieldsRule {
    metadata: RuleMetadata,
}

impl RequiredFieldsRule {
    const FIELDS: [(&'static str, &'static str); 3] = [
        (fields::PLZ, "Postal code"),
        (fields::ORT, "City"),
        (fields::STRASSE, "Street"),
    ];

    pub fn new() -> Self {
        Self {
            // Required columns are resolved per field during validation.
            metadata: RuleMetadata::new("R-ADDR-01", Category::Address, Severity::Error)
                .with_name("Required Fields", "Pflichtfelder")
                .with_description(
                    "Checks that essential address fields (street, postal code, city) are not empty",
                    "Prüft, ob wesentliche Adressfelder (Strasse, PLZ, Ort) ausgefüllt sind",
                )
                .with_examples("Bundesplatz 1, 3003, Bern", "Bundesplatz 1, , (postal code and city missing)"),
        }
    }
}

impl Default for RequiredFieldsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for RequiredFieldsRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let mut findings = Vec::new();

        for (logical, display_name) in Self::FIELDS {
            let Some(column) = self.get_column(dataset, config, logical) else {
                continue;
            };

            for (idx, value) in dataset.column_values(column) {
                if value.is_blank() {
                    let mut finding = Finding::new(
                        &self.metadata,
                        idx,
                        column,
                        format!("{display_name} is missing or empty"),
                    );
                    if !value.is_missing() {
                        finding = finding.with_value(value.to_text());
                    }
                    findings.push(finding);
                }
            }
        }

        Ok(findings)
    }
}

/// Validates the Swiss postal code format: four digits between 1000 and 9999.
pub struct PostalCodeFormatRule {
    metadata: RuleMetadata,
}

impl PostalCodeFormatRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-ADDR-02", Category::Address, Severity::Error)
                .with_name("Postal Code Format", "PLZ-Format")
                .with_description(
                    "Swiss postal codes must be 4 digits between 1000 and 9999",
                    "Schweizer Postleitzahlen müssen 4-stellig sein (1000-9999)",
                )
                .with_required_columns(&[fields::PLZ])
                .with_examples("8001", "123, 00100, 8001a"),
        }
    }

    fn check(&self, raw: &str) -> Option<String> {
        let plz = strip_float_suffix(raw.trim());

        if !is_all_digits(&plz) {
            Some(format!("Postal code must be numeric: '{raw}'"))
        } else if plz.len() != 4 {
            Some(format!(
                "Postal code must have 4 digits: '{raw}' ({} digits)",
                plz.len()
            ))
        } else {
            let number: u32 = plz.parse().unwrap_or_default();
            if (1000..=9999).contains(&number) {
                None
            } else {
                Some(format!(
                    "Postal code out of valid range: '{raw}' (must be 1000-9999)"
                ))
            }
        }
    }
}

impl Default for PostalCodeFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for PostalCodeFormatRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some(column) = self.get_column(dataset, config, fields::PLZ) else {
            return Ok(Vec::new());
        };

        // Empty values are reported by the required-fields rule.
        let findings = dataset
            .column_values(column)
            .filter(|(_, value)| !value.is_blank())
            .filter_map(|(idx, value)| {
                let raw = value.to_text();
                self.check(&raw)
                    .map(|message| Finding::new(&self.metadata, idx, column, message).with_value(raw))
            })
            .collect();

        Ok(findings)
    }
}

/// Validates Swiss canton abbreviations. The field is optional.
pub struct CantonRule {
    metadata: RuleMetadata,
}

impl CantonRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-ADDR-04", Category::Address, Severity::Error)
                .with_name("Canton Validation", "Kanton-Validierung")
                .with_description(
                    "Canton abbreviation must be a valid Swiss canton (AG, BE, ZH, etc.)",
                    "Kantonsabkürzung muss ein gültiger Schweizer Kanton sein (AG, BE, ZH, etc.)",
                )
                .with_required_columns(&[fields::KANTON])
                .with_examples("ZH, BE, VD", "XX, Switzerland, Zürich"),
        }
    }
}

impl Default for CantonRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for CantonRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some(column) = self.get_column(dataset, config, fields::KANTON) else {
            return Ok(Vec::new());
        };

        let mut findings = Vec::new();
        for (idx, value) in dataset.column_values(column) {
            if value.is_blank() {
                continue;
            }

            let raw = value.to_text();
            let canton = raw.trim().to_uppercase();
            if !SWISS_CANTONS.contains(&canton.as_str()) {
                findings.push(
                    Finding::new(
                        &self.metadata,
                        idx,
                        column,
                        format!("Invalid canton abbreviation: '{raw}'"),
                    )
                    .with_value(raw)
                    .with_suggestion(format!("Valid cantons: {}", SWISS_CANTONS.join(", "))),
                );
            }
        }

        Ok(findings)
    }
}

/// Flags street names that are obviously malformed.
pub struct StreetFormatRule {
    metadata: RuleMetadata,
}

impl StreetFormatRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-ADDR-05", Category::Address, Severity::Warning)
                .with_name("Street Format", "Strassenformat")
                .with_description(
                    "Checks street names for obvious formatting issues",
                    "Prüft Strassennamen auf offensichtliche Formatierungsfehler",
                )
                .with_required_columns(&[fields::STRASSE])
                .with_examples("Bundesplatz 1, Bahnhofstrasse 23a", "123456, ????"),
        }
    }

    // First matching check wins.
    fn check(street: &str, raw: &str) -> Option<String> {
        if is_all_digits(street) {
            Some(format!("Street is numeric only: '{raw}'"))
        } else if street.chars().count() < 3 {
            Some(format!("Street name is very short: '{raw}'"))
        } else if UNUSUAL_STREET_CHARS.is_match(street) {
            Some(format!("Street name contains unusual characters: '{raw}'"))
        } else {
            None
        }
    }
}

impl Default for StreetFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for StreetFormatRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some(column) = self.get_column(dataset, config, fields::STRASSE) else {
            return Ok(Vec::new());
        };

        let findings = dataset
            .column_values(column)
            .filter(|(_, value)| !value.is_blank())
            .filter_map(|(idx, value)| {
                let raw = value.to_text();
                Self::check(raw.trim(), &raw)
                    .map(|message| Finding::new(&self.metadata, idx, column, message).with_value(raw))
            })
            .collect();

        Ok(findings)
    }
}
