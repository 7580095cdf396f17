//! Named checker presets: documented bundles of rule ids for common workflows.

use geocheck_core::fields;
use serde::Serialize;

/// A preset selecting a subset of the rule catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checker {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub description_long: &'static str,
    /// Grouping label for display
    pub category: &'static str,
    /// Logical columns the checker is meant for. Advisory only: rules still decide
    /// their own applicability.
    pub required_columns: &'static [&'static str],
    /// Rule subset; `None` runs every registered rule
    pub rule_ids: Option<&'static [&'static str]>,
}

impl Checker {
    /// Rule ids as owned strings, ready for [`ValidationConfig::with_rule_ids`](geocheck_core::ValidationConfig::with_rule_ids).
    pub fn rule_id_list(&self) -> Option<Vec<String>> {
        self.rule_ids
            .map(|ids| ids.iter().map(|id| id.to_string()).collect())
    }
}

const CHECKERS: [Checker; 5] = [
    Checker {
        id: "address-checker",
        name: "Address Checker",
        description: "Checks Swiss addresses for format, postal code format and cantons.",
        description_long: "Validates postal code format (4 digits), canton abbreviations and street formats.",
        category: "quality",
        required_columns: &[fields::PLZ, fields::ORT, fields::STRASSE],
        rule_ids: Some(&["R-ADDR-01", "R-ADDR-02", "R-ADDR-04", "R-ADDR-05"]),
    },
    Checker {
        id: "coordinate-checker",
        name: "Coordinate Checker",
        description: "Checks whether coordinates lie within Switzerland (LV95/WGS84).",
        description_long: "Validates E/N coordinates against the Swiss borders, detecting LV95 or WGS84 automatically.",
        category: "coordinates",
        required_columns: &[fields::EASTING, fields::NORTHING],
        rule_ids: Some(&["R-COORD-01", "R-COORD-02", "R-COORD-04"]),
    },
    Checker {
        id: "egid-checker",
        name: "EGID/GWR Checker",
        description: "Validates EGID numbers for format and uniqueness.",
        description_long: "Checks federal building identifiers (EGID) for correct format and duplicates.",
        category: "egid",
        required_columns: &[fields::EGID],
        rule_ids: Some(&["R-EGID-01", "R-EGID-02", "R-EGID-03"]),
    },
    Checker {
        id: "quality-checker",
        name: "Data Quality Check",
        description: "Detects duplicate rows, empty entries and encoding problems.",
        description_long: "General data quality checks: duplicates, empty rows, data type consistency, character encoding.",
        category: "quality",
        required_columns: &[],
        rule_ids: Some(&["R-GEN-01", "R-GEN-02", "R-GEN-03", "R-GEN-04"]),
    },
    Checker {
        id: "full-checker",
        name: "Portfolio Completeness Check",
        description: "Runs every check: addresses, coordinates, EGID and quality.",
        description_long: "Comprehensive validation with all available rules for a complete portfolio review.",
        category: "quality",
        required_columns: &[],
        rule_ids: None,
    },
];

/// All checker presets.
pub fn default_checkers() -> Vec<Checker> {
    CHECKERS.to_vec()
}

/// Looks up a checker preset by id.
pub fn find_checker(id: &str) -> Option<Checker> {
    CHECKERS.iter().find(|checker| checker.id == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_registry;

    #[test]
    fn test_checker_rule_ids_exist() {
        let registry = build_default_registry();
        for checker in default_checkers() {
            for id in checker.rule_ids.unwrap_or_default() {
                assert!(registry.get_rule(id).is_some(), "{} -> {id}", checker.id);
            }
        }
    }

    #[test]
    fn test_find_checker() {
        let checker = find_checker("egid-checker").unwrap();
        assert_eq!(
            checker.rule_id_list(),
            Some(vec![
                "R-EGID-01".to_string(),
                "R-EGID-02".to_string(),
                "R-EGID-03".to_string()
            ])
        );
        assert_eq!(find_checker("full-checker").unwrap().rule_id_list(), None);
        assert!(find_checker("nope").is_none());
    }

    #[test]
    fn test_checkers_serialize() {
        let json = serde_json::to_value(default_checkers()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[4]["rule_ids"], serde_json::Value::Null);
        assert_eq!(json[0]["required_columns"][0], "plz");
    }
}
