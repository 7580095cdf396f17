//! Caller-supplied validation configuration.
//!
//! A configuration carries the mapping from logical column names to the actual
//! dataset headers, a bag of rule options, an optional rule subset and the dimension
//! columns used for breakdowns in reports.

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Mapping from logical column names (e.g. `plz`) to actual dataset column names.
pub type ColumnMapping = BTreeMap<String, String>;

/// Coordinate reference system of the easting/northing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Detect per row from the value ranges
    #[default]
    #[serde(rename = "auto", alias = "AUTO", alias = "Auto")]
    Auto,
    /// Swiss projected coordinates (metres)
    #[serde(rename = "LV95", alias = "lv95")]
    Lv95,
    /// GPS longitude/latitude (decimal degrees)
    #[serde(rename = "WGS84", alias = "wgs84")]
    Wgs84,
}

impl CoordinateSystem {
    /// Returns the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSystem::Auto => "auto",
            CoordinateSystem::Lv95 => "LV95",
            CoordinateSystem::Wgs84 => "WGS84",
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoordinateSystem {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AUTO" => Ok(CoordinateSystem::Auto),
            "LV95" => Ok(CoordinateSystem::Lv95),
            "WGS84" => Ok(CoordinateSystem::Wgs84),
            _ => Err(CoreError::UnknownCoordinateSystem(s.to_string())),
        }
    }
}

/// Rule-specific tuning options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Forces the coordinate system instead of detecting it per row
    pub coordinate_system: CoordinateSystem,

    /// Columns forming the duplicate-detection key (all columns when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_key_columns: Option<Vec<String>>,

    /// Columns that must contain numeric values
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub numeric_columns: Vec<String>,

    /// Options for rules registered by the embedding application
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Configuration for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Logical → actual column mapping; may be partial or empty
    pub columns: ColumnMapping,

    /// Rule options
    pub options: ValidationOptions,

    /// Explicit rule subset; `None` or an empty list runs every rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_ids: Option<Vec<String>>,

    /// Dimension name (e.g. `region`) → dataset column, for breakdowns in reports
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dimension_columns: BTreeMap<String, String>,
}

impl ValidationConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with the given column mapping.
    pub fn with_columns(columns: ColumnMapping) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Maps a logical column to an actual column.
    pub fn with_column(mut self, logical: impl Into<String>, actual: impl Into<String>) -> Self {
        self.columns.insert(logical.into(), actual.into());
        self
    }

    /// Forces a coordinate system.
    pub fn with_coordinate_system(mut self, system: CoordinateSystem) -> Self {
        self.options.coordinate_system = system;
        self
    }

    /// Sets the duplicate-detection key columns.
    pub fn with_duplicate_key_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.duplicate_key_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the columns that must be numeric.
    pub fn with_numeric_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.numeric_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets an option by key.
    ///
    /// The keys of [`ValidationOptions`] are checked and stored in their typed fields;
    /// every other key is kept as a free-form value in `extra`.
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Result<Self> {
        let key = key.into();
        match key.as_str() {
            "coordinate_system" => {
                let system = value
                    .as_str()
                    .ok_or_else(|| invalid_option(&key, "expected auto, LV95 or WGS84"))?
                    .parse()?;
                Ok(self.with_coordinate_system(system))
            }
            "duplicate_key_columns" => {
                let columns = string_list(&value)
                    .ok_or_else(|| invalid_option(&key, "expected a list of column names"))?;
                Ok(self.with_duplicate_key_columns(columns))
            }
            "numeric_columns" => {
                let columns = string_list(&value)
                    .ok_or_else(|| invalid_option(&key, "expected a list of column names"))?;
                Ok(self.with_numeric_columns(columns))
            }
            _ => {
                self.options.extra.insert(key, value);
                Ok(self)
            }
        }
    }

    /// Restricts the run to a subset of rules.
    pub fn with_rule_ids<I, S>(mut self, rule_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule_ids = Some(rule_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a dimension column for report breakdowns.
    pub fn with_dimension(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.dimension_columns.insert(name.into(), column.into());
        self
    }

    /// Resolves a logical column name through the mapping.
    ///
    /// Unmapped names resolve to themselves, so a dataset that already uses the
    /// logical names needs no mapping at all.
    pub fn resolve_column<'a>(&'a self, logical: &'a str) -> &'a str {
        self.columns
            .get(logical)
            .map(String::as_str)
            .unwrap_or(logical)
    }

    /// Returns the explicit rule subset, treating an empty list as "all rules".
    pub fn selected_rule_ids(&self) -> Option<&[String]> {
        self.rule_ids.as_deref().filter(|ids| !ids.is_empty())
    }
}

fn invalid_option(option: &str, message: &str) -> CoreError {
    CoreError::InvalidOption {
        option: option.to_string(),
        message: message.to_string(),
    }
}

/// Accepts a list of strings or a single comma-separated string.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect(),
        ),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect(),
        _ => None,
    }
}
