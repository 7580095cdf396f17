//! Dataset representation for validation.
//!
//! A [`DataSet`] is an ordered table: column order and row order are insertion order,
//! and the 0-based row index is the identity every finding refers to.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

static MISSING: DataValue = DataValue::Null;

/// A value in a dataset cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl DataValue {
    /// Returns true if the cell holds no value: null or a NaN float.
    pub fn is_missing(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns true if the cell is missing or renders as whitespace only.
    pub fn is_blank(&self) -> bool {
        self.is_missing() || self.to_text().trim().is_empty()
    }

    /// Attempts to get this value as a float.
    ///
    /// Strings are parsed after trimming surrounding whitespace, booleans count as 0/1.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Null => None,
            DataValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            DataValue::Int(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            DataValue::String(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Renders the value the way a spreadsheet loader would print it.
    ///
    /// Integral floats keep a trailing `.0`, so `8001.0` stays distinguishable
    /// from the integer `8001`. Null renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            DataValue::Null => String::new(),
            DataValue::Bool(true) => "True".to_string(),
            DataValue::Bool(false) => "False".to_string(),
            DataValue::Int(i) => i.to_string(),
            DataValue::Float(f) => format_float(*f),
            DataValue::String(s) => s.clone(),
        }
    }
}

/// Formats a float with a trailing `.0` when it is integral.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// A single row of data, addressed by column name.
type DataRow = HashMap<String, DataValue>;

/// A dataset containing multiple rows.
///
/// The engine only ever reads a dataset; it is owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    /// Column names in header order
    columns: Vec<String>,
    /// The data rows
    rows: Vec<DataRow>,
}

impl DataSet {
    /// Creates a new empty dataset without columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a new dataset with the given header and no rows.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a dataset from a header and positional records.
    ///
    /// Short records are padded with missing values; surplus values are dropped.
    pub fn from_records<I, S>(columns: I, records: Vec<Vec<DataValue>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::with_columns(columns);
        for record in records {
            dataset.push_record(record);
        }
        dataset
    }

    /// Appends a positional record.
    pub fn push_record(&mut self, record: Vec<DataValue>) {
        let mut values = record.into_iter();
        let row = self
            .columns
            .iter()
            .map(|column| (column.clone(), values.next().unwrap_or(DataValue::Null)))
            .collect();
        self.rows.push(row);
    }

    /// Returns the column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if a column with exactly this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Finds a column by exact name, falling back to a case-insensitive match.
    pub fn find_column(&self, name: &str) -> Option<&str> {
        if let Some(column) = self.columns.iter().find(|c| *c == name) {
            return Some(column.as_str());
        }
        let lowered = name.to_lowercase();
        self.columns
            .iter()
            .find(|c| c.to_lowercase() == lowered)
            .map(String::as_str)
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at `row` / `column`, or a missing value when either is absent.
    pub fn value(&self, row: usize, column: &str) -> &DataValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&MISSING)
    }

    /// Iterates `(row index, cell)` pairs of one column.
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = (usize, &'a DataValue)> + 'a {
        self.rows
            .iter()
            .enumerate()
            .map(move |(idx, row)| (idx, row.get(column).unwrap_or(&MISSING)))
    }

    /// Iterates the cells of one row in header order.
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = &DataValue> {
        let data = self.rows.get(row);
        self.columns
            .iter()
            .map(move |c| data.and_then(|r| r.get(c)).unwrap_or(&MISSING))
    }

    /// Describes every column: its name, the logical field it was detected as and a few
    /// non-missing sample values.
    pub fn column_profile(&self, detected: &BTreeMap<String, String>) -> Vec<ColumnProfile> {
        self.columns
            .iter()
            .map(|column| ColumnProfile {
                name: column.clone(),
                detected_as: detected
                    .iter()
                    .find(|(_, actual)| *actual == column)
                    .map(|(logical, _)| logical.clone()),
                sample_values: self
                    .column_values(column)
                    .filter(|(_, v)| !v.is_missing())
                    .take(3)
                    .map(|(_, v)| v.to_text())
                    .collect(),
            })
            .collect()
    }
}

/// Summary of one dataset column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Header name
    pub name: String,
    /// Logical field name this column was mapped to, if any
    pub detected_as: Option<String>,
    /// Up to three non-missing values
    pub sample_values: Vec<String>,
}
