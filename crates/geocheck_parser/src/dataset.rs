//! Dataset loading from CSV and JSON files.
//!
//! Values are kept as read: CSV cells stay strings (an empty cell becomes a missing
//! value), JSON scalars keep their JSON type. Type interpretation is left to the rules.

use crate::{ParserError, Result, extension_of};
use geocheck_core::{DataSet, DataValue};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// Supported dataset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values with a header row (.csv)
    Csv,
    /// Array of flat objects (.json)
    Json,
}

/// Makes header names unique by suffixing repeats with `.1`, `.2`, ...
///
/// A suffix that is already taken by an earlier header is skipped.
fn dedupe_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::new();
    for header in headers {
        let mut name = header.clone();
        if used.contains(&name) {
            let suffix = next_suffix.entry(header.clone()).or_insert(1);
            loop {
                name = format!("{header}.{suffix}");
                *suffix += 1;
                if !used.contains(&name) {
                    break;
                }
            }
        }
        used.insert(name.clone());
        unique.push(name);
    }
    unique
}

/// Parse a dataset from CSV content with a header row.
///
/// # Example
///
/// ```rust
/// use geocheck_core::DataValue;
/// use geocheck_parser::parse_csv;
///
/// let dataset = parse_csv("PLZ,Ort\n8001,Zürich\n,Bern\n").unwrap();
///
/// assert_eq!(dataset.columns(), ["PLZ", "Ort"]);
/// assert_eq!(dataset.value(0, "PLZ"), &DataValue::from("8001"));
/// assert!(dataset.value(1, "PLZ").is_missing());
/// ```
pub fn parse_csv(content: &str) -> Result<DataSet> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = dedupe_headers(reader.headers()?.iter().map(str::to_string));
    let mut dataset = DataSet::with_columns(headers);

    for record in reader.records() {
        let record = record?;
        dataset.push_record(
            record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        DataValue::Null
                    } else {
                        DataValue::from(cell)
                    }
                })
                .collect(),
        );
    }

    Ok(dataset)
}

fn json_to_value(value: serde_json::Value) -> DataValue {
    match value {
        serde_json::Value::Null => DataValue::Null,
        serde_json::Value::Bool(b) => DataValue::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => DataValue::Int(i),
            None => n.as_f64().map_or(DataValue::Null, DataValue::Float),
        },
        serde_json::Value::String(s) => DataValue::String(s),
        nested => DataValue::String(nested.to_string()),
    }
}

/// Parse a dataset from a JSON array of flat objects.
///
/// Column order is the order in which keys are first seen. Keys absent from an object
/// are missing values in that row; nested arrays and objects are kept as JSON text.
pub fn parse_json(content: &str) -> Result<DataSet> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let serde_json::Value::Array(items) = value else {
        return Err(ParserError::InvalidDataset(
            "expected a JSON array of objects".to_string(),
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            serde_json::Value::Object(map) => rows.push(map),
            other => {
                return Err(ParserError::InvalidDataset(format!(
                    "row {idx} is not an object: {other}"
                )));
            }
        }
    }

    let mut columns: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut dataset = DataSet::with_columns(columns.clone());
    for mut row in rows {
        dataset.push_record(
            columns
                .iter()
                .map(|column| row.remove(column).map_or(DataValue::Null, json_to_value))
                .collect(),
        );
    }

    Ok(dataset)
}

/// Detect the dataset format from a file path based on its extension.
pub fn detect_dataset_format(path: &Path) -> Result<DatasetFormat> {
    match extension_of(path)?.as_str() {
        "csv" => Ok(DatasetFormat::Csv),
        "json" => Ok(DatasetFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a dataset from a file with automatic format detection.
///
/// Bytes that are not valid UTF-8 (e.g. a Windows-1252 export) are replaced with
/// U+FFFD instead of failing the load, so the encoding rule can report them per cell.
pub fn load_dataset(path: &Path) -> Result<DataSet> {
    let format = detect_dataset_format(path)?;
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = content {
        warn!(
            "{} is not valid UTF-8; undecodable bytes were replaced",
            path.display()
        );
    }

    let dataset = match format {
        DatasetFormat::Csv => parse_csv(&content)?,
        DatasetFormat::Json => parse_json(&content)?,
    };
    debug!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );

    Ok(dataset)
}
