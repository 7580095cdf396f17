use anyhow::{Context, Result, anyhow};
use geocheck_core::ValidationConfig;
use geocheck_parser::{load_config, load_dataset};
use geocheck_validator::{ValidationEngine, build_default_registry, find_checker};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(
    data_path: &str,
    config_path: Option<&str>,
    rules: Option<&str>,
    checker: Option<&str>,
    dimensions: &[String],
    options: &[String],
    format: &str,
) -> Result<()> {
    info!("Validating dataset: {}", data_path);

    let dataset = load_dataset(Path::new(data_path))
        .with_context(|| format!("Failed to load dataset: {}", data_path))?;

    let mut config = match config_path {
        Some(path) => load_config(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => ValidationConfig::new(),
    };

    let engine = ValidationEngine::new(build_default_registry());

    if config.columns.is_empty() {
        config.columns = engine.detect_columns(&dataset);
        info!("Detected {} columns", config.columns.len());
    }

    if let Some(id) = checker {
        let preset = find_checker(id).ok_or_else(|| anyhow!("Unknown checker: {}", id))?;
        info!("Using checker: {}", preset.name);
        if let Some(rule_ids) = preset.rule_id_list() {
            config.rule_ids = Some(rule_ids);
        }
    }

    if let Some(list) = rules {
        config.rule_ids = Some(parse_rule_list(list));
    }

    for dimension in dimensions {
        let (name, column) = parse_dimension(dimension)?;
        config = config.with_dimension(name, column);
    }

    for option in options {
        let (key, value) = parse_option(option)?;
        config = config
            .with_option(key, value)
            .with_context(|| format!("Invalid --option {}", option))?;
    }

    if format != "json" {
        output::print_info(&format!(
            "Dataset loaded: {} ({} rows, {} columns)",
            data_path,
            dataset.len(),
            dataset.columns().len()
        ));
    }

    let result = engine.validate(&dataset, &config);
    let summary = result.summary_with_dimensions(&dataset, &config);

    output::print_validation_summary(&summary, format)?;

    if !result.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

/// Splits a comma-separated rule list, ignoring blanks.
fn parse_rule_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Parses `NAME=COLUMN`.
fn parse_dimension(spec: &str) -> Result<(&str, &str)> {
    match spec.split_once('=') {
        Some((name, column)) if !name.trim().is_empty() && !column.trim().is_empty() => {
            Ok((name.trim(), column.trim()))
        }
        _ => Err(anyhow!(
            "Invalid dimension '{}'. Expected format: NAME=COLUMN (e.g. region=Region)",
            spec
        )),
    }
}

/// Parses `KEY=VALUE`; the value is read as JSON and falls back to a plain string.
fn parse_option(spec: &str) -> Result<(&str, Value)> {
    match spec.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            let value = value.trim();
            let parsed = serde_json::from_str(value)
                .unwrap_or_else(|_| Value::String(value.to_string()));
            Ok((key.trim(), parsed))
        }
        _ => Err(anyhow!(
            "Invalid option '{}'. Expected format: KEY=VALUE (e.g. coordinate_system=LV95)",
            spec
        )),
    }
}
