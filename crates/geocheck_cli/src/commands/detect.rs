use anyhow::{Context, Result};
use geocheck_parser::load_dataset;
use geocheck_validator::detect_columns;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(data_path: &str, format: &str) -> Result<()> {
    info!("Detecting columns: {}", data_path);

    let dataset = load_dataset(Path::new(data_path))
        .with_context(|| format!("Failed to load dataset: {}", data_path))?;

    let detected = detect_columns(&dataset);
    let profile = dataset.column_profile(&detected);

    output::print_column_profile(data_path, dataset.len(), &profile, &detected, format)
}
