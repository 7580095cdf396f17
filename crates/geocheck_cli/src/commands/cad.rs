use anyhow::{Context, Result};
use geocheck_cad::CadValidator;
use std::path::Path;

use crate::output;

pub fn execute(drawing_path: &str, format: &str) -> Result<()> {
    let result = CadValidator::new()
        .validate_file(Path::new(drawing_path))
        .with_context(|| format!("Failed to load drawing: {}", drawing_path))?;

    output::print_cad_report(&result, format)?;

    if !result.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}
