//! Loaders for GeoDataCheck.
//!
//! This crate turns files into the in-memory structures the validation engine works
//! on: [`ValidationConfig`](geocheck_core::ValidationConfig) from YAML, TOML or JSON,
//! and [`DataSet`](geocheck_core::DataSet) from CSV or JSON. The format is detected
//! from the file extension.
//!
//! # Example
//!
//! ```rust
//! use geocheck_parser::{parse_config_yaml, parse_csv};
//!
//! let config = parse_config_yaml("columns:\n  plz: Postleitzahl\n").unwrap();
//! let dataset = parse_csv("Postleitzahl,Ort\n8001,Zürich\n").unwrap();
//!
//! assert_eq!(config.resolve_column("plz"), "Postleitzahl");
//! assert_eq!(dataset.len(), 1);
//! ```

mod config;
mod dataset;
mod error;

pub use config::*;
pub use dataset::*;
pub use error::*;

use std::path::Path;

/// Lowercased file extension of `path`.
fn extension_of(path: &Path) -> Result<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .ok_or(ParserError::InvalidExtension)
}
