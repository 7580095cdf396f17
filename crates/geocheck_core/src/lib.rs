//! # GeoDataCheck Core
//!
//! Core data structures and types for the GeoDataCheck validation engine.
//!
//! This crate provides the building blocks shared by the rule engine, the loaders and
//! the command line tool. The engine validates tabular building and address datasets
//! (Swiss postal codes, cantons, coordinates, federal building identifiers) against a
//! catalogue of independent rules.
//!
//! ## Key Concepts
//!
//! - **DataSet**: an ordered table of rows; row index is the stable identity of a row
//! - **RuleMetadata**: identity and documentation record of a validation rule
//! - **Finding**: one reported validation outcome (severity + message + location)
//! - **ValidationConfig**: column mapping and per-rule options supplied by the caller
//!
//! ## Example
//!
//! ```rust
//! use geocheck_core::{DataSet, DataValue, ValidationConfig, fields};
//!
//! let dataset = DataSet::from_records(
//!     ["PLZ", "Ort"],
//!     vec![vec![DataValue::from("8001"), DataValue::from("Zürich")]],
//! );
//! let config = ValidationConfig::new().with_column(fields::PLZ, "PLZ");
//!
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(config.resolve_column(fields::PLZ), "PLZ");
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod fields;
pub mod finding;
pub mod metadata;

pub use config::*;
pub use dataset::*;
pub use error::*;
pub use finding::*;
pub use metadata::*;
