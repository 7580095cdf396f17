//! # GeoDataCheck Validator
//!
//! Rule-based validation engine for Swiss building and address datasets. This crate
//! provides:
//!
//! - The [`Rule`] trait and the default rule catalogue (address, coordinates, EGID,
//!   general data quality)
//! - [`RuleRegistry`]: the set of known rules, with lookup and documentation
//! - [`ValidationEngine`]: applicability checks and fault-isolated rule execution
//! - [`ValidationResult`]: findings plus derived counts, pass rate and breakdowns
//! - Column auto-detection and named checker presets
//!
//! ## Example
//!
//! ```rust
//! use geocheck_core::{DataSet, DataValue, ValidationConfig};
//! use geocheck_validator::{ValidationEngine, build_default_registry};
//!
//! let dataset = DataSet::from_records(
//!     ["PLZ", "Kanton"],
//!     vec![
//!         vec![DataValue::from("8001"), DataValue::from("ZH")],
//!         vec![DataValue::from("800"), DataValue::from("XX")],
//!     ],
//! );
//!
//! let engine = ValidationEngine::new(build_default_registry());
//! let config = ValidationConfig::with_columns(engine.detect_columns(&dataset));
//! let result = engine.validate(&dataset, &config);
//!
//! assert_eq!(result.total_rows, 2);
//! assert_eq!(result.error_count(), 2);
//! assert_eq!(result.passed_rows(), 1);
//! ```

mod checkers;
mod detection;
mod engine;
mod registry;
mod result;
mod rule;
pub mod rules;

pub use checkers::*;
pub use detection::*;
pub use engine::*;
pub use registry::*;
pub use result::*;
pub use rule::*;
