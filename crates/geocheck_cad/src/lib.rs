//! # GeoDataCheck CAD
//!
//! Validation of CAFM base plan drawings against the BBL layer standard.
//!
//! Drawings are read from a JSON export of the DXF document (header units, layouts,
//! layer table, model space entities and block definitions). The validator checks the
//! drawing setup, the layer structure, the room polygons, the mandatory blocks and
//! external references, and collects descriptive statistics.
//!
//! ## Example
//!
//! ```rust
//! use geocheck_cad::{CadValidator, parse_drawing};
//!
//! let drawing = parse_drawing(r#"{"insunits": 6, "layouts": ["Model", "A3"]}"#).unwrap();
//! let result = CadValidator::new().validate(&drawing, "plan.dxf");
//!
//! // No room polygons and no BBL_RAUM_POLYGON layer
//! assert!(!result.is_valid());
//! assert_eq!(result.error_count(), 2);
//! ```

pub mod drawing;
pub mod error;
pub mod layers;
pub mod result;
pub mod validator;

pub use drawing::*;
pub use error::*;
pub use layers::*;
pub use result::*;
pub use validator::*;
