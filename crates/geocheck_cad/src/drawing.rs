//! In-memory drawing model.
//!
//! A [`Drawing`] is the subset of a DXF document the base plan checks need. It is
//! produced by an external converter and read here from JSON.

use crate::{CadError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `$INSUNITS` value for metres.
pub const UNITS_METERS: i32 = 6;

/// Name of the model space layout.
pub const MODEL_LAYOUT: &str = "Model";

/// Entity type of lightweight polylines.
pub const LWPOLYLINE: &str = "LWPOLYLINE";

fn default_color() -> i32 {
    7
}

fn default_layer() -> String {
    "0".to_string()
}

/// A CAD drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Drawing units (`$INSUNITS`), 0 when unset
    #[serde(default)]
    pub insunits: i32,
    /// Layout tab names, including `Model`
    #[serde(default)]
    pub layouts: Vec<String>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Model space entities
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Block definitions
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A layer table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    /// AutoCAD color index
    #[serde(default = "default_color")]
    pub color: i32,
}

/// A model space entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// DXF type name, e.g. `LWPOLYLINE`, `TEXT`, `INSERT`
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default = "default_layer")]
    pub layer: String,
    #[serde(default)]
    pub handle: Option<String>,
    /// Vertex data, for polylines
    #[serde(default)]
    pub polyline: Option<Polyline>,
}

/// Vertices of a polyline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
}

impl Polyline {
    /// Enclosed area by the shoelace formula. Fewer than three points enclose nothing.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let [x1, y1] = self.points[i];
                let [x2, y2] = self.points[(i + 1) % n];
                x1 * y2 - x2 * y1
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Mean of the vertices, rounded to two decimals.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let x = self.points.iter().map(|p| p[0]).sum::<f64>() / n;
        let y = self.points.iter().map(|p| p[1]).sum::<f64>() / n;
        Some((round2(x), round2(y)))
    }
}

/// A block definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    /// True for external references
    #[serde(default)]
    pub is_xref: bool,
}

impl Block {
    /// Anonymous blocks (`*U12`, `*D3`, ...) are generated by CAD programs.
    pub fn is_anonymous(&self) -> bool {
        self.name.starts_with('*')
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Parse a drawing from its JSON representation.
pub fn parse_drawing(content: &str) -> Result<Drawing> {
    Ok(serde_json::from_str(content)?)
}

/// Load a drawing from a JSON file.
pub fn load_drawing(path: &Path) -> Result<Drawing> {
    let content = std::fs::read_to_string(path).map_err(|source| CadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_drawing(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn square(side: f64) -> Polyline {
        Polyline {
            closed: true,
            points: vec![[0.0, 0.0], [side, 0.0], [side, side], [0.0, side]],
        }
    }

    #[test]
    fn test_polyline_area() {
        assert_eq!(square(4.0).area(), 16.0);
        assert_eq!(square(0.5).area(), 0.25);

        let mut reversed = square(3.0);
        reversed.points.reverse();
        assert_eq!(reversed.area(), 9.0);

        let line = Polyline {
            closed: false,
            points: vec![[0.0, 0.0], [10.0, 0.0]],
        };
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn test_polyline_centroid() {
        assert_eq!(square(4.0).centroid(), Some((2.0, 2.0)));
        let tri = Polyline {
            closed: true,
            points: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        };
        assert_eq!(tri.centroid(), Some((0.33, 0.33)));
        assert_eq!(Polyline::default().centroid(), None);
    }

    #[test]
    fn test_parse_drawing_defaults() {
        let drawing = parse_drawing(
            r#"{
                "layers": [{"name": "BBL_TUER"}],
                "entities": [{"type": "TEXT"}],
                "blocks": [{"name": "*U1"}]
            }"#,
        )
        .unwrap();

        assert_eq!(drawing.insunits, 0);
        assert_eq!(drawing.layers[0].color, 7);
        assert_eq!(drawing.entities[0].layer, "0");
        assert!(drawing.entities[0].polyline.is_none());
        assert!(drawing.blocks[0].is_anonymous());
        assert!(!drawing.blocks[0].is_xref);
    }

    #[test]
    fn test_parse_drawing_invalid() {
        assert!(matches!(
            parse_drawing("[]").unwrap_err(),
            CadError::Json(_)
        ));
    }
}
