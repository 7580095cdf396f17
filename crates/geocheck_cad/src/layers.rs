//! The CAFM base plan layer standard.

use serde::Serialize;

/// One layer of the standard: name, AutoCAD color index and purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub name: &'static str,
    pub color: i32,
    pub description: &'static str,
    /// A missing mandatory layer is an error, any other missing layer a warning
    pub mandatory: bool,
}

const fn spec(name: &'static str, color: i32, description: &'static str) -> LayerSpec {
    LayerSpec {
        name,
        color,
        description,
        mandatory: false,
    }
}

/// Layer holding the room polygons.
pub const ROOM_POLYGON_LAYER: &str = "BBL_RAUM_POLYGON";

/// Layers every base plan is checked for.
pub const REQUIRED_LAYERS: [LayerSpec; 7] = [
    // Construction
    spec("BBL_WAND_TRAGEND", 1, "Load-bearing walls"),
    spec("BBL_WAND_NICHTTRAGEND", 3, "Non-load-bearing walls"),
    spec("BBL_FASSADE", 2, "Facade line"),
    // Openings
    spec("BBL_TUER", 6, "Doors"),
    spec("BBL_FENSTER", 5, "Windows"),
    // Rooms
    LayerSpec {
        name: ROOM_POLYGON_LAYER,
        color: 30,
        description: "Room polygons",
        mandatory: true,
    },
    spec("BBL_RAUM_NUMMER", 7, "Room numbers"),
];

/// Layers of the standard that are not checked for presence.
pub const OPTIONAL_LAYERS: [LayerSpec; 16] = [
    spec("BBL_WAND_GLAS", 4, "Glass walls"),
    spec("BBL_STUETZE", 1, "Columns"),
    spec("BBL_DECKE", 8, "Ceiling openings"),
    spec("BBL_TOR", 6, "Gates"),
    spec("BBL_RAUM_BEZEICHNUNG", 7, "Room names"),
    spec("BBL_RAUM_FLAECHE", 7, "Area labels"),
    spec("BBL_SANITAER", 160, "Sanitary fixtures"),
    spec("BBL_HEIZUNG", 10, "Radiators"),
    spec("BBL_LUEFTUNG", 130, "Ventilation outlets"),
    spec("BBL_ELEKTRO", 40, "Electrical connections"),
    spec("BBL_MOEBEL_FEST", 8, "Fixed furniture"),
    spec("BBL_MOEBEL_LOSE", 9, "Loose furniture"),
    spec("BBL_TEXT", 7, "Labels"),
    spec("BBL_MASSLINIE", 7, "Dimension lines"),
    spec("BBL_ACHSE", 1, "Axes"),
    spec("BBL_NORDPFEIL", 7, "North arrow"),
];

/// The layer catalogue for documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerRequirements {
    pub required: Vec<LayerSpec>,
    pub optional: Vec<LayerSpec>,
}

pub fn layer_requirements() -> LayerRequirements {
    LayerRequirements {
        required: REQUIRED_LAYERS.to_vec(),
        optional: OPTIONAL_LAYERS.to_vec(),
    }
}
