//! Base plan validation.

use crate::drawing::{Drawing, Entity, LWPOLYLINE, MODEL_LAYOUT, UNITS_METERS, load_drawing};
use crate::layers::{REQUIRED_LAYERS, ROOM_POLYGON_LAYER};
use crate::result::{CadFinding, CadValidationResult, LayerEntityCount};
use crate::Result;
use geocheck_core::Severity;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Rooms smaller than this (in square metres) are reported.
pub const MIN_ROOM_AREA: f64 = 1.0;

const MAX_NON_BBL_LAYERS: usize = 10;
const MAX_LISTED_BLOCKS: usize = 20;
const MAX_LAYER_COUNTS: usize = 15;

/// Validates drawings against the base plan standard.
#[derive(Debug, Clone, Copy, Default)]
pub struct CadValidator;

impl CadValidator {
    pub fn new() -> Self {
        Self
    }

    /// Load a drawing from disk and validate it.
    pub fn validate_file(&self, path: &Path) -> Result<CadValidationResult> {
        info!("Validating drawing {}", path.display());
        let drawing = load_drawing(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.validate(&drawing, filename))
    }

    /// Run every check against `drawing`.
    pub fn validate(&self, drawing: &Drawing, filename: impl Into<String>) -> CadValidationResult {
        let mut result = CadValidationResult::new(filename);

        check_setup(drawing, &mut result);
        check_layers(drawing, &mut result);
        check_room_polygons(drawing, &mut result);
        check_blocks(drawing, &mut result);
        check_xrefs(drawing, &mut result);
        collect_statistics(drawing, &mut result);

        info!(
            "Drawing {}: {} errors, {} warnings, {} rooms",
            result.filename,
            result.error_count(),
            result.warning_count(),
            result.room_count
        );
        result
    }
}

fn check_setup(drawing: &Drawing, result: &mut CadValidationResult) {
    if drawing.insunits != UNITS_METERS {
        result.findings.push(CadFinding::new(
            "DWG-004",
            "Units",
            Severity::Warning,
            format!(
                "Drawing units are not set to metres (INSUNITS={})",
                drawing.insunits
            ),
        ));
    }

    if !drawing.layouts.iter().any(|name| name != MODEL_LAYOUT) {
        result.findings.push(CadFinding::new(
            "DWG-013",
            "Layout",
            Severity::Warning,
            "No layout tab present (model space only)",
        ));
    }
}

/// Rule id for a layer: `LAY-` plus the last three characters of its name.
fn layer_rule_id(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(3)..].iter().collect();
    format!("LAY-{}", tail)
}

fn check_layers(drawing: &Drawing, result: &mut CadValidationResult) {
    // Uppercased name -> color; a later duplicate overrides the color, not the position
    let mut existing: Vec<(String, i32)> = Vec::new();
    for layer in &drawing.layers {
        let upper = layer.name.to_uppercase();
        match existing.iter_mut().find(|(name, _)| *name == upper) {
            Some(entry) => entry.1 = layer.color,
            None => existing.push((upper, layer.color)),
        }
    }

    for spec in &REQUIRED_LAYERS {
        match existing.iter().find(|(name, _)| name == spec.name) {
            None => {
                let severity = if spec.mandatory {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                result.findings.push(
                    CadFinding::new(
                        layer_rule_id(spec.name),
                        "Layer Structure",
                        severity,
                        format!("Required layer missing: {} ({})", spec.name, spec.description),
                    )
                    .with_layer(spec.name),
                );
            }
            Some((_, color)) if *color != spec.color => {
                result.findings.push(
                    CadFinding::new(
                        layer_rule_id(spec.name),
                        "Layer Color",
                        Severity::Warning,
                        format!(
                            "Layer {} has wrong color: {} (expected: {})",
                            spec.name, color, spec.color
                        ),
                    )
                    .with_layer(spec.name),
                );
            }
            Some(_) => {}
        }
    }

    result.statistics.non_bbl_layers = existing
        .iter()
        .map(|(name, _)| name)
        .filter(|name| !name.starts_with("BBL_") && *name != "0" && *name != "DEFPOINTS")
        .take(MAX_NON_BBL_LAYERS)
        .cloned()
        .collect();
    result.layers_found = existing.into_iter().map(|(name, _)| name).collect();
}

fn is_room_polygon(entity: &Entity) -> bool {
    entity.entity_type.eq_ignore_ascii_case(LWPOLYLINE)
        && entity.layer.eq_ignore_ascii_case(ROOM_POLYGON_LAYER)
}

fn check_room_polygons(drawing: &Drawing, result: &mut CadValidationResult) {
    let rooms: Vec<&Entity> = drawing.entities.iter().filter(|e| is_room_polygon(e)).collect();

    if rooms.is_empty() {
        result.findings.push(
            CadFinding::new(
                "RPO-001",
                "Room Polygons",
                Severity::Error,
                format!("No room polygons found on layer {}", ROOM_POLYGON_LAYER),
            )
            .with_layer(ROOM_POLYGON_LAYER),
        );
        return;
    }

    result.room_count = rooms.len();
    let mut total_area = 0.0;

    for room in &rooms {
        let polyline = room.polyline.clone().unwrap_or_default();
        let centroid = polyline.centroid();

        if !polyline.closed {
            result.findings.push(
                CadFinding::new(
                    "RPO-002",
                    "Room Polygon Closed",
                    Severity::Error,
                    "Room polygon is not closed",
                )
                .with_layer(ROOM_POLYGON_LAYER)
                .with_entity(room.handle.clone(), centroid),
            );
        }

        let area = polyline.area();
        total_area += area;
        if area < MIN_ROOM_AREA {
            result.findings.push(
                CadFinding::new(
                    "RPO-005",
                    "Room Polygon Minimum Area",
                    Severity::Warning,
                    format!("Room polygon has a very small area: {:.2} m²", area),
                )
                .with_layer(ROOM_POLYGON_LAYER)
                .with_entity(room.handle.clone(), centroid),
            );
        }
    }

    result.total_area = total_area;
    debug!("{} room polygons, total area {:.2}", rooms.len(), total_area);

    if rooms.len() > 1 {
        // Overlaps are not computed
        result.statistics.room_overlap_check =
            Some("Simplified check, manual review recommended".to_string());
    }
}

fn check_blocks(drawing: &Drawing, result: &mut CadValidationResult) {
    let names: Vec<String> = drawing
        .blocks
        .iter()
        .filter(|block| !block.is_anonymous())
        .map(|block| block.name.to_uppercase())
        .collect();

    let has_title_block = names
        .iter()
        .any(|name| name.contains("PLANKOPF") || name.contains("TITLEBLOCK"));
    if !has_title_block {
        result.findings.push(CadFinding::new(
            "BLK-004",
            "Title Block",
            Severity::Warning,
            "No title block found (BBL_PLANKOPF)",
        ));
    }

    let has_north_arrow = names
        .iter()
        .any(|name| name.contains("NORD") || name.contains("NORTH"));
    if !has_north_arrow {
        result.findings.push(CadFinding::new(
            "BLK-003",
            "North Arrow",
            Severity::Warning,
            "No north arrow block found (BBL_NORDPFEIL)",
        ));
    }

    result.statistics.block_count = names.len();
    result.statistics.blocks = names.into_iter().take(MAX_LISTED_BLOCKS).collect();
}

fn check_xrefs(drawing: &Drawing, result: &mut CadValidationResult) {
    let xrefs: Vec<&str> = drawing
        .blocks
        .iter()
        .filter(|block| block.is_xref)
        .map(|block| block.name.as_str())
        .collect();

    if !xrefs.is_empty() {
        result.findings.push(CadFinding::new(
            "DWG-010",
            "External References",
            Severity::Error,
            format!(
                "External references found: {}. XREFs must be bound.",
                xrefs.join(", ")
            ),
        ));
    }
}

fn collect_statistics(drawing: &Drawing, result: &mut CadValidationResult) {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_layer: Vec<LayerEntityCount> = Vec::new();

    for entity in &drawing.entities {
        *by_type.entry(entity.entity_type.clone()).or_default() += 1;
        match by_layer.iter_mut().find(|c| c.layer == entity.layer) {
            Some(count) => count.count += 1,
            None => by_layer.push(LayerEntityCount {
                layer: entity.layer.clone(),
                count: 1,
            }),
        }
    }

    // Stable sort keeps first-seen order among equal counts
    by_layer.sort_by(|a, b| b.count.cmp(&a.count));
    by_layer.truncate(MAX_LAYER_COUNTS);

    result.statistics.total_entities = drawing.entities.len();
    result.statistics.entity_counts = by_type;
    result.statistics.entities_per_layer = by_layer;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Block, Layer, Polyline};
    use pretty_assertions::assert_eq;

    fn layer(name: &str, color: i32) -> Layer {
        Layer {
            name: name.to_string(),
            color,
        }
    }

    fn room(handle: &str, closed: bool, side: f64) -> Entity {
        Entity {
            entity_type: LWPOLYLINE.to_string(),
            layer: ROOM_POLYGON_LAYER.to_string(),
            handle: Some(handle.to_string()),
            polyline: Some(Polyline {
                closed,
                points: vec![[0.0, 0.0], [side, 0.0], [side, side], [0.0, side]],
            }),
        }
    }

    fn ids(result: &CadValidationResult) -> Vec<&str> {
        result.findings.iter().map(|f| f.rule_id.as_str()).collect()
    }

    #[test]
    fn test_layer_rule_id() {
        assert_eq!(layer_rule_id("BBL_RAUM_POLYGON"), "LAY-GON");
        assert_eq!(layer_rule_id("AB"), "LAY-AB");
    }

    #[test]
    fn test_empty_drawing() {
        let result = CadValidator::new().validate(&Drawing::default(), "empty.dxf");

        assert_eq!(
            ids(&result),
            vec![
                "DWG-004", "DWG-013", "LAY-END", "LAY-END", "LAY-ADE", "LAY-UER", "LAY-TER",
                "LAY-GON", "LAY-MER", "RPO-001", "BLK-004", "BLK-003",
            ]
        );
        assert_eq!(result.error_count(), 2);
        assert!(!result.is_valid());
        assert_eq!(result.room_count, 0);
    }

    #[test]
    fn test_layers_case_insensitive_and_color() {
        let drawing = Drawing {
            layers: vec![
                layer("bbl_raum_polygon", 30),
                layer("BBL_TUER", 1),
                layer("Walls", 7),
                layer("0", 7),
                layer("Defpoints", 7),
            ],
            ..Drawing::default()
        };
        let mut result = CadValidationResult::new("plan.dxf");
        check_layers(&drawing, &mut result);

        assert!(!result.findings.iter().any(|f| f.rule_id == "LAY-GON"));
        let color = result
            .findings
            .iter()
            .find(|f| f.rule_name == "Layer Color")
            .unwrap();
        assert_eq!(color.message, "Layer BBL_TUER has wrong color: 1 (expected: 6)");
        assert_eq!(color.severity, Severity::Warning);
        assert_eq!(result.statistics.non_bbl_layers, vec!["WALLS"]);
        assert_eq!(
            result.layers_found,
            vec!["BBL_RAUM_POLYGON", "BBL_TUER", "WALLS", "0", "DEFPOINTS"]
        );
    }

    #[test]
    fn test_room_polygons() {
        let drawing = Drawing {
            entities: vec![room("A1", true, 4.0), room("A2", false, 0.5)],
            ..Drawing::default()
        };
        let mut result = CadValidationResult::new("plan.dxf");
        check_room_polygons(&drawing, &mut result);

        assert_eq!(ids(&result), vec!["RPO-002", "RPO-005"]);
        assert_eq!(result.findings[0].entity_handle.as_deref(), Some("A2"));
        assert_eq!(result.findings[0].location, Some((0.25, 0.25)));
        assert_eq!(
            result.findings[1].message,
            "Room polygon has a very small area: 0.25 m²"
        );
        assert_eq!(result.room_count, 2);
        assert_eq!(result.total_area, 16.25);
        assert!(result.statistics.room_overlap_check.is_some());
    }

    #[test]
    fn test_blocks_and_xrefs() {
        let drawing = Drawing {
            blocks: vec![
                Block {
                    name: "bbl_plankopf".to_string(),
                    is_xref: false,
                },
                Block {
                    name: "*U7".to_string(),
                    is_xref: false,
                },
                Block {
                    name: "Site".to_string(),
                    is_xref: true,
                },
            ],
            ..Drawing::default()
        };
        let mut result = CadValidationResult::new("plan.dxf");
        check_blocks(&drawing, &mut result);
        check_xrefs(&drawing, &mut result);

        assert_eq!(ids(&result), vec!["BLK-003", "DWG-010"]);
        assert_eq!(
            result.findings[1].message,
            "External references found: Site. XREFs must be bound."
        );
        assert_eq!(result.statistics.block_count, 2);
        assert_eq!(result.statistics.blocks, vec!["BBL_PLANKOPF", "SITE"]);
    }

    #[test]
    fn test_statistics_top_layers() {
        let entity = |kind: &str, layer: &str| Entity {
            entity_type: kind.to_string(),
            layer: layer.to_string(),
            handle: None,
            polyline: None,
        };
        let drawing = Drawing {
            entities: vec![
                entity("LINE", "A"),
                entity("TEXT", "B"),
                entity("LINE", "B"),
                entity("LINE", "C"),
            ],
            ..Drawing::default()
        };
        let mut result = CadValidationResult::new("plan.dxf");
        collect_statistics(&drawing, &mut result);

        assert_eq!(result.statistics.total_entities, 4);
        assert_eq!(result.statistics.entity_counts["LINE"], 3);
        let layers: Vec<(&str, usize)> = result
            .statistics
            .entities_per_layer
            .iter()
            .map(|c| (c.layer.as_str(), c.count))
            .collect();
        assert_eq!(layers, vec![("B", 2), ("A", 1), ("C", 1)]);
    }
}
