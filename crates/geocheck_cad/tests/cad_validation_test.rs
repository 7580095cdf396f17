//! End-to-end validation of base plan drawings loaded from disk.

use geocheck_cad::{CadError, CadValidator, REQUIRED_LAYERS};
use geocheck_core::Severity;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn compliant_drawing() -> serde_json::Value {
    let layers: Vec<_> = REQUIRED_LAYERS
        .iter()
        .map(|spec| json!({"name": spec.name, "color": spec.color}))
        .collect();

    json!({
        "insunits": 6,
        "layouts": ["Model", "Plan A3"],
        "layers": layers,
        "entities": [
            {"type": "LWPOLYLINE", "layer": "BBL_RAUM_POLYGON", "handle": "1A",
             "polyline": {"closed": true, "points": [[0, 0], [5, 0], [5, 4], [0, 4]]}},
            {"type": "LWPOLYLINE", "layer": "BBL_RAUM_POLYGON", "handle": "1B",
             "polyline": {"closed": true, "points": [[5, 0], [8, 0], [8, 4], [5, 4]]}},
            {"type": "LINE", "layer": "BBL_WAND_TRAGEND"},
            {"type": "TEXT", "layer": "BBL_RAUM_NUMMER"}
        ],
        "blocks": [
            {"name": "BBL_PLANKOPF"},
            {"name": "BBL_NORDPFEIL"},
            {"name": "*Model_Space"}
        ]
    })
}

fn write_drawing(dir: &TempDir, name: &str, drawing: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, drawing.to_string()).expect("Failed to write drawing");
    path
}

#[test]
fn test_compliant_drawing_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = write_drawing(&dir, "eg.json", &compliant_drawing());

    let result = CadValidator::new().validate_file(&path).unwrap();

    assert!(result.findings.is_empty(), "{:?}", result.findings);
    assert!(result.is_valid());
    assert_eq!(result.filename, "eg.json");
    assert_eq!(result.room_count, 2);
    assert_eq!(result.total_area, 32.0);
    assert_eq!(result.layers_found.len(), 7);
    assert_eq!(result.statistics.total_entities, 4);
    assert_eq!(result.statistics.block_count, 2);
}

#[test]
fn test_defective_drawing() {
    let mut drawing = compliant_drawing();
    drawing["insunits"] = json!(4);
    drawing["entities"][0]["polyline"]["closed"] = json!(false);
    drawing["blocks"]
        .as_array_mut()
        .unwrap()
        .push(json!({"name": "Umgebung", "is_xref": true}));

    let result = CadValidator::new().validate(&serde_json::from_value(drawing).unwrap(), "og.dxf");

    let found: Vec<(&str, Severity)> = result
        .findings
        .iter()
        .map(|f| (f.rule_id.as_str(), f.severity))
        .collect();
    assert_eq!(
        found,
        vec![
            ("DWG-004", Severity::Warning),
            ("RPO-002", Severity::Error),
            ("DWG-010", Severity::Error),
        ]
    );
    assert_eq!(result.findings[1].entity_handle.as_deref(), Some("1A"));
    assert_eq!(result.findings[1].location, Some((2.5, 2.0)));

    let summary = serde_json::to_value(result.summary()).unwrap();
    assert_eq!(summary["is_valid"], false);
    assert_eq!(summary["error_count"], 2);
    assert_eq!(summary["warning_count"], 1);
}

#[test]
fn test_load_missing_drawing() {
    let dir = TempDir::new().unwrap();
    let err = CadValidator::new()
        .validate_file(&dir.path().join("absent.json"))
        .unwrap_err();
    assert!(matches!(err, CadError::Io { .. }));
}
