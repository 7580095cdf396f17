use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the geocheck binary
#[allow(deprecated)]
fn geocheck() -> Command {
    Command::cargo_bin("geocheck").expect("Failed to find geocheck binary")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_clean_dataset() {
    geocheck()
        .arg("validate")
        .arg(fixture_path("clean.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("Pass rate:      100.0%"));
}

#[test]
fn test_validate_reports_errors() {
    geocheck()
        .arg("validate")
        .arg(fixture_path("portfolio.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("R-ADDR-02"))
        .stdout(predicate::str::contains("R-ADDR-04"))
        .stdout(predicate::str::contains("Row 3"));
}

#[test]
fn test_validate_json_with_dimension() {
    let output = geocheck()
        .arg("validate")
        .arg(fixture_path("portfolio.csv"))
        .args(["--format", "json", "--dimension", "region=Region"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let summary = stdout_json(&output);
    assert_eq!(summary["total_rows"], 2);
    assert_eq!(summary["error_count"], 2);
    assert_eq!(summary["passed_rows"], 1);
    assert_eq!(summary["pass_rate"], 50.0);
    assert_eq!(summary["errors_by_category"]["address"], 2);
    assert_eq!(summary["by_region"]["Ost"]["errors"], 2);
    assert_eq!(summary["by_region"]["Mitte"]["errors"], 0);
}

#[test]
fn test_validate_rule_subset() {
    let output = geocheck()
        .arg("validate")
        .arg(fixture_path("portfolio.csv"))
        .args(["--rules", "R-ADDR-04", "--format", "json"])
        .output()
        .unwrap();

    let summary = stdout_json(&output);
    assert_eq!(summary["error_count"], 1);
    assert_eq!(summary["rules_executed"], serde_json::json!(["R-ADDR-04"]));
    assert_eq!(summary["errors"][0]["value"], "XX");
}

#[test]
fn test_validate_with_checker() {
    geocheck()
        .arg("validate")
        .arg(fixture_path("portfolio.csv"))
        .args(["--checker", "egid-checker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn test_validate_unknown_checker() {
    geocheck()
        .arg("validate")
        .arg(fixture_path("portfolio.csv"))
        .args(["--checker", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown checker"));
}

#[test]
fn test_validate_with_config() {
    let output = geocheck()
        .arg("validate")
        .arg(fixture_path("portfolio.csv"))
        .args(["--config", &fixture_path("postal_codes.yml"), "--format", "json"])
        .output()
        .unwrap();

    let summary = stdout_json(&output);
    assert_eq!(summary["error_count"], 1);
    assert_eq!(summary["errors"][0]["rule_id"], "R-ADDR-02");
    assert_eq!(summary["errors"][0]["display_row"], 3);
}

#[test]
fn test_validate_invalid_config() {
    geocheck()
        .arg("validate")
        .arg(fixture_path("portfolio.csv"))
        .args(["--config", &fixture_path("invalid_config.yml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_validate_invalid_dimension() {
    geocheck()
        .arg("validate")
        .arg(fixture_path("clean.csv"))
        .args(["--dimension", "region"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=COLUMN"));
}

#[test]
fn test_validate_with_options() {
    let output = geocheck()
        .arg("validate")
        .arg(fixture_path("clean.csv"))
        .args(["--option", "numeric_columns=Ort", "--rules", "R-GEN-03", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary = stdout_json(&output);
    assert_eq!(summary["warning_count"], 2);
    assert_eq!(summary["errors"][0]["column"], "Ort");
    assert_eq!(summary["errors"][1]["value"], "Zürich");
}

#[test]
fn test_validate_invalid_option_value() {
    geocheck()
        .arg("validate")
        .arg(fixture_path("clean.csv"))
        .args(["--option", "coordinate_system=2056"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for option 'coordinate_system'"));
}

#[test]
fn test_validate_missing_file() {
    geocheck()
        .arg("validate")
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_validate_json_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("buildings.json");
    fs::write(
        &data_path,
        r#"[
            {"EGID": 1001, "PLZ": "3003"},
            {"EGID": 1001, "PLZ": "3003"}
        ]"#,
    )
    .unwrap();

    let output = geocheck()
        .arg("validate")
        .arg(&data_path)
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary = stdout_json(&output);
    assert_eq!(summary["error_count"], 0);
    assert_eq!(summary["errors_by_rule"]["R-EGID-02"], 1);
    assert_eq!(summary["errors_by_rule"]["R-GEN-01"], 1);
}

// ============================================================================
// rules / checkers / detect command tests
// ============================================================================

#[test]
fn test_rules_catalogue() {
    geocheck()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("R-ADDR-01"))
        .stdout(predicate::str::contains("R-GEN-04"))
        .stdout(predicate::str::contains("14 rules"));
}

#[test]
fn test_rules_by_category() {
    let output = geocheck()
        .args(["rules", "--category", "egid", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let rules = stdout_json(&output);
    let ids: Vec<&str> = rules
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["R-EGID-01", "R-EGID-02", "R-EGID-03"]);
}

#[test]
fn test_rules_unknown_category() {
    geocheck()
        .args(["rules", "--category", "roofs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_layers() {
    geocheck()
        .arg("layers")
        .assert()
        .success()
        .stdout(predicate::str::contains("BBL_RAUM_POLYGON"))
        .stdout(predicate::str::contains("BBL_NORDPFEIL"));
}

#[test]
fn test_layers_json() {
    let output = geocheck().args(["layers", "--format", "json"]).output().unwrap();

    assert!(output.status.success());
    let layers = stdout_json(&output);
    assert_eq!(layers["required"].as_array().unwrap().len(), 7);
    assert_eq!(layers["optional"].as_array().unwrap().len(), 16);
}

#[test]
fn test_checkers() {
    geocheck()
        .arg("checkers")
        .assert()
        .success()
        .stdout(predicate::str::contains("address-checker"))
        .stdout(predicate::str::contains("full-checker"))
        .stdout(predicate::str::contains("Rules: all"));
}

#[test]
fn test_detect_columns() {
    let output = geocheck()
        .arg("detect")
        .arg(fixture_path("portfolio.csv"))
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let profile = stdout_json(&output);
    assert_eq!(profile["rows"], 2);
    assert_eq!(profile["detected_columns"]["plz"], "PLZ");
    assert_eq!(profile["detected_columns"]["easting"], "E");
    assert_eq!(profile["columns"][0]["sample_values"], serde_json::json!(["3003", "800"]));
    assert_eq!(profile["columns"][7]["detected_as"], "region");
}

// ============================================================================
// cad command tests
// ============================================================================

#[test]
fn test_cad_valid_plan() {
    geocheck()
        .arg("cad")
        .arg(fixture_path("plan.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("30.00 m²"));
}

#[test]
fn test_cad_missing_room_polygons() {
    let temp_dir = TempDir::new().unwrap();
    let drawing_path = temp_dir.path().join("og.json");
    fs::write(&drawing_path, r#"{"insunits": 6, "layouts": ["Model", "A3"]}"#).unwrap();

    let output = geocheck()
        .arg("cad")
        .arg(&drawing_path)
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let summary = stdout_json(&output);
    assert_eq!(summary["is_valid"], false);
    assert_eq!(summary["filename"], "og.json");
    assert!(
        summary["errors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["rule_id"] == "RPO-001")
    );
}

#[test]
fn test_cad_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let drawing_path = temp_dir.path().join("broken.json");
    fs::write(&drawing_path, "not json").unwrap();

    geocheck()
        .arg("cad")
        .arg(&drawing_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load drawing"));
}
