//! Coordinate validation rules for the Swiss coordinate systems (LV95, WGS84).

use crate::{Rule, RuleResult};
use geocheck_core::{
    Category, CoordinateSystem, DataSet, Finding, RuleMetadata, Severity, ValidationConfig,
    fields, format_float,
};

/// Inclusive bounding box of Switzerland in one coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub e_min: f64,
    pub e_max: f64,
    pub n_min: f64,
    pub n_max: f64,
}

impl Bounds {
    fn contains_easting(&self, e: f64) -> bool {
        (self.e_min..=self.e_max).contains(&e)
    }

    fn contains_northing(&self, n: f64) -> bool {
        (self.n_min..=self.n_max).contains(&n)
    }
}

/// Switzerland in LV95 (metres).
pub const CH_BOUNDS_LV95: Bounds = Bounds {
    e_min: 2_485_000.0,
    e_max: 2_834_000.0,
    n_min: 1_075_000.0,
    n_max: 1_296_000.0,
};

/// Switzerland in WGS84 (longitude / latitude).
pub const CH_BOUNDS_WGS84: Bounds = Bounds {
    e_min: 5.9,
    e_max: 10.5,
    n_min: 45.8,
    n_max: 47.9,
};

/// Guesses the coordinate system from the value ranges.
///
/// Returns `None` when the pair fits neither LV95 nor WGS84.
pub fn detect_coordinate_system(e: f64, n: f64) -> Option<CoordinateSystem> {
    if e > 2_000_000.0 && e < 3_000_000.0 && n > 1_000_000.0 && n < 2_000_000.0 {
        Some(CoordinateSystem::Lv95)
    } else if e > 5.0 && e < 11.0 && n > 45.0 && n < 48.0 {
        Some(CoordinateSystem::Wgs84)
    } else {
        None
    }
}

fn pair_column(e_col: &str, n_col: &str) -> String {
    format!("{e_col}/{n_col}")
}

fn pair_text(e: &str, n: &str) -> String {
    format!("E={e}, N={n}")
}

/// Resolves both coordinate columns, or neither.
fn coordinate_columns<'d, R: Rule + ?Sized>(
    rule: &R,
    dataset: &'d DataSet,
    config: &ValidationConfig,
) -> Option<(&'d str, &'d str)> {
    let e_col = rule.get_column(dataset, config, fields::EASTING)?;
    let n_col = rule.get_column(dataset, config, fields::NORTHING)?;
    Some((e_col, n_col))
}

/// Checks that a row does not carry only one of the two coordinates.
pub struct CoordinatePresenceRule {
    metadata: RuleMetadata,
}

impl CoordinatePresenceRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-COORD-01", Category::Coordinates, Severity::Warning)
                .with_name("Coordinate Presence", "Koordinaten vorhanden")
                .with_description(
                    "Checks that both E and N coordinates are provided",
                    "Prüft, ob E- und N-Koordinaten vorhanden sind",
                )
                .with_required_columns(&[fields::EASTING, fields::NORTHING])
                .with_examples("E: 2600000, N: 1200000", "E: 2600000, N: (empty)"),
        }
    }
}

impl Default for CoordinatePresenceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for CoordinatePresenceRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some((e_col, n_col)) = coordinate_columns(self, dataset, config) else {
            return Ok(Vec::new());
        };

        let mut findings = Vec::new();
        for idx in 0..dataset.len() {
            let e_missing = dataset.value(idx, e_col).is_blank();
            let n_missing = dataset.value(idx, n_col).is_blank();

            match (e_missing, n_missing) {
                (true, false) => findings.push(Finding::new(
                    &self.metadata,
                    idx,
                    e_col,
                    "E coordinate is missing (N coordinate present)",
                )),
                (false, true) => findings.push(Finding::new(
                    &self.metadata,
                    idx,
                    n_col,
                    "N coordinate is missing (E coordinate present)",
                )),
                _ => {}
            }
        }

        Ok(findings)
    }
}

/// Checks that coordinates fall within Switzerland.
pub struct SwissBoundsRule {
    metadata: RuleMetadata,
}

impl SwissBoundsRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-COORD-02", Category::Coordinates, Severity::Error)
                .with_name("Swiss Bounds Check", "Schweizer Grenzen")
                .with_description(
                    "Coordinates must fall within Switzerland's boundaries",
                    "Koordinaten müssen innerhalb der Schweizer Grenzen liegen",
                )
                .with_required_columns(&[fields::EASTING, fields::NORTHING])
                .with_examples(
                    "E: 2600000, N: 1200000 (Bern, LV95)",
                    "E: 1000000, N: 500000 (outside CH)",
                ),
        }
    }

    fn check_bounds(
        &self,
        findings: &mut Vec<Finding>,
        idx: usize,
        (e_col, n_col): (&str, &str),
        (e, n): (f64, f64),
        system: CoordinateSystem,
    ) {
        let (bounds, e_label, n_label) = match system {
            CoordinateSystem::Wgs84 => (CH_BOUNDS_WGS84, "Longitude", "Latitude"),
            _ => (CH_BOUNDS_LV95, "E coordinate", "N coordinate"),
        };

        if !bounds.contains_easting(e) {
            findings.push(
                Finding::new(
                    &self.metadata,
                    idx,
                    e_col,
                    format!(
                        "{e_label} outside Switzerland: {} ({system}: {}-{})",
                        format_float(e),
                        bounds.e_min,
                        bounds.e_max
                    ),
                )
                .with_value(format_float(e)),
            );
        }
        if !bounds.contains_northing(n) {
            findings.push(
                Finding::new(
                    &self.metadata,
                    idx,
                    n_col,
                    format!(
                        "{n_label} outside Switzerland: {} ({system}: {}-{})",
                        format_float(n),
                        bounds.n_min,
                        bounds.n_max
                    ),
                )
                .with_value(format_float(n)),
            );
        }
    }
}

impl Default for SwissBoundsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SwissBoundsRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some((e_col, n_col)) = coordinate_columns(self, dataset, config) else {
            return Ok(Vec::new());
        };
        let forced = config.options.coordinate_system;

        let mut findings = Vec::new();
        for idx in 0..dataset.len() {
            let e_val = dataset.value(idx, e_col);
            let n_val = dataset.value(idx, n_col);
            if e_val.is_missing() || n_val.is_missing() {
                continue;
            }

            let (Some(e), Some(n)) = (e_val.as_float(), n_val.as_float()) else {
                let text = pair_text(&e_val.to_text(), &n_val.to_text());
                findings.push(
                    Finding::new(
                        &self.metadata,
                        idx,
                        pair_column(e_col, n_col),
                        format!("Invalid coordinate values: {text}"),
                    )
                    .with_value(text),
                );
                continue;
            };

            let system = match forced {
                CoordinateSystem::Auto => match detect_coordinate_system(e, n) {
                    Some(system) => system,
                    None => {
                        let text = pair_text(&format_float(e), &format_float(n));
                        findings.push(
                            Finding::new(
                                &self.metadata,
                                idx,
                                pair_column(e_col, n_col),
                                format!("Coordinate system not recognizable: {text}"),
                            )
                            .with_value(text),
                        );
                        continue;
                    }
                },
                system => system,
            };

            self.check_bounds(&mut findings, idx, (e_col, n_col), (e, n), system);
        }

        Ok(findings)
    }
}

/// Flags LV95 coordinates that look rounded to whole kilometres.
pub struct CoordinatePrecisionRule {
    metadata: RuleMetadata,
}

impl CoordinatePrecisionRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata::new("R-COORD-04", Category::Coordinates, Severity::Warning)
                .with_name("Coordinate Precision", "Koordinaten-Präzision")
                .with_description(
                    "Checks that coordinates have appropriate precision for building location",
                    "Prüft, ob Koordinaten ausreichende Präzision für Gebäudestandort haben",
                )
                .with_required_columns(&[fields::EASTING, fields::NORTHING])
                .with_examples(
                    "E: 2600123.45, N: 1200456.78",
                    "E: 2600000, N: 1200000 (too round)",
                ),
        }
    }
}

impl Default for CoordinatePrecisionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for CoordinatePrecisionRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn validate(&self, dataset: &DataSet, config: &ValidationConfig) -> RuleResult {
        let Some((e_col, n_col)) = coordinate_columns(self, dataset, config) else {
            return Ok(Vec::new());
        };

        let mut findings = Vec::new();
        for idx in 0..dataset.len() {
            let e_val = dataset.value(idx, e_col);
            let n_val = dataset.value(idx, n_col);
            if e_val.is_missing() || n_val.is_missing() {
                continue;
            }
            // Unparseable values are reported by the bounds check.
            let (Some(e), Some(n)) = (e_val.as_float(), n_val.as_float()) else {
                continue;
            };

            // Always detected, a forced system does not apply here.
            if detect_coordinate_system(e, n) != Some(CoordinateSystem::Lv95) {
                continue;
            }

            if e % 1000.0 == 0.0 && n % 1000.0 == 0.0 {
                let text = pair_text(&format_float(e), &format_float(n));
                findings.push(
                    Finding::new(
                        &self.metadata,
                        idx,
                        pair_column(e_col, n_col),
                        format!("Coordinates unusually round (to 1000m): {text}"),
                    )
                    .with_value(text)
                    .with_suggestion("Coordinates may be imprecise or rounded"),
                );
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocheck_core::DataValue;
    use pretty_assertions::assert_eq;

    fn coordinates(pairs: Vec<(DataValue, DataValue)>) -> DataSet {
        DataSet::from_records(
            ["E", "N"],
            pairs.into_iter().map(|(e, n)| vec![e, n]).collect(),
        )
    }

    fn mapped() -> ValidationConfig {
        ValidationConfig::new()
            .with_column(fields::EASTING, "E")
            .with_column(fields::NORTHING, "N")
    }

    #[test]
    fn test_detect_coordinate_system() {
        assert_eq!(
            detect_coordinate_system(2_600_000.0, 1_200_000.0),
            Some(CoordinateSystem::Lv95)
        );
        assert_eq!(
            detect_coordinate_system(8.5417, 47.3769),
            Some(CoordinateSystem::Wgs84)
        );
        assert_eq!(detect_coordinate_system(1_000_000.0, 500_000.0), None);
        // Range ends are exclusive.
        assert_eq!(detect_coordinate_system(2_000_000.0, 1_200_000.0), None);
    }

    #[test]
    fn test_presence_flags_half_filled_rows() {
        let dataset = coordinates(vec![
            (DataValue::Float(2_600_000.0), DataValue::Float(1_200_000.0)),
            (DataValue::Float(2_600_000.0), DataValue::Null),
            (" ".into(), DataValue::Float(1_200_000.0)),
            (DataValue::Null, DataValue::Null),
        ]);

        let findings = CoordinatePresenceRule::new()
            .validate(&dataset, &mapped())
            .unwrap();

        assert_eq!(findings.len(), 2);
        assert_eq!((findings[0].row_index, findings[0].column.as_str()), (1, "N"));
        assert_eq!((findings[1].row_index, findings[1].column.as_str()), (2, "E"));
        assert!(findings.iter().all(|f| f.value.is_none()));
    }

    #[test]
    fn test_bounds_lv95() {
        let dataset = coordinates(vec![
            (DataValue::Float(2_600_000.0), DataValue::Float(1_200_000.0)),
            (DataValue::Float(2_900_000.0), DataValue::Float(1_200_000.0)),
            (DataValue::Float(2_900_000.0), DataValue::Float(1_900_000.0)),
        ]);

        let findings = SwissBoundsRule::new().validate(&dataset, &mapped()).unwrap();

        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].row_index, 1);
        assert_eq!(findings[0].column, "E");
        assert_eq!(findings[0].value.as_deref(), Some("2900000.0"));
        assert_eq!(
            findings[0].message,
            "E coordinate outside Switzerland: 2900000.0 (LV95: 2485000-2834000)"
        );
        assert_eq!(findings[2].column, "N");
    }

    #[test]
    fn test_bounds_wgs84() {
        let dataset = coordinates(vec![
            (DataValue::Float(8.5417), DataValue::Float(47.3769)),
            (DataValue::Float(5.5), DataValue::Float(47.0)),
        ]);

        let findings = SwissBoundsRule::new().validate(&dataset, &mapped()).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].row_index, 1);
        assert!(findings[0].message.starts_with("Longitude outside Switzerland: 5.5"));
    }

    #[test]
    fn test_bounds_undetectable_system() {
        let dataset = coordinates(vec![(
            DataValue::Float(1_000_000.0),
            DataValue::Float(500_000.0),
        )]);

        let findings = SwissBoundsRule::new().validate(&dataset, &mapped()).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, "E/N");
        assert_eq!(findings[0].value.as_deref(), Some("E=1000000.0, N=500000.0"));
    }

    #[test]
    fn test_bounds_forced_system() {
        // Outside both detection ranges, but checked directly against LV95.
        let dataset = coordinates(vec![(
            DataValue::Float(1_000_000.0),
            DataValue::Float(500_000.0),
        )]);
        let config = mapped().with_coordinate_system(CoordinateSystem::Lv95);

        let findings = SwissBoundsRule::new().validate(&dataset, &config).unwrap();

        let columns: Vec<_> = findings.iter().map(|f| f.column.as_str()).collect();
        assert_eq!(columns, vec!["E", "N"]);
    }

    #[test]
    fn test_bounds_unparseable_values() {
        let dataset = coordinates(vec![
            ("abc".into(), DataValue::Float(1_200_000.0)),
            (DataValue::Null, "xyz".into()),
        ]);

        let findings = SwissBoundsRule::new().validate(&dataset, &mapped()).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, "E/N");
        assert_eq!(findings[0].value.as_deref(), Some("E=abc, N=1200000.0"));
    }

    #[test]
    fn test_precision_flags_round_lv95() {
        let dataset = coordinates(vec![
            (DataValue::Float(2_600_000.0), DataValue::Float(1_200_000.0)),
            (DataValue::Float(2_600_123.45), DataValue::Float(1_200_456.78)),
            (DataValue::Float(2_600_000.0), DataValue::Float(1_200_500.0)),
            (DataValue::Float(8.0), DataValue::Float(47.0)),
        ]);

        let findings = CoordinatePrecisionRule::new()
            .validate(&dataset, &mapped())
            .unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].row_index, 0);
        assert_eq!(
            findings[0].suggestion.as_deref(),
            Some("Coordinates may be imprecise or rounded")
        );
    }
}
