//! CAD validation results.

use crate::drawing::round2;
use geocheck_core::Severity;
use serde::Serialize;
use std::collections::BTreeMap;

/// One finding about a drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CadFinding {
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    pub layer: Option<String>,
    pub entity_handle: Option<String>,
    /// Approximate position (x, y) of the offending entity
    pub location: Option<(f64, f64)>,
}

impl CadFinding {
    pub fn new(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_name: rule_name.into(),
            severity,
            message: message.into(),
            layer: None,
            entity_handle: None,
            location: None,
        }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    pub fn with_entity(mut self, handle: Option<String>, location: Option<(f64, f64)>) -> Self {
        self.entity_handle = handle;
        self.location = location;
        self
    }
}

/// Number of model space entities on one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerEntityCount {
    pub layer: String,
    pub count: usize,
}

/// Descriptive statistics collected while validating.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CadStatistics {
    /// Layers outside the standard (first 10)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub non_bbl_layers: Vec<String>,
    /// Set when more than one room polygon exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_overlap_check: Option<String>,
    pub block_count: usize,
    /// Named block definitions (first 20)
    pub blocks: Vec<String>,
    pub entity_counts: BTreeMap<String, usize>,
    pub total_entities: usize,
    /// Layers with the most entities (top 15)
    pub entities_per_layer: Vec<LayerEntityCount>,
}

/// Complete result of validating one drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CadValidationResult {
    pub filename: String,
    pub findings: Vec<CadFinding>,
    pub statistics: CadStatistics,
    /// Layer names, uppercased
    pub layers_found: Vec<String>,
    pub room_count: usize,
    /// Sum of room polygon areas in square drawing units
    pub total_area: f64,
}

/// Serializable summary of a [`CadValidationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CadSummary {
    pub filename: String,
    pub is_valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<CadFinding>,
    pub statistics: CadStatistics,
    pub layers_found: Vec<String>,
    pub room_count: usize,
    pub total_area: f64,
}

impl CadValidationResult {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// A drawing is valid when no finding has ERROR severity.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn summary(&self) -> CadSummary {
        CadSummary {
            filename: self.filename.clone(),
            is_valid: self.is_valid(),
            error_count: self.error_count(),
            warning_count: self.warning_count(),
            errors: self.findings.clone(),
            statistics: self.statistics.clone(),
            layers_found: self.layers_found.clone(),
            room_count: self.room_count,
            total_area: round2(self.total_area),
        }
    }
}
