//! Validation configuration loading.

use crate::{ParserError, Result, extension_of};
use geocheck_core::ValidationConfig;
use std::path::Path;
use tracing::debug;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a validation configuration from a YAML string.
///
/// # Example
///
/// ```rust
/// use geocheck_parser::parse_config_yaml;
///
/// let yaml = r#"
/// columns:
///   plz: PLZ
///   egid: Gebaeude_ID
/// options:
///   coordinate_system: LV95
/// "#;
///
/// let config = parse_config_yaml(yaml).unwrap();
/// assert_eq!(config.resolve_column("plz"), "PLZ");
/// ```
pub fn parse_config_yaml(content: &str) -> Result<ValidationConfig> {
    let config: ValidationConfig = serde_yaml_ng::from_str(content)?;
    Ok(config)
}

/// Parse a validation configuration from a TOML string.
pub fn parse_config_toml(content: &str) -> Result<ValidationConfig> {
    let config: ValidationConfig =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(config)
}

/// Parse a validation configuration from a JSON string.
pub fn parse_config_json(content: &str) -> Result<ValidationConfig> {
    let config: ValidationConfig = serde_json::from_str(content)?;
    Ok(config)
}

/// Detect the configuration format from a file path based on its extension.
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_config_format(path: &Path) -> Result<ConfigFormat> {
    match extension_of(path)?.as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        "json" => Ok(ConfigFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a validation configuration from a file with automatic format detection.
///
/// ```no_run
/// use geocheck_parser::load_config;
/// use std::path::Path;
///
/// let config = load_config(Path::new("geocheck.yml")).unwrap();
/// println!("{} column mappings", config.columns.len());
/// ```
pub fn load_config(path: &Path) -> Result<ValidationConfig> {
    let format = detect_config_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!("Loading {:?} configuration from {}", format, path.display());

    match format {
        ConfigFormat::Yaml => parse_config_yaml(&content),
        ConfigFormat::Toml => parse_config_toml(&content),
        ConfigFormat::Json => parse_config_json(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocheck_core::CoordinateSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_yaml_full() {
        let yaml = r#"
columns:
  plz: PLZ
  easting: E
  northing: N
options:
  coordinate_system: LV95
  duplicate_key_columns: [EGID]
  numeric_columns:
    - Flaeche
  max_area: 5000
rule_ids:
  - R-ADDR-02
  - R-COORD-02
dimension_columns:
  region: Region
"#;

        let config = parse_config_yaml(yaml).expect("Failed to parse valid YAML");

        assert_eq!(config.resolve_column("easting"), "E");
        assert_eq!(config.options.coordinate_system, CoordinateSystem::Lv95);
        assert_eq!(
            config.options.duplicate_key_columns,
            Some(vec!["EGID".to_string()])
        );
        assert_eq!(config.options.numeric_columns, vec!["Flaeche"]);
        assert_eq!(config.options.extra.get("max_area"), Some(&serde_json::json!(5000)));
        assert_eq!(config.selected_rule_ids().map(<[String]>::len), Some(2));
        assert_eq!(config.dimension_columns["region"], "Region");
    }

    #[test]
    fn test_parse_yaml_empty_document_defaults() {
        let config = parse_config_yaml("{}").unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.options.coordinate_system, CoordinateSystem::Auto);
    }

    #[test]
    fn test_parse_yaml_rejects_unknown_coordinate_system() {
        let result = parse_config_yaml("options:\n  coordinate_system: CH1903\n");
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
rule_ids = ["R-EGID-01"]

[columns]
egid = "Gebaeude_ID"

[options]
coordinate_system = "WGS84"
"#;

        let config = parse_config_toml(toml).expect("Failed to parse valid TOML");
        assert_eq!(config.resolve_column("egid"), "Gebaeude_ID");
        assert_eq!(config.options.coordinate_system, CoordinateSystem::Wgs84);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_toml("[[[invalid syntax");
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"columns": {"kanton": "KT"}, "rule_ids": []}"#;
        let config = parse_config_json(json).unwrap();
        assert_eq!(config.resolve_column("kanton"), "KT");
        assert_eq!(config.selected_rule_ids(), None);
    }

    #[test]
    fn test_detect_config_format() {
        assert_eq!(
            detect_config_format(Path::new("geocheck.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_config_format(Path::new("GEOCHECK.YAML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_config_format(Path::new("geocheck.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            detect_config_format(Path::new("geocheck.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            detect_config_format(Path::new("geocheck.ini")).unwrap_err(),
            ParserError::UnsupportedFormat(_)
        ));
        assert!(matches!(
            detect_config_format(Path::new("geocheck")).unwrap_err(),
            ParserError::InvalidExtension
        ));
    }
}
