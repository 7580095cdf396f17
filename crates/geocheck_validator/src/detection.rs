//! Column auto-detection.
//!
//! Maps logical field names to dataset headers by matching a fixed, ordered list of
//! synonyms case-insensitively. The result is advisory: callers merge or override it
//! with explicit choices.

use geocheck_core::{ColumnMapping, DataSet, fields};
use std::collections::HashMap;

/// Header synonyms per logical field, in match priority order.
pub const COLUMN_SYNONYMS: [(&str, &[&str]); 12] = [
    (fields::PLZ, &["plz", "postleitzahl", "postal_code", "zip", "npa"]),
    (
        fields::ORT,
        &["ort", "stadt", "gemeinde", "city", "town", "locality", "ortschaft"],
    ),
    (
        fields::STRASSE,
        &["strasse", "street", "adresse", "address", "str", "rue"],
    ),
    (fields::HAUSNUMMER, &["hausnummer", "hausnr", "nr", "number", "no"]),
    (fields::KANTON, &["kanton", "kt", "canton", "state", "ct"]),
    (
        fields::EGID,
        &["egid", "gebäude_id", "building_id", "geb_id", "egid_edid"],
    ),
    (fields::EWID, &["ewid", "wohnung_id", "dwelling_id"]),
    (
        fields::EASTING,
        &[
            "e", "e_coord", "x", "x_coord", "easting", "lon", "longitude", "e_lv95",
            "koordinate_e",
        ],
    ),
    (
        fields::NORTHING,
        &[
            "n", "n_coord", "y", "y_coord", "northing", "lat", "latitude", "n_lv95",
            "koordinate_n",
        ],
    ),
    (fields::REGION, &["region", "gebiet", "zone", "area"]),
    (
        fields::PORTFOLIO,
        &["portfolio", "portfolio_typ", "kategorie", "type", "asset_type", "objekttyp"],
    ),
    (
        fields::RESPONSIBLE,
        &[
            "verantwortlich",
            "zuständig",
            "owner",
            "responsible",
            "bearbeiter",
            "sachbearbeiter",
        ],
    ),
];

/// Detects the logical → actual column mapping of a dataset.
///
/// Logical fields without a matching header are absent from the mapping. When two
/// headers differ only in case, the later one wins.
pub fn detect_columns(dataset: &DataSet) -> ColumnMapping {
    let lowered: HashMap<String, &str> = dataset
        .columns()
        .iter()
        .map(|column| (column.to_lowercase(), column.as_str()))
        .collect();

    COLUMN_SYNONYMS
        .iter()
        .filter_map(|(logical, synonyms)| {
            synonyms
                .iter()
                .find_map(|synonym| lowered.get(*synonym))
                .map(|actual| (logical.to_string(), actual.to_string()))
        })
        .collect()
}
