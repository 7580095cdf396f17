//! Logical column names.
//!
//! Rules address columns by these logical names; a [`ValidationConfig`](crate::ValidationConfig)
//! maps them onto the actual headers of a dataset. The names are part of the
//! configuration format and must stay stable.

/// Postal code (Postleitzahl).
pub const PLZ: &str = "plz";
/// City / locality.
pub const ORT: &str = "ort";
/// Street name.
pub const STRASSE: &str = "strasse";
/// House number.
pub const HAUSNUMMER: &str = "hausnummer";
/// Canton abbreviation.
pub const KANTON: &str = "kanton";
/// Federal building identifier.
pub const EGID: &str = "egid";
/// Federal dwelling identifier.
pub const EWID: &str = "ewid";
/// East coordinate (LV95 easting or WGS84 longitude).
pub const EASTING: &str = "easting";
/// North coordinate (LV95 northing or WGS84 latitude).
pub const NORTHING: &str = "northing";
/// Region dimension.
pub const REGION: &str = "region";
/// Portfolio dimension.
pub const PORTFOLIO: &str = "portfolio";
/// Responsible person dimension.
pub const RESPONSIBLE: &str = "responsible";

/// Sentinel column of findings that concern a whole row.
pub const WHOLE_ROW: &str = "(all)";
