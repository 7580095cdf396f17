//! Built-in validation rules, organized by category.

mod address;
mod coordinates;
mod egid;
mod general;

pub use address::*;
pub use coordinates::*;
pub use egid::*;
pub use general::*;

use crate::Rule;

/// Creates one instance of every built-in rule, in registration order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        // Address
        Box::new(RequiredFieldsRule::new()),
        Box::new(PostalCodeFormatRule::new()),
        Box::new(CantonRule::new()),
        Box::new(StreetFormatRule::new()),
        // Coordinates
        Box::new(CoordinatePresenceRule::new()),
        Box::new(SwissBoundsRule::new()),
        Box::new(CoordinatePrecisionRule::new()),
        // EGID
        Box::new(EgidFormatRule::new()),
        Box::new(EgidUniquenessRule::new()),
        Box::new(EgidPresenceRule::new()),
        // General
        Box::new(DuplicateRowsRule::new()),
        Box::new(EmptyRowsRule::new()),
        Box::new(DataTypeConsistencyRule::new()),
        Box::new(EncodingIssuesRule::new()),
    ]
}

/// Normalizes a spreadsheet number that was exported as a float (`"8001.0"` → `"8001"`).
///
/// Text without a decimal point, and text that does not parse as a finite number,
/// is returned unchanged.
pub(crate) fn strip_float_suffix(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => truncate_to_integer_text(value),
        _ => text.to_string(),
    }
}

/// Truncates a finite float toward zero and renders it as an integer.
pub(crate) fn truncate_to_integer_text(value: f64) -> String {
    let truncated = value.trunc();
    if truncated.abs() < 9.0e18 {
        (truncated as i64).to_string()
    } else {
        format!("{truncated:.0}")
    }
}

/// Returns true for a non-empty string of ASCII digits.
pub(crate) fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Shortens `text` to at most `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
