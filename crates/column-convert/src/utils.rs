//! Shared utilities: the missing-value marker set and locale helpers.

use polars::prelude::*;

/// String markers recognized as missing values (compared after trimming).
pub const NA_MARKERS: [&str; 6] = ["", "\"\"", "''", "NaN", "nan", "None"];

/// Check if a string is a missing-value marker.
///
/// # Example
///
/// ```rust,ignore
/// use column_convert::utils::is_na_marker;
///
/// assert!(is_na_marker("NaN"));
/// assert!(is_na_marker("  "));
/// assert!(!is_na_marker("42"));
/// ```
pub fn is_na_marker(s: &str) -> bool {
    let trimmed = s.trim();
    NA_MARKERS.iter().any(|&marker| trimmed == marker)
}

/// Check if an element is recognized as missing before any conversion attempt.
///
/// The check is total over every `AnyValue` variant: exotic element types
/// (lists, structs, binary) simply test not-missing and continue into the
/// conversion chain, so this can never panic or error.
pub fn is_missing_value(value: &AnyValue, extra_markers: &[String]) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(f) => f.is_nan(),
        AnyValue::Float64(f) => f.is_nan(),
        AnyValue::String(s) => is_marker_with_extras(s, extra_markers),
        AnyValue::StringOwned(s) => is_marker_with_extras(s.as_str(), extra_markers),
        _ => false,
    }
}

fn is_marker_with_extras(s: &str, extra_markers: &[String]) -> bool {
    let trimmed = s.trim();
    is_na_marker(trimmed) || extra_markers.iter().any(|marker| trimmed == marker)
}

/// Rewrite a locale-formatted number for parsing: comma decimal separators
/// become points and spaces are removed ("1 234,56" -> "1234.56").
pub fn normalize_locale_number(s: &str) -> String {
    s.replace(',', ".").replace(' ', "")
}
