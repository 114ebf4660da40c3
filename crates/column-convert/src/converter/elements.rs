//! Per-element conversion fallback chains.
//!
//! Each function tries an ordered chain of conversions for one element and
//! reports an explicit [`Outcome`] instead of raising: the element either
//! converts, is recognized as missing (no warning), or exhausts the chain
//! (one warning, then treated as missing by the caller).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::warn;

use crate::config::ConvertOptions;
use crate::utils::{is_missing_value, normalize_locale_number};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Result of a single element conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<T> {
    /// Successfully converted value.
    Converted(T),
    /// Element was a recognized missing-value marker; no warning emitted.
    Missing,
    /// The fallback chain was exhausted; a warning has been emitted.
    Unparseable,
}

impl<T> Outcome<T> {
    /// Collapse to the column representation: missing and unparseable
    /// elements both materialize as null.
    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Converted(value) => Some(value),
            Outcome::Missing | Outcome::Unparseable => None,
        }
    }
}

/// Lenient date parse result for an element that was not missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    /// Parsed calendar date/time as epoch milliseconds (UTC).
    Timestamp(i64),
    /// Malformed-but-not-missing input, coerced instead of raised.
    NotADate,
}

impl DateValue {
    /// Epoch milliseconds, or `None` for the not-a-date sentinel.
    pub fn timestamp_millis(self) -> Option<i64> {
        match self {
            DateValue::Timestamp(millis) => Some(millis),
            DateValue::NotADate => None,
        }
    }
}

/// Convert an element to a float as hard as possible.
///
/// Chain: missing-marker check, direct numeric extraction, then a
/// locale-aware retry for text ("1 234,56" -> 1234.56).
pub fn float_value(value: &AnyValue, options: &ConvertOptions) -> Outcome<f64> {
    if is_missing_value(value, &options.extra_na_markers) {
        return Outcome::Missing;
    }

    match value {
        AnyValue::Float64(f) => Outcome::Converted(*f),
        AnyValue::Float32(f) => Outcome::Converted(f64::from(*f)),
        AnyValue::Int8(v) => Outcome::Converted(f64::from(*v)),
        AnyValue::Int16(v) => Outcome::Converted(f64::from(*v)),
        AnyValue::Int32(v) => Outcome::Converted(f64::from(*v)),
        AnyValue::Int64(v) => Outcome::Converted(*v as f64),
        AnyValue::UInt8(v) => Outcome::Converted(f64::from(*v)),
        AnyValue::UInt16(v) => Outcome::Converted(f64::from(*v)),
        AnyValue::UInt32(v) => Outcome::Converted(f64::from(*v)),
        AnyValue::UInt64(v) => Outcome::Converted(*v as f64),
        AnyValue::Boolean(b) => Outcome::Converted(if *b { 1.0 } else { 0.0 }),
        AnyValue::String(s) => parse_float_text(s, options),
        AnyValue::StringOwned(s) => parse_float_text(s.as_str(), options),
        other => {
            warn!("Unknown input for float conversion during transform: {:?}", other);
            Outcome::Unparseable
        }
    }
}

fn parse_float_text(text: &str, options: &ConvertOptions) -> Outcome<f64> {
    let trimmed = text.trim();
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return Outcome::Converted(parsed);
    }
    if options.locale_fallback
        && let Ok(parsed) = normalize_locale_number(trimmed).parse::<f64>()
    {
        return Outcome::Converted(parsed);
    }
    warn!("Unknown input for float conversion during transform: {:?}", trimmed);
    Outcome::Unparseable
}

/// Convert an element to its textual representation.
pub fn str_value(value: &AnyValue, options: &ConvertOptions) -> Outcome<String> {
    if is_missing_value(value, &options.extra_na_markers) {
        return Outcome::Missing;
    }

    match value {
        AnyValue::String(s) => Outcome::Converted(s.to_string()),
        AnyValue::StringOwned(s) => Outcome::Converted(s.to_string()),
        AnyValue::Binary(_) | AnyValue::BinaryOwned(_) => {
            // Raw bytes have no canonical text form.
            warn!("Unknown input for str conversion during transform");
            Outcome::Unparseable
        }
        other => Outcome::Converted(format!("{}", other)),
    }
}

/// Convert an element to a calendar date/time, leniently.
///
/// Already-temporal values normalize to epoch milliseconds unchanged, so
/// re-transforming a converted column is a no-op. Unparseable-but-not-missing
/// strings (and bare numbers) coerce to [`DateValue::NotADate`] without a
/// warning; only element kinds that cannot enter lenient parsing at all
/// (booleans, bytes, nested values) take the warn-and-null path.
pub fn date_value(value: &AnyValue, options: &ConvertOptions) -> Outcome<DateValue> {
    if is_missing_value(value, &options.extra_na_markers) {
        return Outcome::Missing;
    }

    match value {
        AnyValue::Date(days) => {
            Outcome::Converted(DateValue::Timestamp(i64::from(*days) * MILLIS_PER_DAY))
        }
        AnyValue::Datetime(v, unit, _) => {
            Outcome::Converted(DateValue::Timestamp(to_millis(*v, *unit)))
        }
        AnyValue::DatetimeOwned(v, unit, _) => {
            Outcome::Converted(DateValue::Timestamp(to_millis(*v, *unit)))
        }
        AnyValue::String(s) => parse_date_text(s, options),
        AnyValue::StringOwned(s) => parse_date_text(s.as_str(), options),
        AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_)
        | AnyValue::Float32(_)
        | AnyValue::Float64(_) => Outcome::Converted(DateValue::NotADate),
        other => {
            warn!("Unknown input for date conversion during transform: {:?}", other);
            Outcome::Unparseable
        }
    }
}

fn to_millis(value: i64, unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Nanoseconds => value / 1_000_000,
        TimeUnit::Microseconds => value / 1_000,
        TimeUnit::Milliseconds => value,
    }
}

fn parse_date_text(text: &str, options: &ConvertOptions) -> Outcome<DateValue> {
    let trimmed = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Outcome::Converted(DateValue::Timestamp(parsed.timestamp_millis()));
    }

    for format in &options.date_formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Outcome::Converted(DateValue::Timestamp(datetime.and_utc().timestamp_millis()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format)
            && let Some(datetime) = date.and_hms_opt(0, 0, 0)
        {
            return Outcome::Converted(DateValue::Timestamp(datetime.and_utc().timestamp_millis()));
        }
    }

    Outcome::Converted(DateValue::NotADate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> ConvertOptions {
        ConvertOptions::default()
    }

    // ========================================================================
    // float_value() tests
    // ========================================================================

    #[test]
    fn test_float_value_direct() {
        assert_eq!(
            float_value(&AnyValue::String("3.14"), &options()),
            Outcome::Converted(3.14)
        );
        assert_eq!(
            float_value(&AnyValue::Int64(42), &options()),
            Outcome::Converted(42.0)
        );
        assert_eq!(
            float_value(&AnyValue::Boolean(true), &options()),
            Outcome::Converted(1.0)
        );
    }

    #[test]
    fn test_float_value_locale_fallback() {
        assert_eq!(
            float_value(&AnyValue::String("1 234,56"), &options()),
            Outcome::Converted(1234.56)
        );
        assert_eq!(
            float_value(&AnyValue::String("3,14"), &options()),
            Outcome::Converted(3.14)
        );
    }

    #[test]
    fn test_float_value_locale_fallback_disabled() {
        let options = ConvertOptions::builder()
            .locale_fallback(false)
            .build()
            .unwrap();
        assert_eq!(
            float_value(&AnyValue::String("1 234,56"), &options),
            Outcome::Unparseable
        );
        // plain parsing still works
        assert_eq!(
            float_value(&AnyValue::String("3.14"), &options),
            Outcome::Converted(3.14)
        );
    }

    #[test]
    fn test_float_value_missing_markers() {
        assert_eq!(float_value(&AnyValue::Null, &options()), Outcome::Missing);
        assert_eq!(
            float_value(&AnyValue::String(""), &options()),
            Outcome::Missing
        );
        assert_eq!(
            float_value(&AnyValue::String("nan"), &options()),
            Outcome::Missing
        );
        assert_eq!(
            float_value(&AnyValue::Float64(f64::NAN), &options()),
            Outcome::Missing
        );
    }

    #[test]
    fn test_float_value_unparseable() {
        assert_eq!(
            float_value(&AnyValue::String("abc"), &options()),
            Outcome::Unparseable
        );
    }

    #[test]
    fn test_float_value_exotic_type_lands_on_unparseable() {
        let inner = Series::new("".into(), &[1i32, 2]);
        assert_eq!(
            float_value(&AnyValue::List(inner), &options()),
            Outcome::Unparseable
        );
    }

    // ========================================================================
    // str_value() tests
    // ========================================================================

    #[test]
    fn test_str_value_representations() {
        assert_eq!(
            str_value(&AnyValue::Int32(42), &options()),
            Outcome::Converted("42".to_string())
        );
        assert_eq!(
            str_value(&AnyValue::Boolean(false), &options()),
            Outcome::Converted("false".to_string())
        );
        assert_eq!(
            str_value(&AnyValue::String("Alice"), &options()),
            Outcome::Converted("Alice".to_string())
        );
    }

    #[test]
    fn test_str_value_missing_markers() {
        assert_eq!(str_value(&AnyValue::Null, &options()), Outcome::Missing);
        assert_eq!(
            str_value(&AnyValue::String(""), &options()),
            Outcome::Missing
        );
        assert_eq!(
            str_value(&AnyValue::String("None"), &options()),
            Outcome::Missing
        );
    }

    #[test]
    fn test_str_value_binary_unparseable() {
        assert_eq!(
            str_value(&AnyValue::Binary(b"\x00\x01"), &options()),
            Outcome::Unparseable
        );
    }

    // ========================================================================
    // date_value() tests
    // ========================================================================

    #[test]
    fn test_date_value_iso_date() {
        // 2020-01-01T00:00:00Z
        assert_eq!(
            date_value(&AnyValue::String("2020-01-01"), &options()),
            Outcome::Converted(DateValue::Timestamp(1_577_836_800_000))
        );
    }

    #[test]
    fn test_date_value_alternate_formats() {
        let expected = NaiveDate::from_ymd_opt(1912, 4, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(
            date_value(&AnyValue::String("15/04/1912"), &options()),
            Outcome::Converted(DateValue::Timestamp(expected))
        );
        assert_eq!(
            date_value(&AnyValue::String("1912-04-15 00:00:00"), &options()),
            Outcome::Converted(DateValue::Timestamp(expected))
        );
    }

    #[test]
    fn test_date_value_not_a_date_sentinel() {
        assert_eq!(
            date_value(&AnyValue::String("not-a-date"), &options()),
            Outcome::Converted(DateValue::NotADate)
        );
        assert_eq!(DateValue::NotADate.timestamp_millis(), None);
    }

    #[test]
    fn test_date_value_already_temporal_is_noop() {
        let millis = 1_577_836_800_000_i64;
        assert_eq!(
            date_value(
                &AnyValue::Datetime(millis, TimeUnit::Milliseconds, None),
                &options()
            ),
            Outcome::Converted(DateValue::Timestamp(millis))
        );
        assert_eq!(
            date_value(
                &AnyValue::Datetime(millis * 1_000_000, TimeUnit::Nanoseconds, None),
                &options()
            ),
            Outcome::Converted(DateValue::Timestamp(millis))
        );
        // 2020-01-01 is 18262 days after the epoch
        assert_eq!(
            date_value(&AnyValue::Date(18_262), &options()),
            Outcome::Converted(DateValue::Timestamp(millis))
        );
    }

    #[test]
    fn test_date_value_missing_and_unparseable() {
        assert_eq!(date_value(&AnyValue::Null, &options()), Outcome::Missing);
        assert_eq!(
            date_value(&AnyValue::String("None"), &options()),
            Outcome::Missing
        );
        assert_eq!(
            date_value(&AnyValue::Boolean(true), &options()),
            Outcome::Unparseable
        );
    }
}
