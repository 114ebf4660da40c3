//! Best-Effort Column Type Coercion
//!
//! A small Polars-based library that coerces a column toward a detected type
//! tag without ever failing on individual values.
//!
//! # Overview
//!
//! Upstream profiling assigns each column one of six type tags: `number`,
//! `bool`, `id`, `date`, `object`, or `constant`. [`TypeConverter`] takes one
//! tag and converts every element of a column toward it:
//!
//! - **Never raises per element**: missing-value markers and unparseable
//!   leftovers become nulls, with a warning logged for the latter
//! - **Locale-aware numbers**: "1 234,56" parses as 1234.56 when plain
//!   parsing fails
//! - **Lenient dates**: several common formats are tried; malformed text is
//!   coerced to a not-a-date sentinel instead of erroring
//! - **Identity passthrough**: `id` and `constant` columns are returned
//!   unchanged
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use column_convert::TypeConverter;
//! use polars::prelude::*;
//!
//! let fares = Series::new("fare".into(), &["7.25", "1 234,56", "", "abc"]);
//!
//! let converter = TypeConverter::new("number")?;
//! let converted = converter.fit(&fares).transform(&fares)?;
//! // -> Float64 column [7.25, 1234.56, null, null]
//! ```
//!
//! # Configuration
//!
//! Use [`ConvertOptions`] to tune the fallback behavior:
//!
//! ```rust,ignore
//! use column_convert::{ConvertOptions, TypeConverter};
//!
//! let options = ConvertOptions::builder()
//!     .locale_fallback(false)
//!     .extra_na_marker("N/A")
//!     .build()?;
//!
//! let converter = TypeConverter::new("date")?.with_options(options);
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, ConvertOptions, ConvertOptionsBuilder, DEFAULT_DATE_FORMATS,
};
pub use converter::{DateValue, Outcome, TypeConverter, date_value, float_value, str_value};
pub use error::{ConvertError, Result as ConvertResult, ResultExt};
pub use types::{ALLOWED_TYPES, DetectedType};
pub use utils::{NA_MARKERS, is_missing_value, is_na_marker, normalize_locale_number};
