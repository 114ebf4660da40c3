//! Configuration options for the converter.
//!
//! This module provides conversion options using the builder pattern
//! for flexible and ergonomic setup.

use serde::{Deserialize, Serialize};

/// Date formats tried, in order, by the lenient date parser.
///
/// RFC 3339 strings are always tried first, independent of this list.
pub const DEFAULT_DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%Y%m%d",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Options for a [`TypeConverter`](crate::TypeConverter).
///
/// Use [`ConvertOptions::builder()`] to create a customized configuration.
///
/// # Example
///
/// ```rust,ignore
/// use column_convert::ConvertOptions;
///
/// let options = ConvertOptions::builder()
///     .locale_fallback(false)
///     .extra_na_marker("N/A")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Whether numeric parsing retries with comma decimal separators and
    /// spaces removed ("1 234,56" -> 1234.56).
    /// Default: true
    pub locale_fallback: bool,

    /// Additional string markers recognized as missing values, on top of
    /// the built-in set.
    /// Default: empty
    pub extra_na_markers: Vec<String>,

    /// Formats tried by the lenient date parser, in order.
    /// Default: [`DEFAULT_DATE_FORMATS`]
    pub date_formats: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            locale_fallback: true,
            extra_na_markers: Vec::new(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ConvertOptions {
    /// Create a new options builder.
    pub fn builder() -> ConvertOptionsBuilder {
        ConvertOptionsBuilder::default()
    }

    /// Validate the options and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.date_formats.is_empty() {
            return Err(ConfigValidationError::EmptyDateFormats);
        }
        Ok(())
    }
}

/// Errors that can occur during options validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("date_formats must contain at least one format")]
    EmptyDateFormats,
}

/// Builder for [`ConvertOptions`] with fluent API.
#[derive(Debug, Default)]
pub struct ConvertOptionsBuilder {
    locale_fallback: Option<bool>,
    extra_na_markers: Vec<String>,
    date_formats: Option<Vec<String>>,
}

impl ConvertOptionsBuilder {
    /// Enable or disable the locale-aware numeric retry.
    pub fn locale_fallback(mut self, enable: bool) -> Self {
        self.locale_fallback = Some(enable);
        self
    }

    /// Add a string marker to recognize as a missing value.
    pub fn extra_na_marker(mut self, marker: impl Into<String>) -> Self {
        self.extra_na_markers.push(marker.into());
        self
    }

    /// Replace the lenient date parser's format list.
    pub fn date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    /// Build the options.
    ///
    /// Returns validated `ConvertOptions` or an error if validation fails.
    pub fn build(self) -> Result<ConvertOptions, ConfigValidationError> {
        let options = ConvertOptions {
            locale_fallback: self.locale_fallback.unwrap_or(true),
            extra_na_markers: self.extra_na_markers,
            date_formats: self
                .date_formats
                .unwrap_or_else(|| DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect()),
        };

        options.validate()?;
        Ok(options)
    }
}
