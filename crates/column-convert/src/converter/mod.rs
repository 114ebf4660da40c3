//! Best-effort column type coercion.
//!
//! [`TypeConverter`] carries a detected type tag and coerces every element of
//! a column toward it. Individual elements never fail the column: recognized
//! missing markers and unparseable leftovers both land as null in the output,
//! with a warning logged for the latter.

mod elements;

pub use elements::{DateValue, Outcome, date_value, float_value, str_value};

use polars::prelude::*;
use tracing::debug;

use crate::config::ConvertOptions;
use crate::error::{Result, ResultExt};
use crate::types::DetectedType;

/// Coerces a column of arbitrary values toward one detected type.
#[derive(Debug, Clone)]
pub struct TypeConverter {
    detected_type: DetectedType,
    options: ConvertOptions,
}

impl TypeConverter {
    /// Build a converter from a type tag string.
    ///
    /// Fails with [`ConvertError::UnknownDetectedType`] for tags outside the
    /// allowed set, so a bad tag surfaces at construction rather than deep in
    /// a pipeline run.
    ///
    /// [`ConvertError::UnknownDetectedType`]: crate::error::ConvertError::UnknownDetectedType
    pub fn new(type_tag: &str) -> Result<Self> {
        Ok(Self::for_type(type_tag.parse()?))
    }

    /// Build a converter for an already-validated detected type.
    pub fn for_type(detected_type: DetectedType) -> Self {
        Self {
            detected_type,
            options: ConvertOptions::default(),
        }
    }

    /// Replace the default conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// The type this converter coerces toward.
    pub fn detected_type(&self) -> DetectedType {
        self.detected_type
    }

    /// No-op, kept for fit/transform pipeline symmetry. The converter is
    /// fully determined by its type tag and learns nothing from the data.
    pub fn fit(&self, _values: &Series) -> &Self {
        self
    }

    /// Convert every element of `values` toward the detected type.
    ///
    /// The output keeps the input's name, length, and element order. Element
    /// failures never error; `Err` covers only structural problems such as a
    /// failed output cast.
    pub fn transform(&self, values: &Series) -> Result<Series> {
        debug!(
            column = %values.name(),
            detected_type = %self.detected_type,
            rows = values.len(),
            "transforming column"
        );

        match self.detected_type {
            DetectedType::Number => self.transform_number(values),
            DetectedType::Bool | DetectedType::Object => self.transform_text(values),
            DetectedType::Date => self.transform_date(values),
            DetectedType::Id | DetectedType::Constant => Ok(values.clone()),
        }
    }

    /// Fit and transform in one call.
    pub fn fit_transform(&self, values: &Series) -> Result<Series> {
        self.fit(values).transform(values)
    }

    fn transform_number(&self, values: &Series) -> Result<Series> {
        let mut converted: Vec<Option<f64>> = Vec::with_capacity(values.len());
        for index in 0..values.len() {
            let value = values.get(index)?;
            converted.push(float_value(&value, &self.options).into_option());
        }
        Ok(Series::new(values.name().clone(), converted))
    }

    fn transform_text(&self, values: &Series) -> Result<Series> {
        let mut converted: Vec<Option<String>> = Vec::with_capacity(values.len());
        for index in 0..values.len() {
            let value = values.get(index)?;
            converted.push(str_value(&value, &self.options).into_option());
        }
        Ok(Series::new(values.name().clone(), converted))
    }

    fn transform_date(&self, values: &Series) -> Result<Series> {
        let mut converted: Vec<Option<i64>> = Vec::with_capacity(values.len());
        for index in 0..values.len() {
            let value = values.get(index)?;
            let timestamp = date_value(&value, &self.options)
                .into_option()
                .and_then(DateValue::timestamp_millis);
            converted.push(timestamp);
        }
        Series::new(values.name().clone(), converted)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .context("Failed to cast converted timestamps to a datetime column")
    }
}
