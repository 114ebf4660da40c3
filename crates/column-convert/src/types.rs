//! The target type tag produced by the upstream detect step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// String tags accepted at construction, in canonical order.
pub const ALLOWED_TYPES: [&str; 6] = ["number", "bool", "id", "date", "object", "constant"];

/// Target semantic type for a column, as declared by the detect step.
///
/// The set is closed: anything outside these six variants is rejected at
/// construction time with [`ConvertError::UnknownDetectedType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectedType {
    /// Floating-point numbers (possibly locale-formatted text).
    Number,
    /// Boolean values; converted through their textual representation.
    Bool,
    /// Row identifier; passed through unchanged.
    Id,
    /// Date and/or time values.
    Date,
    /// Free text / untyped values.
    Object,
    /// Single-valued column; passed through unchanged.
    Constant,
}

impl DetectedType {
    /// Canonical string tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedType::Number => "number",
            DetectedType::Bool => "bool",
            DetectedType::Id => "id",
            DetectedType::Date => "date",
            DetectedType::Object => "object",
            DetectedType::Constant => "constant",
        }
    }

    /// Returns true if values of this type are passed through unchanged.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, DetectedType::Id | DetectedType::Constant)
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectedType {
    type Err = ConvertError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "number" => Ok(DetectedType::Number),
            "bool" => Ok(DetectedType::Bool),
            "id" => Ok(DetectedType::Id),
            "date" => Ok(DetectedType::Date),
            "object" => Ok(DetectedType::Object),
            "constant" => Ok(DetectedType::Constant),
            other => Err(ConvertError::UnknownDetectedType {
                received: other.to_string(),
            }),
        }
    }
}
