// File: crates/diverging-core/src/series.rs
// Summary: Series record model for bar/column data, plus boundary parsing and validation.
// Notes:
// - Only `data` and `stack` are interpreted here. Every other field of a record
//   (name, color, ...) is carried in `attrs` so it round-trips untouched.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SeriesError};

/// Ordered series; insertion order matters to the positional strategy.
pub type SeriesCollection = Vec<SeriesRecord>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// Per-category values.
    #[serde(default)]
    pub data: Vec<f64>,
    /// Grouping tag; records sharing a stack land on the same diverging side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl SeriesRecord {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data, stack: None, attrs: Map::new() }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_attr("name", name.into())
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get("name").and_then(Value::as_str)
    }

    /// Stack tag, treating an empty string the same as no tag.
    pub fn stack_id(&self) -> Option<&str> {
        self.stack.as_deref().filter(|s| !s.is_empty())
    }

    /// Reject values the sign projections cannot order (NaN, ±inf).
    /// `series` is the record's position in its collection, used in the error.
    pub fn validate(&self, series: usize) -> Result<()> {
        match self.data.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(SeriesError::NonFinite { series, index, value: self.data[index] }),
            None => Ok(()),
        }
    }
}

/// Validate every record of a collection, failing on the first bad value.
pub fn validate_collection(series: &[SeriesRecord]) -> Result<()> {
    series.iter().enumerate().try_for_each(|(i, s)| s.validate(i))
}

/// Parse a series payload: either a bare array of records or an object with a
/// `series` array (the shape of whole chart data). The result is validated.
pub fn parse_series_json(input: &str) -> Result<SeriesCollection> {
    let value: Value = serde_json::from_str(input)?;
    let series_value = match value {
        Value::Array(_) => value,
        Value::Object(mut obj) => obj
            .remove("series")
            .ok_or_else(|| serde_json::Error::custom("object payload has no `series` field"))?,
        _ => return Err(serde_json::Error::custom("expected an array of series or an object with `series`").into()),
    };
    let series: SeriesCollection = serde_json::from_value(series_value)?;
    validate_collection(&series)?;
    Ok(series)
}
