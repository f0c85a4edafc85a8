// File: crates/diverging-core/src/options.rs
// Summary: Chart options (serde) and the stacked-option predicate consulted by the diverging transform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeriesError};

/// Recognised stacking modes for bar-type charts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackType {
    Normal,
    Percent,
}

impl StackType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StackType::Normal => "normal",
            StackType::Percent => "percent",
        }
    }
}

impl FromStr for StackType {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(StackType::Normal),
            "percent" => Ok(StackType::Percent),
            other => Err(SeriesError::UnknownStackedOption(other.to_string())),
        }
    }
}

impl fmt::Display for StackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True only for a known stacking mode; `None`, empty and unknown strings are false.
pub fn is_valid_stacked_option(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.parse::<StackType>().is_ok())
}

/// Decides whether a stacked option enables stack-grouped diverging.
pub trait StackedOptionPredicate: Send + Sync {
    fn is_valid_stacked_option(&self, value: Option<&str>) -> bool;
}

/// Default chart-option rule: `normal` or `percent`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartOptionValidator;

impl StackedOptionPredicate for ChartOptionValidator {
    fn is_valid_stacked_option(&self, value: Option<&str>) -> bool {
        is_valid_stacked_option(value)
    }
}

// Closures make it easy to inject a custom rule.
impl<F> StackedOptionPredicate for F
where
    F: Fn(Option<&str>) -> bool + Send + Sync,
{
    fn is_valid_stacked_option(&self, value: Option<&str>) -> bool {
        self(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesOptions {
    /// Opaque stacking mode; only its validity is checked here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<String>,
    pub diverging: bool,
}

impl SeriesOptions {
    pub fn stacked(&self) -> Option<&str> {
        self.stacked.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    pub series: SeriesOptions,
}

impl ChartOptions {
    pub fn diverging() -> Self {
        Self { series: SeriesOptions { stacked: None, diverging: true } }
    }

    pub fn with_stacked(mut self, stacked: impl Into<String>) -> Self {
        self.series.stacked = Some(stacked.into());
        self
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
