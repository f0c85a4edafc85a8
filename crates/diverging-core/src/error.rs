// File: crates/diverging-core/src/error.rs
// Summary: Error type for loading and validating series data at the crate boundary.

use thiserror::Error;

/// Errors raised while bringing series data into the crate.
///
/// The diverging transform itself never fails; these only surface when a
/// payload is parsed or validated before it reaches the transform.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Payload is not a series collection (e.g. `data` is not a list of numbers).
    #[error("invalid series payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A `data` entry is NaN or infinite.
    #[error("series {series} has non-finite value {value} at index {index}")]
    NonFinite { series: usize, index: usize, value: f64 },

    /// Stacked option string is not one of the known stack types.
    #[error("unknown stacked option: {0:?}")]
    UnknownStackedOption(String),
}

pub type Result<T> = std::result::Result<T, SeriesError>;
