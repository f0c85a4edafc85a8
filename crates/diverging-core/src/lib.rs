// File: crates/diverging-core/src/lib.rs
// Summary: Core library entry point; exports the series model, diverging transform and bar-type charts.

pub mod chart;
pub mod diverging;
pub mod error;
pub mod options;
pub mod series;

pub use chart::{Chart, ChartType, RawChartData, SupportsDivergingTransform};
pub use diverging::{apply_sides, make_diverging, DivergingTransformer, Side, Strategy};
pub use error::{Result, SeriesError};
pub use options::{is_valid_stacked_option, ChartOptionValidator, ChartOptions, SeriesOptions, StackType, StackedOptionPredicate};
pub use series::{parse_series_json, validate_collection, SeriesCollection, SeriesRecord};
