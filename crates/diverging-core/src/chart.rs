// File: crates/diverging-core/src/chart.rs
// Summary: Bar/column chart data holder; applies the diverging transform on construction when enabled.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diverging::{apply_sides, DivergingTransformer, Side};
use crate::error::Result;
use crate::options::{ChartOptionValidator, ChartOptions, StackedOptionPredicate};
use crate::series::{validate_collection, SeriesCollection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Bar,
    Column,
}

/// Chart payload as produced by data loading: category labels plus series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawChartData {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub series: SeriesCollection,
}

impl RawChartData {
    pub fn new(categories: Vec<String>, series: SeriesCollection) -> Self {
        Self { categories, series }
    }

    /// Parse and validate a chart payload.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let data: RawChartData = serde_json::from_str(input)?;
        validate_collection(&data.series)?;
        Ok(data)
    }
}

/// Capability of chart types that can render two-sided bars.
pub trait SupportsDivergingTransform {
    type Predicate: StackedOptionPredicate;

    fn diverging_transformer(&self) -> &DivergingTransformer<Self::Predicate>;

    /// Diverging form of `raw`, consuming it.
    fn make_raw_series_data_for_diverging(
        &self,
        raw: SeriesCollection,
        stacked: Option<&str>,
    ) -> SeriesCollection {
        self.make_diverging_with_sides(raw, stacked).0
    }

    /// Diverging form of `raw` plus the side of each kept series.
    fn make_diverging_with_sides(
        &self,
        raw: SeriesCollection,
        stacked: Option<&str>,
    ) -> (SeriesCollection, Vec<Side>) {
        let assigned = self.diverging_transformer().assign_sides(&raw, stacked);
        let sides = assigned.iter().flatten().copied().collect();
        (apply_sides(raw, &assigned), sides)
    }
}

pub struct Chart<P = ChartOptionValidator> {
    chart_type: ChartType,
    categories: Vec<String>,
    series: SeriesCollection,
    options: ChartOptions,
    transformer: DivergingTransformer<P>,
    // side of each entry in `series`; empty unless diverging
    sides: Vec<Side>,
}

impl Chart {
    pub fn new(chart_type: ChartType, raw: RawChartData, options: ChartOptions) -> Self {
        Chart::with_predicate(chart_type, raw, options, ChartOptionValidator)
    }

    pub fn bar(raw: RawChartData, options: ChartOptions) -> Self {
        Chart::new(ChartType::Bar, raw, options)
    }

    pub fn column(raw: RawChartData, options: ChartOptions) -> Self {
        Chart::new(ChartType::Column, raw, options)
    }
}

impl<P: StackedOptionPredicate> Chart<P> {
    pub fn with_predicate(
        chart_type: ChartType,
        raw: RawChartData,
        options: ChartOptions,
        predicate: P,
    ) -> Self {
        let mut chart = Self {
            chart_type,
            categories: raw.categories,
            series: raw.series,
            options,
            transformer: DivergingTransformer::with_predicate(predicate),
            sides: Vec::new(),
        };
        if chart.options.series.diverging {
            chart.apply_diverging();
        }
        debug!(
            ?chart_type,
            diverging = chart.is_diverging(),
            series = chart.series.len(),
            "chart constructed"
        );
        chart
    }

    fn apply_diverging(&mut self) {
        let stacked = self.options.series.stacked.clone();
        let stacked = stacked.as_deref();
        let raw = std::mem::take(&mut self.series);
        let (series, sides) = self.make_diverging_with_sides(raw, stacked);
        self.series = series;
        self.sides = sides;
    }

    pub fn chart_type(&self) -> ChartType { self.chart_type }

    pub fn categories(&self) -> &[String] { &self.categories }

    /// Series as handed to the renderer (diverging form when enabled).
    pub fn series(&self) -> &SeriesCollection { &self.series }

    pub fn options(&self) -> &ChartOptions { &self.options }

    pub fn is_diverging(&self) -> bool { self.options.series.diverging }

    /// Side of the series at `index`, or `None` when not diverging or out of range.
    pub fn side_of(&self, index: usize) -> Option<Side> {
        self.sides.get(index).copied()
    }

    pub fn into_raw_data(self) -> RawChartData {
        RawChartData { categories: self.categories, series: self.series }
    }
}

impl<P: StackedOptionPredicate> SupportsDivergingTransform for Chart<P> {
    type Predicate = P;

    fn diverging_transformer(&self) -> &DivergingTransformer<P> {
        &self.transformer
    }
}
