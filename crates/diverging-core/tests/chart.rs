// File: crates/diverging-core/tests/chart.rs
// Purpose: Bar/column charts apply the diverging transform from their options at construction.

use diverging_core::{
    Chart, ChartOptions, ChartType, RawChartData, SeriesRecord, Side, StackedOptionPredicate,
    SupportsDivergingTransform,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Stock chart-option rule that counts how often it is consulted.
struct CountingPredicate(Arc<AtomicUsize>);

impl StackedOptionPredicate for CountingPredicate {
    fn is_valid_stacked_option(&self, value: Option<&str>) -> bool {
        self.0.fetch_add(1, Ordering::SeqCst);
        diverging_core::is_valid_stacked_option(value)
    }
}

fn pyramid() -> RawChartData {
    RawChartData::new(
        vec!["0-9".into(), "10-19".into(), "20-29".into()],
        vec![
            SeriesRecord::new(vec![12.0, 10.0, 8.0]).with_name("Male").with_stack("male"),
            SeriesRecord::new(vec![11.0, 9.0, 9.5]).with_name("Female").with_stack("female"),
            SeriesRecord::new(vec![1.0, 1.0, 1.0]).with_name("Unknown").with_stack("unknown"),
        ],
    )
}

#[test]
fn non_diverging_chart_keeps_raw_series() {
    let chart = Chart::bar(pyramid(), ChartOptions::default());
    assert!(!chart.is_diverging());
    assert_eq!(chart.series(), &pyramid().series);
    assert_eq!(chart.side_of(0), None);
}

#[test]
fn diverging_stacked_bar_chart() {
    let chart = Chart::bar(pyramid(), ChartOptions::diverging().with_stacked("normal"));
    assert_eq!(chart.chart_type(), ChartType::Bar);
    assert_eq!(chart.categories().len(), 3);
    let names: Vec<_> = chart.series().iter().filter_map(|s| s.name()).collect();
    assert_eq!(names, vec!["Male", "Female"]);
    assert_eq!(chart.series()[0].data, vec![-12.0, -10.0, -8.0]);
    assert_eq!(chart.series()[1].data, vec![11.0, 9.0, 9.5]);
    assert_eq!(chart.side_of(0), Some(Side::Left));
    assert_eq!(chart.side_of(1), Some(Side::Right));
    assert_eq!(chart.side_of(2), None);
}

#[test]
fn diverging_column_chart_without_stacking_is_positional() {
    let chart = Chart::column(pyramid(), ChartOptions::diverging());
    assert_eq!(chart.chart_type(), ChartType::Column);
    let raw = chart.into_raw_data();
    assert_eq!(raw.series.len(), 2);
    assert_eq!(raw.series[0].name(), Some("Male"));
    assert_eq!(raw.series[1].data, vec![11.0, 9.0, 9.5]);
}

#[test]
fn injected_predicate_controls_strategy() {
    fn never(_: Option<&str>) -> bool {
        false
    }
    let data = RawChartData::new(
        vec![],
        vec![
            SeriesRecord::new(vec![1.0]).with_stack("A"),
            SeriesRecord::new(vec![2.0]).with_stack("A"),
        ],
    );
    let opts = ChartOptions::diverging().with_stacked("normal");
    let chart = Chart::with_predicate(ChartType::Bar, data, opts, never);
    // positional despite a valid stacked option
    assert_eq!(chart.series()[1].data, vec![2.0]);
}

#[test]
fn trait_method_is_usable_directly() {
    let chart = Chart::bar(RawChartData::default(), ChartOptions::default());
    let out = chart.make_raw_series_data_for_diverging(
        vec![SeriesRecord::new(vec![5.0]), SeriesRecord::new(vec![-5.0])],
        None,
    );
    assert_eq!(out[0].data, vec![-5.0]);
    assert_eq!(out[1].data, vec![0.0]);
}

#[test]
fn options_and_data_from_json() -> anyhow::Result<()> {
    let opts = ChartOptions::from_json_str(r#"{"series":{"stacked":"percent","diverging":true}}"#)?;
    let data = RawChartData::from_json_str(
        r#"{"categories":["a","b"],"series":[
            {"name":"L","stack":"x","data":[1,2]},
            {"name":"R","stack":"y","data":[3,-4]}
        ]}"#,
    )?;
    let chart = Chart::column(data, opts);
    assert_eq!(chart.series()[0].data, vec![-1.0, -2.0]);
    assert_eq!(chart.series()[1].data, vec![3.0, 0.0]);
    assert_eq!(chart.options().series.stacked(), Some("percent"));
    Ok(())
}

#[test]
fn sides_are_assigned_once_per_chart() {
    let calls = Arc::new(AtomicUsize::new(0));
    let opts = ChartOptions::diverging().with_stacked("normal");
    let chart = Chart::with_predicate(ChartType::Bar, pyramid(), opts, CountingPredicate(calls.clone()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(chart.series().len(), 2);
    assert_eq!(chart.side_of(1), Some(Side::Right));
}

#[test]
fn sides_follow_kept_series() {
    let chart = Chart::bar(RawChartData::default(), ChartOptions::default());
    let raw = vec![
        SeriesRecord::new(vec![1.0]).with_stack("x"),
        SeriesRecord::new(vec![2.0]).with_stack("z"),
        SeriesRecord::new(vec![3.0]).with_stack("y"),
        SeriesRecord::new(vec![4.0]).with_stack("x"),
    ];
    let (series, sides) = chart.make_diverging_with_sides(raw, Some("normal"));
    assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);
    let data: Vec<_> = series.iter().map(|s| s.data.clone()).collect();
    assert_eq!(data, vec![vec![-1.0], vec![2.0], vec![-4.0]]);
}

#[test]
fn zero_values_serialize_without_sign() -> anyhow::Result<()> {
    let data = RawChartData::new(vec![], vec![SeriesRecord::new(vec![0.0, 2.0])]);
    let chart = Chart::bar(data, ChartOptions::diverging());
    let json = serde_json::to_string(&chart.into_raw_data())?;
    assert!(json.contains("[0.0,-2.0]"), "{json}");
    Ok(())
}
