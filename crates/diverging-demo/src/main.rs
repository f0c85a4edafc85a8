// File: crates/diverging-demo/src/main.rs
// Summary: Demo loads series from JSON or CSV, builds a bar/column chart and prints its diverging data as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use diverging_core::{
    parse_series_json, validate_collection, Chart, ChartOptions, ChartType, RawChartData, SeriesRecord,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diverging-demo", about = "Reshape bar/column series into a diverging (two-sided) layout")]
struct Args {
    /// Input data (.json chart payload or series array, or .csv with one series per row)
    input: PathBuf,

    /// Chart options JSON, e.g. {"series":{"stacked":"normal","diverging":true}}
    #[arg(long)]
    options: Option<PathBuf>,

    /// Stacked option (overrides the options file)
    #[arg(long)]
    stacked: Option<String>,

    /// Pass the series through unchanged
    #[arg(long)]
    no_diverging: bool,

    #[arg(long, value_enum, default_value_t = ChartKind::Bar)]
    chart: ChartKind,

    /// Write JSON here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChartKind {
    Bar,
    Column,
}

impl From<ChartKind> for ChartType {
    fn from(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Bar => ChartType::Bar,
            ChartKind::Column => ChartType::Column,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let raw = load_chart_data(&args.input)
        .with_context(|| format!("failed to load '{}'", args.input.display()))?;
    info!(series = raw.series.len(), categories = raw.categories.len(), "loaded input");

    let options = resolve_options(&args)?;
    info!(stacked = ?options.series.stacked(), diverging = options.series.diverging, "chart options");

    let input_len = raw.series.len();
    let chart = Chart::new(args.chart.into(), raw, options);
    if chart.is_diverging() && chart.series().len() < input_len {
        warn!(dropped = input_len - chart.series().len(), "series without a diverging side were dropped");
    }

    let json = serde_json::to_string_pretty(&chart.into_raw_data())?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Options file first, then command-line overrides. Without a file the chart diverges.
fn resolve_options(args: &Args) -> Result<ChartOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            ChartOptions::from_json_str(&text).with_context(|| format!("parsing options {}", path.display()))?
        }
        None => ChartOptions::diverging(),
    };
    if let Some(stacked) = &args.stacked {
        options.series.stacked = Some(stacked.clone());
    }
    if args.no_diverging {
        options.series.diverging = false;
    }
    Ok(options)
}

fn load_chart_data(path: &Path) -> Result<RawChartData> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "csv" => load_series_csv(path),
        _ => {
            let text = std::fs::read_to_string(path)?;
            if text.trim_start().starts_with('[') {
                Ok(RawChartData::new(Vec::new(), parse_series_json(&text)?))
            } else {
                Ok(RawChartData::from_json_str(&text)?)
            }
        }
    }
}

/// Load series from CSV: optional `name` and `stack` columns, every other column is a category.
fn load_series_csv(path: &Path) -> Result<RawChartData> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    let idx = |want: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(want));
    let i_name = idx("name");
    let i_stack = idx("stack");

    let value_cols = (0..headers.len())
        .filter(|i| Some(*i) != i_name && Some(*i) != i_stack)
        .collect::<Vec<_>>();
    let categories = value_cols.iter().map(|&i| headers[i].clone()).collect::<Vec<_>>();

    let mut series = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let data = value_cols
            .iter()
            .map(|&i| {
                let cell = rec.get(i).unwrap_or("");
                cell.parse::<f64>()
                    .with_context(|| format!("row {}: column '{}' is not a number: {:?}", row + 1, headers[i], cell))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut record = SeriesRecord::new(data);
        if let Some(name) = i_name.and_then(|i| rec.get(i)) {
            record = record.with_name(name);
        }
        if let Some(stack) = i_stack.and_then(|i| rec.get(i)).filter(|s| !s.is_empty()) {
            record = record.with_stack(stack);
        }
        series.push(record);
    }

    validate_collection(&series)?;
    Ok(RawChartData::new(categories, series))
}
