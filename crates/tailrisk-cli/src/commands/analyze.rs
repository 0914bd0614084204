//! Analyze command implementation.
//!
//! Computes VaR, CVaR and drawdown statistics for one symbol.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tailrisk_config::DashboardConfig;
use tailrisk_core::{Date, SeriesPoint};
use tailrisk_engine::{DashboardEngineBuilder, DashboardRequest, DashboardSnapshot};
use tailrisk_ext_file::EmptyRenderer;
use tailrisk_risk::{worst_drawdowns, DrawdownPeriod, QuantileMethod, RiskMetrics};

use crate::cli::OutputFormat;
use crate::commands::{apply_window, file_source, price_source};
use crate::output::{
    format_percent, print_header, print_output, print_table, print_warning, KeyValue,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Ticker symbol. Defaults to the configured symbol, or the price file name.
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Tail probability in percent (1-10)
    #[arg(short = 'a', long)]
    pub confidence: Option<u8>,

    /// Read closes from this CSV file instead of the configured source
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    /// First date of the window (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last date of the window (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Quantile method: truncate or linear
    #[arg(short, long)]
    pub method: Option<QuantileMethod>,

    /// Number of worst drawdowns to list
    #[arg(long, default_value = "5")]
    pub top: usize,
}

/// Machine-readable analysis result.
#[derive(Debug, Serialize)]
struct Analysis {
    symbol: String,
    start: Date,
    end: Date,
    prices: usize,
    metrics: RiskMetrics,
    total_return: Option<f64>,
    max_drawdown: Option<SeriesPoint>,
    worst_drawdowns: Vec<DrawdownPeriod>,
}

#[derive(Tabled)]
struct DrawdownRow {
    #[tabled(rename = "Peak")]
    peak: String,
    #[tabled(rename = "Trough")]
    trough: String,
    #[tabled(rename = "Recovery")]
    recovery: String,
    #[tabled(rename = "Depth")]
    depth: String,
    #[tabled(rename = "Days")]
    length: usize,
}

impl From<&DrawdownPeriod> for DrawdownRow {
    fn from(p: &DrawdownPeriod) -> Self {
        Self {
            peak: p.peak.to_string(),
            trough: p.trough.to_string(),
            recovery: p
                .recovery
                .map_or_else(|| "open".to_string(), |d| d.to_string()),
            depth: format_percent(p.depth),
            length: p.length,
        }
    }
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: DashboardConfig, format: OutputFormat) -> Result<()> {
    let mut config = apply_window(config, args.start.as_deref(), args.end.as_deref())?;
    if let Some(method) = args.method {
        config = config.with_quantile_method(method);
    }

    let (symbol, source) = match &args.prices {
        Some(path) => {
            let (symbol, source) = file_source(path, args.symbol.as_deref())?;
            (Some(symbol), source)
        }
        None => (args.symbol.clone(), price_source(&config)?),
    };
    let request = DashboardRequest::with_defaults(symbol.as_deref(), args.confidence, &config)?;

    let engine = DashboardEngineBuilder::new()
        .with_config(config)
        .with_price_source(source)
        .with_renderer(std::sync::Arc::new(EmptyRenderer))
        .build()?;
    let snapshot = engine.compute(request).await?;

    let analysis = summarize(&snapshot, engine.config(), args.top);

    match format {
        OutputFormat::Table => print_tables(&analysis),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Csv => print_output(&key_values(&analysis), format)?,
    }

    Ok(())
}

fn summarize(snapshot: &DashboardSnapshot, config: &DashboardConfig, top: usize) -> Analysis {
    let report = &snapshot.report;
    Analysis {
        symbol: snapshot.request.symbol.to_string(),
        start: config.start,
        end: config.end,
        prices: snapshot.figures.price.points.len(),
        metrics: report.metrics,
        total_return: report.total_return,
        max_drawdown: report.max_drawdown,
        worst_drawdowns: worst_drawdowns(&report.drawdown, top),
    }
}

fn key_values(a: &Analysis) -> Vec<KeyValue> {
    let m = &a.metrics;
    let mut rows = vec![
        KeyValue::new("Symbol", a.symbol.clone()),
        KeyValue::new("Window", format!("{} to {}", a.start, a.end)),
        KeyValue::new("Prices", a.prices.to_string()),
        KeyValue::new("Returns", m.n.to_string()),
        KeyValue::new("Alpha", m.alpha.to_string()),
        KeyValue::new("Quantile Method", m.method.to_string()),
        KeyValue::new("VaR", format_percent(m.var)),
        KeyValue::new(
            "CVaR",
            m.cvar.map_or_else(|| "n/a".to_string(), format_percent),
        ),
        KeyValue::new("Tail Size", m.k.to_string()),
    ];
    if let Some(total) = a.total_return {
        rows.push(KeyValue::new("Total Return", format_percent(total)));
    }
    if let Some(dd) = a.max_drawdown {
        rows.push(KeyValue::new(
            "Max Drawdown",
            format!("{} on {}", format_percent(dd.value), dd.date),
        ));
    }
    rows
}

fn print_tables(a: &Analysis) {
    print_header(&format!("{} Tail Risk", a.symbol));
    print_table(&key_values(a));

    if !a.metrics.has_cvar() {
        print_warning(&format!(
            "no returns fall below the VaR quantile at alpha {}; CVaR is undefined",
            a.metrics.alpha
        ));
    }

    if !a.worst_drawdowns.is_empty() {
        print_header("Worst Drawdowns");
        let rows: Vec<DrawdownRow> = a.worst_drawdowns.iter().map(DrawdownRow::from).collect();
        print_table(&rows);
    }
}
