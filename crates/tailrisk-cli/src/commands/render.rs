//! Render command implementation.
//!
//! Runs one dashboard refresh and writes the figures as JSON files.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Args;

use tailrisk_config::DashboardConfig;
use tailrisk_engine::{DashboardEngineBuilder, DashboardRequest, RefreshOutcome};
use tailrisk_ext_file::JsonFigureWriter;

use crate::cli::OutputFormat;
use crate::commands::{file_source, price_source};
use crate::output::{print_output, print_success, KeyValue};

/// Arguments for the render command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Ticker symbol. Defaults to the configured symbol, or the price file name.
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Tail probability in percent (1-10)
    #[arg(short = 'a', long)]
    pub confidence: Option<u8>,

    /// Read closes from this CSV file instead of the configured source
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "figures")]
    pub out: PathBuf,
}

/// Execute the render command.
pub async fn execute(args: RenderArgs, config: DashboardConfig, format: OutputFormat) -> Result<()> {
    let (symbol, source) = match &args.prices {
        Some(path) => {
            let (symbol, source) = file_source(path, args.symbol.as_deref())?;
            (Some(symbol), source)
        }
        None => (args.symbol.clone(), price_source(&config)?),
    };
    let request = DashboardRequest::with_defaults(symbol.as_deref(), args.confidence, &config)?;

    let writer = Arc::new(JsonFigureWriter::new(&args.out)?);
    let engine = DashboardEngineBuilder::new()
        .with_config(config)
        .with_price_source(source)
        .with_renderer(writer.clone())
        .build()?;

    let snapshot = match engine.refresh(request).await? {
        RefreshOutcome::Rendered(snapshot) => snapshot,
        RefreshOutcome::Superseded { generation, latest } => {
            return Err(anyhow!(
                "refresh {generation} was superseded by {latest} before rendering"
            ));
        }
    };

    let symbol = &snapshot.request.symbol;
    let files: Vec<KeyValue> = ["price", "drawdown", "tail_risk", "dashboard"]
        .into_iter()
        .map(|figure| {
            KeyValue::new(figure, writer.path_for(symbol, figure).display().to_string())
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_success(&format!(
                "Rendered {} figures for {symbol} to {}",
                files.len(),
                args.out.display()
            ));
            print_output(&files, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&files, format)?,
    }

    Ok(())
}
