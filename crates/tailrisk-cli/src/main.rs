//! Tailrisk CLI - historical drawdown and tail risk from the command line.
//!
//! # Usage
//!
//! ```bash
//! # VaR/CVaR and drawdowns for the configured default symbol
//! tailrisk analyze
//!
//! # A local price file at the 1% tail
//! tailrisk analyze --prices data/AAPL.csv --confidence 1
//!
//! # Write the three dashboard figures as JSON
//! tailrisk render --symbol MSFT --out figures/
//!
//! # Print the effective configuration
//! tailrisk --config tailrisk.toml config show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table/json/csv output stays clean
    let default_filter = if cli.quiet { "error" } else { "warn,tailrisk=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, config, format).await?,
        Commands::Render(args) => commands::render::execute(args, config, format).await?,
        Commands::Config(args) => commands::config::execute(args, config, cli.config, format)?,
    }

    Ok(())
}
