//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod render;

pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use render::RenderArgs;

use std::path::Path;
use std::sync::Arc;

use tailrisk_config::{DashboardConfig, DataSourceConfig};
use tailrisk_core::Date;
use tailrisk_ext_file::{create_csv_price_source, parse_price_csv, InMemoryPriceSource};
use tailrisk_ext_http::TwelveDataPriceSource;
use tailrisk_traits::market_data::PriceSource;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Loads the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> CliResult<DashboardConfig> {
    match path {
        Some(path) => Ok(DashboardConfig::load(path)?),
        None => Ok(DashboardConfig::default()),
    }
}

/// Overrides the configured price window from `--start`/`--end`.
pub fn apply_window(
    config: DashboardConfig,
    start: Option<&str>,
    end: Option<&str>,
) -> CliResult<DashboardConfig> {
    let start = start.map(parse_date).transpose()?.unwrap_or(config.start);
    let end = end.map(parse_date).transpose()?.unwrap_or(config.end);
    if start >= end {
        return Err(CliError::InvalidWindow {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(config.with_window(start, end))
}

/// Creates the price source named by the configuration.
pub fn price_source(config: &DashboardConfig) -> CliResult<Arc<dyn PriceSource>> {
    let source: Arc<dyn PriceSource> = match &config.data {
        DataSourceConfig::Csv { dir } => create_csv_price_source(dir)?,
        DataSourceConfig::TwelveData { base_url, .. } => {
            let api_key = config
                .data
                .api_key()?
                .ok_or_else(|| CliError::Config("twelve_data source needs an API key".into()))?;
            let source = match base_url {
                Some(url) => TwelveDataPriceSource::new_with_base_url(api_key, url.as_str())?,
                None => TwelveDataPriceSource::new(api_key)?,
            };
            Arc::new(source)
        }
    };
    Ok(source)
}

/// Serves a single price file, returning the symbol it is registered under.
///
/// Without an explicit symbol the file stem is used (`data/aapl.csv` → `AAPL`).
pub fn file_source(
    path: &Path,
    symbol: Option<&str>,
) -> CliResult<(String, Arc<dyn PriceSource>)> {
    let symbol = match symbol {
        Some(s) => s.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| CliError::MissingSymbol(path.display().to_string()))?,
    };
    let series = parse_price_csv(&std::fs::read(path)?)?;
    let source = InMemoryPriceSource::new().with_series(symbol.as_str(), series);
    Ok((symbol, Arc::new(source)))
}
