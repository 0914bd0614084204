//! # Tailrisk Ext File
//!
//! File-based price history and figure output for the Tailrisk dashboard.
//!
//! This crate provides default implementations for offline use and tests:
//! - CSV-based price source (`<dir>/<SYMBOL>.csv` with `date,close` columns)
//! - In-memory price source
//! - JSON figure writer and a no-op renderer
//!
//! For live history, use the HTTP extension.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;
mod output;

pub use market_data::*;
pub use output::*;

use std::path::Path;
use std::sync::Arc;

use tailrisk_traits::error::TraitError;
use tailrisk_traits::market_data::PriceSource;

/// Create a CSV-backed price source behind a shared handle.
pub fn create_csv_price_source(dir: impl AsRef<Path>) -> Result<Arc<dyn PriceSource>, TraitError> {
    Ok(Arc::new(CsvPriceSource::new(dir)?))
}
