//! Market data source traits.
//!
//! A [`PriceSource`] supplies the daily close history for one symbol over a
//! closed date range. Failures are reported to the caller and never retried
//! here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use crate::ids::Symbol;
use tailrisk_core::{Date, PriceSeries};

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV)
    File,
    /// Held in memory (tests, fixtures)
    Memory,
}

/// Trait for daily price history providers.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get daily closes for `symbol` with dates in `[start, end]`, both ends
    /// inclusive, sorted by date.
    ///
    /// Unknown symbols are `TraitError::NotFound`. A known symbol with no
    /// data in range returns an empty series.
    async fn get_prices(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<PriceSeries, TraitError>;
}

/// Rejects an inverted date range.
pub fn check_range(start: Date, end: Date) -> Result<(), TraitError> {
    if start > end {
        return Err(TraitError::InvalidInput(format!(
            "start {start} is after end {end}"
        )));
    }
    Ok(())
}
