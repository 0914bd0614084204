//! File-based and in-memory price sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use tailrisk_core::{Date, PricePoint, PriceSeries};
use tailrisk_traits::error::TraitError;
use tailrisk_traits::ids::Symbol;
use tailrisk_traits::market_data::{check_range, PriceSource, SourceType};

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for daily closes.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(alias = "Date", alias = "datetime")]
    date: String,
    #[serde(alias = "Close")]
    close: f64,
}

/// Parses a `date,close` CSV document into a price series.
///
/// Rows may appear in any order; they are sorted by date. Duplicate dates and
/// non-positive closes are parse errors.
pub fn parse_price_csv(data: &[u8]) -> Result<PriceSeries, TraitError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut points = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let record: PriceRecord =
            result.map_err(|e| TraitError::ParseError(format!("row {}: {e}", row + 1)))?;
        let date = Date::parse(&record.date)
            .map_err(|e| TraitError::ParseError(format!("row {}: {e}", row + 1)))?;
        points.push(PricePoint::new(date, record.close));
    }

    points.sort_by_key(|p| p.date);
    Ok(PriceSeries::new(points)?)
}

/// CSV-based price source: one `<SYMBOL>.csv` file per symbol.
///
/// Files are read on first request and cached until [`reload`](Self::reload).
pub struct CsvPriceSource {
    dir: PathBuf,
    cache: DashMap<Symbol, PriceSeries>,
}

impl CsvPriceSource {
    /// Create a new CSV price source over a directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, TraitError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(TraitError::SourceNotAvailable(format!(
                "price directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            dir,
            cache: DashMap::new(),
        })
    }

    /// Path of the file holding `symbol`.
    ///
    /// `<SYMBOL>.csv` wins; otherwise any `.csv` file whose stem matches the
    /// symbol ignoring ASCII case, so `aapl.csv` serves `AAPL`.
    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        let exact = self.dir.join(format!("{}.csv", symbol.as_str()));
        if exact.is_file() {
            return exact;
        }
        std::fs::read_dir(&self.dir)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .find(|path| {
                path.extension().and_then(|e| e.to_str()) == Some("csv")
                    && path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .is_some_and(|stem| stem.eq_ignore_ascii_case(symbol.as_str()))
            })
            .unwrap_or(exact)
    }

    /// Drop cached series so files are re-read on next request.
    pub fn reload(&self) {
        self.cache.clear();
    }

    /// Symbols that have a file in the directory.
    pub fn symbols(&self) -> Result<Vec<Symbol>, TraitError> {
        let mut symbols: Vec<Symbol> = std::fs::read_dir(&self.dir)?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                    path.file_stem()
                        .and_then(|s| s.to_str())
                        .map(Symbol::new)
                } else {
                    None
                }
            })
            .collect();
        symbols.sort();
        Ok(symbols)
    }

    async fn load(&self, symbol: &Symbol) -> Result<PriceSeries, TraitError> {
        if let Some(series) = self.cache.get(symbol) {
            return Ok(series.clone());
        }

        let path = self.path_for(symbol);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TraitError::NotFound(format!("no price file for {symbol}")));
            }
            Err(e) => return Err(e.into()),
        };

        let series = parse_price_csv(&data)?;
        debug!(%symbol, rows = series.len(), path = %path.display(), "loaded price file");
        self.cache.insert(symbol.clone(), series.clone());
        Ok(series)
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn get_prices(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<PriceSeries, TraitError> {
        check_range(start, end)?;
        Ok(self.load(symbol).await?.between(start, end))
    }
}

// =============================================================================
// IN-MEMORY PRICE SOURCE
// =============================================================================

/// Price source over series held in memory.
#[derive(Default)]
pub struct InMemoryPriceSource {
    series: DashMap<Symbol, PriceSeries>,
}

impl InMemoryPriceSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the series for a symbol.
    pub fn insert(&self, symbol: impl Into<Symbol>, series: PriceSeries) {
        self.series.insert(symbol.into(), series);
    }

    /// Builder-style insert.
    pub fn with_series(self, symbol: impl Into<Symbol>, series: PriceSeries) -> Self {
        self.insert(symbol, series);
        self
    }
}

#[async_trait]
impl PriceSource for InMemoryPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    async fn get_prices(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<PriceSeries, TraitError> {
        check_range(start, end)?;
        self.series
            .get(symbol)
            .map(|s| s.between(start, end))
            .ok_or_else(|| TraitError::NotFound(format!("no prices for {symbol}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sorts_rows() {
        let csv = b"date,close\n2024-01-03,101.0\n2024-01-02,100.0\n";
        let series = parse_price_csv(csv).unwrap();
        assert_eq!(series.closes(), vec![100.0, 101.0]);
    }

    #[test]
    fn test_parse_header_aliases() {
        let csv = b"Date,Close\n2024-01-02, 100.5\n";
        assert_eq!(parse_price_csv(csv).unwrap().closes(), vec![100.5]);
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert!(matches!(
            parse_price_csv(b"date,close\n2024-01-02,abc\n"),
            Err(TraitError::ParseError(_))
        ));
        assert!(matches!(
            parse_price_csv(b"date,close\n02/01/2024,1.0\n"),
            Err(TraitError::ParseError(_))
        ));
        assert!(matches!(
            parse_price_csv(b"date,close\n2024-01-02,1.0\n2024-01-02,2.0\n"),
            Err(TraitError::ParseError(_))
        ));
        assert!(matches!(
            parse_price_csv(b"date,close\n2024-01-02,0.0\n"),
            Err(TraitError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_source() {
        let d = Date::from_ymd(2024, 1, 2).unwrap();
        let series = PriceSeries::from_pairs((0..5).map(|i| (d.add_days(i), 100.0 + i as f64))).unwrap();
        let source = InMemoryPriceSource::new().with_series("spy", series);

        let got = source
            .get_prices(&Symbol::new("SPY"), d.add_days(1), d.add_days(3))
            .await
            .unwrap();
        assert_eq!(got.len(), 3);

        let err = source
            .get_prices(&Symbol::new("QQQ"), d, d.add_days(3))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = source
            .get_prices(&Symbol::new("SPY"), d.add_days(3), d)
            .await
            .unwrap_err();
        assert!(matches!(err, TraitError::InvalidInput(_)));
    }
}
