//! Twelve Data time-series provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use tailrisk_core::{Date, PricePoint, PriceSeries};
use tailrisk_traits::error::TraitError;
use tailrisk_traits::ids::Symbol;
use tailrisk_traits::market_data::{check_range, PriceSource, SourceType};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";

const NO_DATA_MARKER: &str = "no data is available";

/// Twelve Data backed daily price source.
///
/// The API key is passed in by the caller; it is never logged.
#[derive(Debug, Clone)]
pub struct TwelveDataPriceSource {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
}

impl TwelveDataPriceSource {
    /// Create a source against the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TraitError> {
        Self::new_with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a source against another base URL (tests, proxies).
    pub fn new_with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, TraitError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TraitError::Internal(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
        })
    }

    fn time_series_url(&self) -> String {
        format!("{}/time_series", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PriceSource for TwelveDataPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Snapshot
    }

    async fn get_prices(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<PriceSeries, TraitError> {
        check_range(start, end)?;

        let start_s = start.to_string();
        let end_s = end.to_string();

        let resp = self
            .http
            .get(self.time_series_url())
            .query(&[
                ("symbol", symbol.as_str()),
                ("interval", "1day"),
                ("start_date", start_s.as_str()),
                ("end_date", end_s.as_str()),
                ("order", "ASC"),
                ("outputsize", "5000"),
                ("timezone", "UTC"),
                ("format", "JSON"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        let body: TimeSeriesResponse = match resp.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(TraitError::ParseError(e.to_string())),
            Err(_) => {
                return Err(status_error(i64::from(status.as_u16()), status.to_string()));
            }
        };

        if !status.is_success() {
            return Err(status_error(
                body.code.unwrap_or(i64::from(status.as_u16())),
                body.status_message(),
            ));
        }

        if body.status.as_deref() == Some("error") {
            let message = body.status_message();
            // an empty window on a valid symbol is reported as an error by the API
            if message.to_ascii_lowercase().contains(NO_DATA_MARKER) {
                debug!(%symbol, %start, %end, "twelvedata returned no rows");
                return Ok(PriceSeries::default());
            }
            warn!(%symbol, code = ?body.code, "twelvedata error response");
            return Err(status_error(body.code.unwrap_or(0), message));
        }

        let mut points = Vec::new();
        for v in body.values.unwrap_or_default() {
            let day = v.datetime.get(..10).unwrap_or(v.datetime.as_str());
            let date = Date::parse(day).map_err(|_| {
                TraitError::ParseError(format!("twelvedata datetime: {}", v.datetime))
            })?;
            let close = v
                .close
                .trim()
                .parse::<f64>()
                .map_err(|_| TraitError::ParseError(format!("twelvedata close: {}", v.close)))?;
            if date >= start && date <= end {
                points.push(PricePoint::new(date, close));
            }
        }

        points.sort_by_key(|p| p.date);
        let series = PriceSeries::new(points)?;
        debug!(%symbol, rows = series.len(), "fetched twelvedata history");
        Ok(series)
    }
}

fn request_error(e: reqwest::Error) -> TraitError {
    if e.is_timeout() {
        TraitError::Timeout
    } else {
        TraitError::ConnectionFailed(format!("twelvedata request failed: {e}"))
    }
}

fn status_error(code: i64, message: String) -> TraitError {
    match code {
        401 | 403 => TraitError::AuthenticationFailed(message),
        429 => TraitError::RateLimited,
        // invalid symbols come back as 400 or 404 depending on the endpoint version
        404 => TraitError::NotFound(message),
        400 if message.to_ascii_lowercase().contains("symbol") => TraitError::NotFound(message),
        400 => TraitError::InvalidInput(message),
        _ => TraitError::SourceNotAvailable(format!("twelvedata code={code} {message}")),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TimeSeriesResponse {
    status: Option<String>,
    message: Option<String>,
    code: Option<i64>,
    values: Option<Vec<BarValue>>,
}

impl TimeSeriesResponse {
    fn status_message(&self) -> String {
        match (&self.code, &self.message) {
            (Some(c), Some(m)) => format!("code={c} {m}"),
            (_, Some(m)) => m.clone(),
            _ => "unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BarValue {
    datetime: String,
    close: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_trims_slash() {
        let source = TwelveDataPriceSource::new_with_base_url("k", "http://localhost:1/").unwrap();
        assert_eq!(source.time_series_url(), "http://localhost:1/time_series");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(status_error(401, "x".into()), TraitError::AuthenticationFailed(_)));
        assert!(matches!(status_error(429, "x".into()), TraitError::RateLimited));
        assert!(status_error(400, "**symbol** not found".into()).is_not_found());
        assert!(matches!(status_error(400, "bad date".into()), TraitError::InvalidInput(_)));
        assert!(matches!(status_error(500, "x".into()), TraitError::SourceNotAvailable(_)));
    }
}
