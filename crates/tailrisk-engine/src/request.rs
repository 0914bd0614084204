//! Dashboard triggers.

use serde::{Deserialize, Serialize};

use tailrisk_config::{DashboardConfig, MAX_CONFIDENCE_PCT, MIN_CONFIDENCE_PCT};
use tailrisk_core::ConfidenceLevel;
use tailrisk_traits::Symbol;

use crate::error::EngineError;

/// A (symbol, confidence slider) pair that asks for a dashboard refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Instrument to analyse.
    pub symbol: Symbol,
    /// Tail probability in whole percent, 1 to 10.
    pub confidence_pct: u8,
}

impl DashboardRequest {
    /// Validates a raw trigger.
    pub fn new(symbol: &str, confidence_pct: u8) -> Result<Self, EngineError> {
        let symbol =
            Symbol::parse(symbol).map_err(|e| EngineError::InvalidRequest(e.to_string()))?;
        if !(MIN_CONFIDENCE_PCT..=MAX_CONFIDENCE_PCT).contains(&confidence_pct) {
            return Err(EngineError::InvalidRequest(format!(
                "confidence must be between {MIN_CONFIDENCE_PCT} and {MAX_CONFIDENCE_PCT} percent, got {confidence_pct}"
            )));
        }
        Ok(Self {
            symbol,
            confidence_pct,
        })
    }

    /// The configured default trigger.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, EngineError> {
        Self::new(&config.default_symbol, config.default_confidence_pct)
    }

    /// Fills whatever the caller left out from the configuration.
    pub fn with_defaults(
        symbol: Option<&str>,
        confidence_pct: Option<u8>,
        config: &DashboardConfig,
    ) -> Result<Self, EngineError> {
        Self::new(
            symbol.unwrap_or(&config.default_symbol),
            confidence_pct.unwrap_or(config.default_confidence_pct),
        )
    }

    /// The slider value as a tail probability.
    pub fn alpha(&self) -> Result<ConfidenceLevel, EngineError> {
        Ok(ConfidenceLevel::from_percent(self.confidence_pct)?)
    }
}
