//! Engine error types.

use thiserror::Error;

use tailrisk_config::ConfigError;
use tailrisk_core::TailRiskError;
use tailrisk_traits::TraitError;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The dashboard trigger was malformed (blank symbol, confidence off the slider)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The price source failed
    #[error("market data error: {0}")]
    MarketData(#[from] TraitError),

    /// The risk core rejected the fetched prices
    #[error("risk error: {0}")]
    Risk(#[from] TailRiskError),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The renderer failed
    #[error("render error: {0}")]
    Render(String),
}

impl EngineError {
    /// True when the price source does not know the symbol.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::MarketData(e) if e.is_not_found())
    }

    /// True when the caller can fix the failure by changing the request.
    pub fn is_client_error(&self) -> bool {
        match self {
            EngineError::InvalidRequest(_) | EngineError::Risk(_) => true,
            EngineError::MarketData(e) => matches!(e, TraitError::InvalidInput(_)),
            _ => false,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::ConfigError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let nf = EngineError::from(TraitError::NotFound("NOPE".into()));
        assert!(nf.is_not_found());
        assert!(!nf.is_client_error());

        let short = EngineError::from(TailRiskError::insufficient_data(2, 1, "prices"));
        assert!(short.is_client_error());
        assert!(!short.is_not_found());

        assert!(!EngineError::from(TraitError::Timeout).is_client_error());
        assert!(EngineError::InvalidRequest("x".into()).is_client_error());
    }
}
