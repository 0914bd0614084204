//! Value at Risk (VaR) and Conditional VaR (CVaR).
//!
//! Both are estimated non-parametrically from the empirical distribution of
//! historical returns and reported as non-negative loss magnitudes.

mod historical;

pub use historical::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the tail quantile is picked from the sorted returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileMethod {
    /// Exact order statistic at index `floor(alpha * n)`, no interpolation.
    #[default]
    Truncate,
    /// Linear interpolation between neighbouring order statistics at rank
    /// `alpha * (n - 1)`.
    Linear,
}

impl fmt::Display for QuantileMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncate => write!(f, "truncate"),
            Self::Linear => write!(f, "linear"),
        }
    }
}

impl std::str::FromStr for QuantileMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "linear" => Ok(Self::Linear),
            other => Err(format!("unknown quantile method '{other}'")),
        }
    }
}

/// Tail risk of a return series at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Value at Risk as a loss magnitude (`>= 0`).
    pub var: f64,
    /// Conditional VaR as a loss magnitude (`>= 0`).
    ///
    /// `None` when the tail below the VaR index is empty (k = 0); there is
    /// no data to average.
    pub cvar: Option<f64>,
    /// The raw return at the VaR quantile, before sign flip.
    pub var_return: f64,
    /// The raw mean of the tail returns, before sign flip.
    pub tail_mean: Option<f64>,
    /// Number of returns averaged into CVaR.
    pub k: usize,
    /// Number of returns in the sample.
    pub n: usize,
    /// Tail probability mass used.
    pub alpha: f64,
    /// Quantile selection method used.
    pub method: QuantileMethod,
}

impl RiskMetrics {
    /// CVaR, or NaN when undefined.
    #[must_use]
    pub fn cvar_or_nan(&self) -> f64 {
        self.cvar.unwrap_or(f64::NAN)
    }

    /// Returns true if CVaR could be computed.
    #[must_use]
    pub fn has_cvar(&self) -> bool {
        self.cvar.is_some()
    }
}

impl fmt::Display for RiskMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = (1.0 - self.alpha) * 100.0;
        match self.cvar {
            Some(cvar) => write!(
                f,
                "VaR({level:.0}%): {:.4}%, CVaR: {:.4}%",
                self.var * 100.0,
                cvar * 100.0
            ),
            None => write!(f, "VaR({level:.0}%): {:.4}%, CVaR: n/a", self.var * 100.0),
        }
    }
}
