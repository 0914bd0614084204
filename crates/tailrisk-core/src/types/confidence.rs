//! Tail probability parameter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TailRiskError, TailRiskResult};

/// Left-tail probability mass `alpha` in the open interval (0, 1).
///
/// `alpha = 0.05` means the 5% worst days define the tail, i.e. a 95% VaR.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::types::ConfidenceLevel;
///
/// let alpha = ConfidenceLevel::from_percent(5).unwrap();
/// assert_eq!(alpha.percent(), 5.0);
/// assert!((alpha.confidence() - 0.95).abs() < 1e-12);
/// assert!(ConfidenceLevel::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Creates a confidence level from a tail probability.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` unless `0 < alpha < 1`.
    pub fn new(alpha: f64) -> TailRiskResult<Self> {
        if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(TailRiskError::invalid_parameter(
                "alpha",
                format!("must lie in the open interval (0, 1), got {alpha}"),
            ));
        }
        Ok(Self(alpha))
    }

    /// Creates a confidence level from a whole percentage, `alpha = pct / 100`.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` for 0 or for 100 and above.
    pub fn from_percent(pct: u8) -> TailRiskResult<Self> {
        Self::new(f64::from(pct) / 100.0)
    }

    /// Returns alpha.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns alpha expressed in percent, rounded to six decimals.
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.0 * 1e8).round() / 1e6
    }

    /// Returns the complementary confidence, `1 - alpha`.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        1.0 - self.0
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self(0.05)
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = TailRiskError;

    fn try_from(alpha: f64) -> Result<Self, Self::Error> {
        Self::new(alpha)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
