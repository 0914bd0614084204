//! Risk metrics facade over drawdown and historical VaR.

use tailrisk_core::{
    ConfidenceLevel, DrawdownCurve, EquityCurve, ReturnSeries, TailRiskResult, TimeSeries,
};

use crate::drawdown;
use crate::var::{historical_var_cvar, QuantileMethod, RiskMetrics};

/// Produces drawdown curves and tail-risk metrics.
///
/// Holds only the quantile method; every call is independent of previous
/// calls, so one engine can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskMetricsEngine {
    method: QuantileMethod,
}

impl RiskMetricsEngine {
    /// Creates an engine using the given quantile method.
    #[must_use]
    pub fn new(method: QuantileMethod) -> Self {
        Self { method }
    }

    /// Returns the quantile method in use.
    #[must_use]
    pub fn method(&self) -> QuantileMethod {
        self.method
    }

    /// Drawdown of an equity curve from its running peak.
    pub fn drawdown(equity: &EquityCurve) -> TailRiskResult<DrawdownCurve> {
        drawdown::drawdown(equity)
    }

    /// Historical VaR and CVaR with the default truncating quantile.
    pub fn var_cvar(returns: &ReturnSeries, alpha: ConfidenceLevel) -> TailRiskResult<RiskMetrics> {
        Self::default().tail_risk(returns, alpha)
    }

    /// Historical VaR and CVaR with this engine's quantile method.
    pub fn tail_risk(
        &self,
        returns: &ReturnSeries,
        alpha: ConfidenceLevel,
    ) -> TailRiskResult<RiskMetrics> {
        historical_var_cvar(&returns.values(), alpha, self.method)
    }
}
