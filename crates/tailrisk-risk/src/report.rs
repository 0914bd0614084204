//! One-shot risk report over a price series.

use serde::{Deserialize, Serialize};
use tailrisk_core::{
    ConfidenceLevel, DrawdownCurve, EquityCurve, PriceSeries, ReturnSeries, SeriesPoint,
    TailRiskResult,
};

use crate::drawdown::{drawdown_periods, DrawdownPeriod};
use crate::engine::RiskMetricsEngine;
use crate::returns::ReturnSeriesBuilder;
use crate::var::{QuantileMethod, RiskMetrics};

/// Everything derived from one price series at one confidence level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Simple returns.
    pub returns: ReturnSeries,
    /// Equity compounded from 1.0.
    pub equity: EquityCurve,
    /// Drawdown from the running peak.
    pub drawdown: DrawdownCurve,
    /// VaR and CVaR.
    pub metrics: RiskMetrics,
    /// Deepest drawdown point.
    pub max_drawdown: Option<SeriesPoint>,
    /// Compounded return over the whole series.
    pub total_return: Option<f64>,
    /// Drawdown episodes in chronological order.
    pub periods: Vec<DrawdownPeriod>,
}

impl RiskReport {
    /// Runs returns, equity, drawdown and VaR/CVaR in sequence.
    ///
    /// # Errors
    ///
    /// Propagates the first error from any stage unchanged.
    pub fn compute(
        prices: &PriceSeries,
        alpha: ConfidenceLevel,
        method: QuantileMethod,
    ) -> TailRiskResult<Self> {
        let returns = ReturnSeriesBuilder::build(prices)?;
        let equity = ReturnSeriesBuilder::cumulative_equity(&returns)?;
        let drawdown = RiskMetricsEngine::drawdown(&equity)?;
        let metrics = RiskMetricsEngine::new(method).tail_risk(&returns, alpha)?;

        Ok(Self {
            max_drawdown: drawdown.max_drawdown(),
            total_return: equity.total_return(),
            periods: drawdown_periods(&drawdown),
            returns,
            equity,
            drawdown,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tailrisk_core::{Date, TimeSeries};

    fn prices(values: &[f64]) -> PriceSeries {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        PriceSeries::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, &p)| (start.add_days(i as i64), p)),
        )
        .unwrap()
    }

    #[test]
    fn test_compute() {
        let report = RiskReport::compute(
            &prices(&[100.0, 102.0, 101.0, 105.0, 95.0]),
            ConfidenceLevel::new(0.25).unwrap(),
            QuantileMethod::Truncate,
        )
        .unwrap();

        assert_eq!(report.returns.len(), 4);
        assert_eq!(report.equity.len(), 4);
        assert_eq!(report.drawdown.len(), 4);
        assert_relative_eq!(report.total_return.unwrap(), -0.05, epsilon = 1e-12);
        assert_relative_eq!(
            report.max_drawdown.unwrap().value,
            95.0 / 105.0 - 1.0,
            epsilon = 1e-12
        );
        // k = floor(0.25 * 4) = 1
        assert_eq!(report.metrics.k, 1);
        assert_eq!(report.periods.len(), 2);
    }

    #[test]
    fn test_compute_propagates_insufficient_data() {
        let err = RiskReport::compute(
            &prices(&[100.0]),
            ConfidenceLevel::default(),
            QuantileMethod::Truncate,
        )
        .unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
