//! Simple returns and cumulative equity.

use tailrisk_core::{
    EquityCurve, PriceSeries, ReturnSeries, SeriesPoint, TailRiskError, TailRiskResult,
    TimeSeries,
};

/// Converts prices into returns and returns into an equity curve.
///
/// Stateless; both operations are deterministic functions of their input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnSeriesBuilder;

impl ReturnSeriesBuilder {
    /// Computes simple returns `p[i] / p[i-1] - 1` for `i = 1..n`.
    ///
    /// Each return is stamped with the date of the later price, so the
    /// result has `n - 1` points.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InsufficientData` when fewer than two prices
    /// are supplied. Prices are already known to be positive and ordered,
    /// since [`PriceSeries`] enforces both at construction.
    pub fn build(prices: &PriceSeries) -> TailRiskResult<ReturnSeries> {
        if prices.len() < 2 {
            return Err(TailRiskError::insufficient_data(
                2,
                prices.len(),
                "simple returns need two prices",
            ));
        }

        let points = prices
            .points()
            .windows(2)
            .map(|w| SeriesPoint::new(w[1].date, w[1].close / w[0].close - 1.0))
            .collect();

        ReturnSeries::new(points)
    }

    /// Compounds returns from a base of 1.0: `equity[i] = equity[i-1] * (1 + r[i])`.
    ///
    /// The seed is not emitted; the curve has the same length and dates as
    /// `returns`. An empty return series gives an empty curve.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` if compounding overflows.
    pub fn cumulative_equity(returns: &ReturnSeries) -> TailRiskResult<EquityCurve> {
        let points = returns
            .points()
            .iter()
            .scan(1.0_f64, |equity, r| {
                *equity *= 1.0 + r.value;
                Some(SeriesPoint::new(r.date, *equity))
            })
            .collect();

        EquityCurve::new(points)
    }
}

/// Simple returns over a bare slice of prices.
///
/// Empty when fewer than two prices are given.
#[must_use]
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Running product of `1 + r` over a bare slice of returns.
#[must_use]
pub fn compound(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0_f64, |equity, r| {
            *equity *= 1.0 + r;
            Some(*equity)
        })
        .collect()
}
