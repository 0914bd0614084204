//! Property-based tests for the risk pipeline.
//!
//! These tests verify properties that should hold for any valid price path:
//! - Recomputing gives bit-identical output
//! - Returns and equity have one point fewer than prices
//! - Drawdown never exceeds zero and is zero at every new peak
//! - VaR and CVaR are non-negative, with CVaR at least VaR
//! - A smaller alpha never lowers VaR or CVaR

use proptest::prelude::*;
use tailrisk_core::prelude::*;
use tailrisk_risk::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn price_series(closes: &[f64]) -> PriceSeries {
    let start = Date::from_ymd(2018, 1, 1).unwrap();
    PriceSeries::from_pairs(
        closes
            .iter()
            .enumerate()
            .map(|(i, &p)| (start.add_days(i as i64), p)),
    )
    .unwrap()
}

fn closes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0_f64..1_000.0, 2..250)
}

fn returns_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.5_f64..0.5, 1..250)
}

const TOL: f64 = 1e-12;

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn pipeline_is_idempotent(closes in closes_strategy(), pct in 1u8..=10) {
        let prices = price_series(&closes);
        let alpha = ConfidenceLevel::from_percent(pct).unwrap();

        let first = RiskReport::compute(&prices, alpha, QuantileMethod::Truncate).unwrap();
        let second = RiskReport::compute(&prices, alpha, QuantileMethod::Truncate).unwrap();

        prop_assert_eq!(&first.returns, &second.returns);
        prop_assert_eq!(&first.equity, &second.equity);
        prop_assert_eq!(&first.drawdown, &second.drawdown);
        prop_assert_eq!(first.metrics.var.to_bits(), second.metrics.var.to_bits());
        prop_assert_eq!(
            first.metrics.cvar.map(f64::to_bits),
            second.metrics.cvar.map(f64::to_bits)
        );
    }

    #[test]
    fn returns_and_equity_lengths(closes in closes_strategy()) {
        let prices = price_series(&closes);
        let returns = ReturnSeriesBuilder::build(&prices).unwrap();
        let equity = ReturnSeriesBuilder::cumulative_equity(&returns).unwrap();

        prop_assert_eq!(returns.len(), closes.len() - 1);
        prop_assert_eq!(equity.len(), closes.len() - 1);
        prop_assert_eq!(returns.dates(), equity.dates());
    }

    #[test]
    fn drawdown_bounded_and_zero_at_peaks(closes in closes_strategy()) {
        let prices = price_series(&closes);
        let returns = ReturnSeriesBuilder::build(&prices).unwrap();
        let equity = ReturnSeriesBuilder::cumulative_equity(&returns).unwrap().values();
        let dd = RiskMetricsEngine::drawdown(
            &ReturnSeriesBuilder::cumulative_equity(&returns).unwrap(),
        )
        .unwrap()
        .values();

        let mut peak = f64::NEG_INFINITY;
        for (e, d) in equity.iter().zip(&dd) {
            prop_assert!(*d <= 0.0);
            if *e >= peak {
                peak = *e;
                prop_assert_eq!(*d, 0.0);
            }
        }
    }

    #[test]
    fn var_and_cvar_non_negative(returns in returns_strategy(), a in 0.001_f64..0.999) {
        let alpha = ConfidenceLevel::new(a).unwrap();
        for method in [QuantileMethod::Truncate, QuantileMethod::Linear] {
            let m = historical_var_cvar(&returns, alpha, method).unwrap();
            prop_assert!(m.var >= 0.0);
            if let Some(cvar) = m.cvar {
                prop_assert!(cvar >= 0.0);
                prop_assert!(cvar + TOL >= m.var);
            }
            prop_assert!(m.k < m.n || method == QuantileMethod::Linear);
        }
    }

    #[test]
    fn tail_risk_monotone_in_alpha(
        returns in returns_strategy(),
        a in 0.001_f64..0.999,
        b in 0.001_f64..0.999,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let strict = historical_var_cvar(&returns, ConfidenceLevel::new(lo).unwrap(), QuantileMethod::Truncate).unwrap();
        let loose = historical_var_cvar(&returns, ConfidenceLevel::new(hi).unwrap(), QuantileMethod::Truncate).unwrap();

        prop_assert!(strict.var + TOL >= loose.var);
        if let (Some(s), Some(l)) = (strict.cvar, loose.cvar) {
            prop_assert!(s + TOL >= l);
        }
    }
}

#[test]
fn single_price_is_insufficient() {
    let err = ReturnSeriesBuilder::build(&price_series(&[100.0])).unwrap_err();
    assert!(err.is_insufficient_data());
}
