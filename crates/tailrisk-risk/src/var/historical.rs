//! Historical VaR and CVaR.

use super::{QuantileMethod, RiskMetrics};
use tailrisk_core::{ConfidenceLevel, TailRiskError, TailRiskResult};

/// Calculate historical VaR and CVaR from a slice of returns.
///
/// # Arguments
///
/// * `returns` - Historical returns (as decimals, e.g., -0.01 for -1%)
/// * `alpha` - Left-tail probability mass
/// * `method` - Quantile selection
///
/// With [`QuantileMethod::Truncate`], returns are sorted ascending and
/// `k = floor(alpha * n)`: VaR is `-sorted[k]` and CVaR is the negated mean of
/// `sorted[..k]`. CVaR is `None` when `k = 0`.
///
/// With [`QuantileMethod::Linear`], the quantile is interpolated at rank
/// `alpha * (n - 1)` and CVaR averages every return at or below it, so it is
/// always defined.
///
/// Loss magnitudes are floored at zero; the signed values are kept in
/// `var_return` and `tail_mean`.
///
/// # Errors
///
/// Returns `TailRiskError::InsufficientData` for an empty slice and
/// `TailRiskError::InvalidParameter` if any return is NaN.
pub fn historical_var_cvar(
    returns: &[f64],
    alpha: ConfidenceLevel,
    method: QuantileMethod,
) -> TailRiskResult<RiskMetrics> {
    if returns.is_empty() {
        return Err(TailRiskError::insufficient_data(
            1,
            0,
            "VaR/CVaR need at least one return",
        ));
    }
    if returns.iter().any(|r| r.is_nan()) {
        return Err(TailRiskError::invalid_parameter(
            "returns",
            "NaN return in sample",
        ));
    }

    // Sort returns (ascending - worst returns first)
    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let a = alpha.value();

    let (var_return, tail): (f64, &[f64]) = match method {
        QuantileMethod::Truncate => {
            // alpha < 1 keeps k below n; the clamp guards float rounding
            let k = ((a * n as f64).floor() as usize).min(n - 1);
            (sorted[k], &sorted[..k])
        }
        QuantileMethod::Linear => {
            let q = linear_quantile(&sorted, a);
            let k = sorted.partition_point(|&r| r <= q);
            (q, &sorted[..k])
        }
    };

    let tail_mean = mean(tail);

    Ok(RiskMetrics {
        var: loss(var_return),
        cvar: tail_mean.map(loss),
        var_return,
        tail_mean,
        k: tail.len(),
        n,
        alpha: a,
        method,
    })
}

/// Empirical quantile of ascending `sorted` data at probability `p`,
/// interpolating linearly at rank `p * (n - 1)`.
///
/// `sorted` must be non-empty.
#[must_use]
pub fn linear_quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let w = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * w
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sign-flipped return as a non-negative loss.
fn loss(r: f64) -> f64 {
    if r < 0.0 {
        -r
    } else {
        0.0
    }
}
