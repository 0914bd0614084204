//! Drawdown from a running peak, and peak-to-recovery episodes.

use serde::{Deserialize, Serialize};
use tailrisk_core::{
    Date, DrawdownCurve, EquityCurve, SeriesPoint, TailRiskResult, TimeSeries,
};

/// Computes `equity[i] / max(equity[0..=i]) - 1` in a single forward pass.
///
/// The running maximum is seeded with the first equity value, so the first
/// drawdown is always 0, as is every point at the running peak, including a
/// peak of exactly zero. A point below a positive peak is at most a full `-1`
/// drawdown.
pub fn drawdown(equity: &EquityCurve) -> TailRiskResult<DrawdownCurve> {
    let mut peak = f64::NEG_INFINITY;
    let points = equity
        .points()
        .iter()
        .map(|p| {
            if p.value > peak {
                peak = p.value;
            }
            // equity is non-negative, so a point below the peak implies peak > 0
            let dd = if p.value >= peak {
                0.0
            } else {
                (p.value / peak - 1.0).min(0.0)
            };
            SeriesPoint::new(p.date, dd)
        })
        .collect();

    DrawdownCurve::new(points)
}

/// One drawdown episode: from the last peak, through the trough, to recovery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPeriod {
    /// Date of the peak the episode is measured from.
    pub peak: Date,
    /// First date below the peak.
    pub start: Date,
    /// Date of the deepest point.
    pub trough: Date,
    /// Date the previous peak was regained, if it was.
    pub recovery: Option<Date>,
    /// Deepest drawdown reached, as a negative fraction.
    pub depth: f64,
    /// Number of observations spent below the peak.
    pub length: usize,
}

impl DrawdownPeriod {
    /// Returns true if the equity regained its previous peak.
    #[must_use]
    pub fn is_recovered(&self) -> bool {
        self.recovery.is_some()
    }
}

/// Lists every drawdown episode in chronological order.
///
/// An episode opens on the first point below zero and closes on the first
/// point back at zero. An episode still open at the end of the curve has no
/// recovery date.
#[must_use]
pub fn drawdown_periods(curve: &DrawdownCurve) -> Vec<DrawdownPeriod> {
    let points = curve.points();
    let mut periods = Vec::new();
    let mut open: Option<DrawdownPeriod> = None;
    let mut peak_date = match points.first() {
        Some(p) => p.date,
        None => return periods,
    };

    for p in points {
        match open.as_mut() {
            None if p.value < 0.0 => {
                open = Some(DrawdownPeriod {
                    peak: peak_date,
                    start: p.date,
                    trough: p.date,
                    recovery: None,
                    depth: p.value,
                    length: 1,
                });
            }
            None => peak_date = p.date,
            Some(period) if p.value < 0.0 => {
                period.length += 1;
                if p.value < period.depth {
                    period.depth = p.value;
                    period.trough = p.date;
                }
            }
            Some(period) => {
                period.recovery = Some(p.date);
                periods.push(*period);
                open = None;
                peak_date = p.date;
            }
        }
    }

    if let Some(period) = open {
        periods.push(period);
    }
    periods
}

/// The `n` deepest episodes, deepest first. Ties keep chronological order.
#[must_use]
pub fn worst_drawdowns(curve: &DrawdownCurve, n: usize) -> Vec<DrawdownPeriod> {
    let mut periods = drawdown_periods(curve);
    periods.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    periods.truncate(n);
    periods
}
