//! Figure assembly from a risk report.

use tailrisk_core::{PriceSeries, TimeSeries};
use tailrisk_risk::RiskReport;
use tailrisk_traits::output::{BarFigure, BarValue, DashboardFigures, LineFigure};
use tailrisk_traits::Symbol;

/// Bar label of the value-at-risk bar.
pub const VAR_LABEL: &str = "VaR";
/// Bar label of the expected-shortfall bar.
pub const CVAR_LABEL: &str = "CVaR";

/// Builds the three dashboard figures.
///
/// The price chart shows raw closes; the drawdown chart starts at the first
/// return date. An undefined CVaR becomes an empty bar.
pub fn build_figures(
    symbol: &Symbol,
    prices: &PriceSeries,
    report: &RiskReport,
    generation: u64,
) -> DashboardFigures {
    let alpha = report.metrics.alpha;

    let price = LineFigure::from_pairs(
        format!("{symbol} close"),
        "Price",
        prices.iter().map(|p| (p.date, p.close)),
    );

    let drawdown = LineFigure::from_pairs(
        format!("{symbol} drawdown"),
        "Drawdown",
        report.drawdown.points().iter().map(|p| (p.date, p.value)),
    );

    let tail_risk = BarFigure {
        title: format!("{symbol} historical tail risk (alpha = {alpha})"),
        bars: vec![
            BarValue {
                label: VAR_LABEL.to_string(),
                value: Some(report.metrics.var),
            },
            BarValue {
                label: CVAR_LABEL.to_string(),
                value: report.metrics.cvar,
            },
        ],
    };

    DashboardFigures {
        symbol: symbol.clone(),
        alpha,
        generation,
        price,
        drawdown,
        tail_risk,
    }
}
