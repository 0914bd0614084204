//! # tailrisk-risk
//!
//! Historical risk metrics computed from a daily price series.
//!
//! - **Returns**: [`ReturnSeriesBuilder`] turns prices into simple returns and
//!   compounds them into an equity curve
//! - **Drawdown**: running-peak drawdown and peak-to-recovery episodes
//! - **VaR / CVaR**: historical order-statistic estimates of the loss tail
//! - **Report**: [`RiskReport`] runs the whole pipeline in one call
//!
//! Every function here is pure and synchronous. Nothing is cached and nothing
//! is logged, so the crate can be called concurrently from any host without
//! synchronization.
//!
//! ## Example
//!
//! ```rust
//! use tailrisk_core::prelude::*;
//! use tailrisk_risk::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let prices = PriceSeries::from_pairs(
//!     [100.0, 102.0, 101.0, 105.0, 95.0]
//!         .iter()
//!         .enumerate()
//!         .map(|(i, &p)| (start.add_days(i as i64), p)),
//! )
//! .unwrap();
//!
//! let returns = ReturnSeriesBuilder::build(&prices).unwrap();
//! let equity = ReturnSeriesBuilder::cumulative_equity(&returns).unwrap();
//! let drawdown = RiskMetricsEngine::drawdown(&equity).unwrap();
//! let alpha = ConfidenceLevel::new(0.25).unwrap();
//! let metrics = RiskMetricsEngine::var_cvar(&returns, alpha).unwrap();
//!
//! assert_eq!(returns.len(), 4);
//! assert!(drawdown.values().iter().all(|&d| d <= 0.0));
//! assert!(metrics.var >= 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod drawdown;
pub mod engine;
pub mod report;
pub mod returns;
pub mod var;

pub use drawdown::{drawdown_periods, worst_drawdowns, DrawdownPeriod};
pub use engine::RiskMetricsEngine;
pub use report::RiskReport;
pub use returns::ReturnSeriesBuilder;
pub use var::{historical_var_cvar, QuantileMethod, RiskMetrics};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::drawdown::{drawdown_periods, worst_drawdowns, DrawdownPeriod};
    pub use crate::engine::RiskMetricsEngine;
    pub use crate::report::RiskReport;
    pub use crate::returns::ReturnSeriesBuilder;
    pub use crate::var::{historical_var_cvar, QuantileMethod, RiskMetrics};
}
