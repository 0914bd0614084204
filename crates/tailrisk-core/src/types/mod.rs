//! Domain types for historical risk analytics.
//!
//! - [`Date`]: Calendar date stamping each observation
//! - [`PriceSeries`]: Validated daily closes
//! - [`ReturnSeries`], [`EquityCurve`], [`DrawdownCurve`]: Series derived from prices
//! - [`ConfidenceLevel`]: Left-tail probability mass

mod confidence;
mod date;
mod price;
mod series;

pub use confidence::ConfidenceLevel;
pub use date::Date;
pub use price::{PricePoint, PriceSeries};
pub use series::{DrawdownCurve, EquityCurve, ReturnSeries, SeriesPoint, TimeSeries};
