//! # Tailrisk Core
//!
//! Core types and the error taxonomy for the Tailrisk historical risk library.
//!
//! This crate provides the plain data that flows through the risk pipeline:
//!
//! - **Prices**: [`PriceSeries`], an ordered, validated sequence of daily closes
//! - **Derived series**: [`ReturnSeries`], [`EquityCurve`] and [`DrawdownCurve`]
//! - **Parameters**: [`ConfidenceLevel`], the left-tail probability mass `alpha`
//! - **Errors**: [`TailRiskError`], raised synchronously and never retried
//!
//! ## Design Philosophy
//!
//! - **Validated at construction**: a `PriceSeries` or `ConfidenceLevel` that exists is valid
//! - **Immutable**: series are never mutated after they are built
//! - **No I/O**: nothing in this crate reads files, talks to the network or logs
//!
//! ## Example
//!
//! ```rust
//! use tailrisk_core::prelude::*;
//!
//! let d1 = Date::from_ymd(2024, 1, 2).unwrap();
//! let d2 = Date::from_ymd(2024, 1, 3).unwrap();
//! let prices = PriceSeries::new(vec![
//!     PricePoint::new(d1, 100.0),
//!     PricePoint::new(d2, 102.0),
//! ])
//! .unwrap();
//! assert_eq!(prices.len(), 2);
//!
//! let alpha = ConfidenceLevel::from_percent(5).unwrap();
//! assert!((alpha.value() - 0.05).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{TailRiskError, TailRiskResult};
    pub use crate::types::{
        ConfidenceLevel, Date, DrawdownCurve, EquityCurve, PricePoint, PriceSeries, ReturnSeries,
        SeriesPoint, TimeSeries,
    };
}

// Re-export commonly used types at crate root
pub use error::{TailRiskError, TailRiskResult};
pub use types::{
    ConfidenceLevel, Date, DrawdownCurve, EquityCurve, PricePoint, PriceSeries, ReturnSeries,
    SeriesPoint, TimeSeries,
};
