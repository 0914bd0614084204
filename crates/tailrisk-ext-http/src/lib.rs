//! # Tailrisk Ext HTTP
//!
//! Network price history for the Tailrisk dashboard.
//!
//! - [`TwelveDataPriceSource`]: daily closes from the Twelve Data
//!   `time_series` endpoint

#![warn(missing_docs)]
#![warn(clippy::all)]

mod twelve_data;

pub use twelve_data::{TwelveDataPriceSource, DEFAULT_BASE_URL};
