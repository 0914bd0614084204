//! Tailrisk Configuration Layer
//!
//! Settings for the risk dashboard: the default symbol and confidence, the
//! price window, the quantile method and where price history is read from.
//!
//! Configuration is plain TOML. Every field has a default, so an empty file
//! is valid:
//!
//! ```toml
//! default_symbol = "AAPL"
//! default_confidence_pct = 5
//! start = "2018-01-01"
//! end = "2024-12-31"
//! quantile_method = "truncate"
//!
//! [data]
//! kind = "twelve_data"
//! api_key_env = "TWELVEDATA_API_KEY"
//! ```
//!
//! Loaded configurations are checked through [`Validate`] before use.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dashboard;
pub mod error;

pub use dashboard::{
    DashboardConfig, DataSourceConfig, DEFAULT_API_KEY_ENV, MAX_CONFIDENCE_PCT,
    MIN_CONFIDENCE_PCT,
};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
