//! Dashboard configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tailrisk_core::{ConfidenceLevel, Date};
use tailrisk_risk::QuantileMethod;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Smallest confidence slider value, in percent.
pub const MIN_CONFIDENCE_PCT: u8 = 1;
/// Largest confidence slider value, in percent.
pub const MAX_CONFIDENCE_PCT: u8 = 10;

/// Environment variable holding the Twelve Data API key by default.
pub const DEFAULT_API_KEY_ENV: &str = "TWELVEDATA_API_KEY";

// =============================================================================
// DATA SOURCE
// =============================================================================

/// Where price history comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSourceConfig {
    /// One `<SYMBOL>.csv` file per symbol under `dir`.
    Csv {
        /// Directory holding the price files.
        dir: PathBuf,
    },
    /// Twelve Data HTTP time-series API.
    TwelveData {
        /// Override of the API base URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
        /// Environment variable the API key is read from.
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
    },
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self::Csv {
            dir: PathBuf::from("data"),
        }
    }
}

impl DataSourceConfig {
    /// Reads the API key for an HTTP source from the environment.
    ///
    /// Returns `Ok(None)` for sources that need no key.
    pub fn api_key(&self) -> ConfigResult<Option<String>> {
        match self {
            Self::Csv { .. } => Ok(None),
            Self::TwelveData { api_key_env, .. } => match std::env::var(api_key_env) {
                Ok(key) if !key.trim().is_empty() => Ok(Some(key)),
                _ => Err(ConfigError::MissingEnv {
                    var: api_key_env.clone(),
                }),
            },
        }
    }

    /// Short name of the source kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Csv { .. } => "csv",
            Self::TwelveData { .. } => "twelve_data",
        }
    }
}

// =============================================================================
// DASHBOARD CONFIG
// =============================================================================

/// Settings for the risk dashboard.
///
/// # Example
///
/// ```rust
/// use tailrisk_config::{DashboardConfig, Validate};
///
/// let config = DashboardConfig::from_toml_str(r#"
///     default_symbol = "msft"
///     default_confidence_pct = 2
///     start = "2020-01-01"
///     end = "2023-12-31"
///
///     [data]
///     kind = "csv"
///     dir = "prices"
/// "#).unwrap();
///
/// assert_eq!(config.default_symbol, "msft");
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Symbol shown when none is requested.
    pub default_symbol: String,
    /// Confidence slider value used when none is requested, in percent.
    pub default_confidence_pct: u8,
    /// First date of the price window (inclusive).
    pub start: Date,
    /// Last date of the price window (inclusive).
    pub end: Date,
    /// Quantile selection for VaR/CVaR.
    pub quantile_method: QuantileMethod,
    /// Price history source.
    pub data: DataSourceConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbol: "AAPL".to_string(),
            default_confidence_pct: 5,
            start: Date::from(default_start()),
            end: Date::from(default_end()),
            quantile_method: QuantileMethod::Truncate,
            data: DataSourceConfig::default(),
        }
    }
}

fn default_start() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default()
}

fn default_end() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default()
}

impl DashboardConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                key: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Sets the default symbol.
    pub fn with_default_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.default_symbol = symbol.into();
        self
    }

    /// Sets the default confidence slider value.
    pub fn with_default_confidence_pct(mut self, pct: u8) -> Self {
        self.default_confidence_pct = pct;
        self
    }

    /// Sets the price window.
    pub fn with_window(mut self, start: Date, end: Date) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Sets the quantile method.
    pub fn with_quantile_method(mut self, method: QuantileMethod) -> Self {
        self.quantile_method = method;
        self
    }

    /// Sets the data source.
    pub fn with_data(mut self, data: DataSourceConfig) -> Self {
        self.data = data;
        self
    }

    /// The default confidence as a tail probability.
    pub fn default_alpha(&self) -> ConfigResult<ConfidenceLevel> {
        ConfidenceLevel::from_percent(self.default_confidence_pct).map_err(|e| {
            ConfigError::Validation {
                field: "default_confidence_pct".into(),
                message: e.to_string(),
            }
        })
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.default_symbol.trim().is_empty() {
            errors.push(ValidationError::new(
                "default_symbol",
                "Default symbol cannot be empty",
            ));
        }

        if !(MIN_CONFIDENCE_PCT..=MAX_CONFIDENCE_PCT).contains(&self.default_confidence_pct) {
            errors.push(ValidationError::with_rule(
                "default_confidence_pct",
                format!(
                    "Confidence must be between {MIN_CONFIDENCE_PCT} and {MAX_CONFIDENCE_PCT} percent"
                ),
                "confidence_range",
            ));
        }

        if self.start >= self.end {
            errors.push(ValidationError::with_rule(
                "start",
                format!("Start {} must be before end {}", self.start, self.end),
                "ordered_window",
            ));
        }

        if let DataSourceConfig::TwelveData { api_key_env, .. } = &self.data {
            if api_key_env.trim().is_empty() {
                errors.push(ValidationError::new(
                    "data.api_key_env",
                    "API key variable name cannot be empty",
                ));
            }
        }

        errors
    }
}
