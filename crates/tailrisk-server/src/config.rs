//! Server configuration.

use serde::{Deserialize, Serialize};

use tailrisk_config::{DashboardConfig, Validate};

/// Server configuration.
///
/// ```toml
/// host = "127.0.0.1"
/// port = 8050
///
/// [dashboard]
/// default_symbol = "AAPL"
///
/// [dashboard.data]
/// kind = "csv"
/// dir = "data"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Dashboard defaults and price source
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, std::io::Error> {
        let config: Self = toml::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        config
            .dashboard
            .validate_or_error()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = ServerConfig::from_toml_str("port = 9000").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.dashboard.default_symbol, "AAPL");
    }

    #[test]
    fn test_nested_dashboard() {
        let config = ServerConfig::from_toml_str(
            r#"
            [dashboard]
            default_symbol = "SPY"
            default_confidence_pct = 1

            [dashboard.data]
            kind = "twelve_data"
            "#,
        )
        .unwrap();
        assert_eq!(config.dashboard.default_symbol, "SPY");
        assert_eq!(config.dashboard.data.kind(), "twelve_data");
    }

    #[test]
    fn test_invalid_dashboard_rejected() {
        let err = ServerConfig::from_toml_str("[dashboard]\ndefault_confidence_pct = 40").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
