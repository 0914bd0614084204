//! Builder pattern for the dashboard engine.

use std::sync::Arc;

use tailrisk_config::{DashboardConfig, Validate};
use tailrisk_traits::market_data::PriceSource;
use tailrisk_traits::output::FigureRenderer;

use crate::error::EngineError;
use crate::DashboardEngine;

/// Builder for constructing a [`DashboardEngine`].
pub struct DashboardEngineBuilder {
    config: Option<DashboardConfig>,
    source: Option<Arc<dyn PriceSource>>,
    renderer: Option<Arc<dyn FigureRenderer>>,
}

impl DashboardEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            source: None,
            renderer: None,
        }
    }

    /// Set the dashboard configuration.
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the price source.
    pub fn with_price_source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the figure renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn FigureRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Build the dashboard engine.
    pub fn build(self) -> Result<DashboardEngine, EngineError> {
        let config = self.config.unwrap_or_default();
        config.validate_or_error()?;

        let source = self
            .source
            .ok_or_else(|| EngineError::ConfigError("price_source not configured".into()))?;

        let renderer = self
            .renderer
            .ok_or_else(|| EngineError::ConfigError("renderer not configured".into()))?;

        Ok(DashboardEngine::new(config, source, renderer))
    }
}

impl Default for DashboardEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
