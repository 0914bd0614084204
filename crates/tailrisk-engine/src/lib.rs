//! # Tailrisk Engine
//!
//! The dashboard engine for Tailrisk.
//!
//! A trigger (symbol, confidence slider) flows through:
//!
//! ```text
//! DashboardRequest ─> PriceSource ─> PriceSeries
//!                                        │
//!                                        └─> RiskReport ─> DashboardFigures ─> FigureRenderer
//! ```
//!
//! Every refresh is tagged with a generation. When a newer trigger starts
//! before an older one finishes, the older result is dropped instead of
//! being rendered over the newer one.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = DashboardEngineBuilder::new()
//!     .with_config(config)
//!     .with_price_source(source)
//!     .with_renderer(renderer)
//!     .build()?;
//!
//! let outcome = engine.refresh(DashboardRequest::new("AAPL", 5)?).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod error;
pub mod figures;
pub mod request;

pub use builder::DashboardEngineBuilder;
pub use error::EngineError;
pub use figures::{build_figures, CVAR_LABEL, VAR_LABEL};
pub use request::DashboardRequest;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use tailrisk_config::DashboardConfig;
use tailrisk_risk::RiskReport;
use tailrisk_traits::market_data::PriceSource;
use tailrisk_traits::output::{DashboardFigures, FigureRenderer};

/// Everything one dashboard refresh produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// The trigger that was served.
    pub request: DashboardRequest,
    /// Generation of the trigger.
    pub generation: u64,
    /// Figures handed to the renderer.
    pub figures: DashboardFigures,
    /// Full risk report behind the figures.
    pub report: RiskReport,
}

/// Result of [`DashboardEngine::refresh`].
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Figures were rendered.
    Rendered(Box<DashboardSnapshot>),
    /// A newer trigger started while this one was in flight; nothing was rendered.
    Superseded {
        /// Generation of this trigger.
        generation: u64,
        /// Newest generation at the time the result was ready.
        latest: u64,
    },
}

impl RefreshOutcome {
    /// The snapshot, if the figures were rendered.
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match self {
            RefreshOutcome::Rendered(s) => Some(&**s),
            RefreshOutcome::Superseded { .. } => None,
        }
    }

    /// True when the result was dropped in favour of a newer trigger.
    pub fn is_superseded(&self) -> bool {
        matches!(self, RefreshOutcome::Superseded { .. })
    }
}

/// Orchestrates price fetch, risk computation and rendering.
pub struct DashboardEngine {
    config: DashboardConfig,
    source: Arc<dyn PriceSource>,
    renderer: Arc<dyn FigureRenderer>,
    generation: AtomicU64,
    render_lock: Mutex<()>,
}

impl DashboardEngine {
    /// Create a new engine. Prefer [`DashboardEngineBuilder`].
    pub fn new(
        config: DashboardConfig,
        source: Arc<dyn PriceSource>,
        renderer: Arc<dyn FigureRenderer>,
    ) -> Self {
        Self {
            config,
            source,
            renderer,
            generation: AtomicU64::new(0),
            render_lock: Mutex::new(()),
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Newest generation handed out so far (0 before the first refresh).
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Serves a trigger end to end.
    ///
    /// The result is rendered only if no newer trigger started meanwhile.
    /// Renders are serialized, so an older render never lands after a newer one.
    pub async fn refresh(&self, request: DashboardRequest) -> Result<RefreshOutcome, EngineError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            symbol = %request.symbol,
            confidence_pct = request.confidence_pct,
            generation,
            "dashboard refresh started"
        );

        let (figures, report) = self.run(&request, generation).await?;

        // staleness is decided under the lock that orders renders
        let _render = self.render_lock.lock().await;
        let latest = self.latest_generation();
        if latest != generation {
            warn!(symbol = %request.symbol, generation, latest, "dropping superseded refresh");
            return Ok(RefreshOutcome::Superseded { generation, latest });
        }

        self.renderer
            .render_all(&figures)
            .await
            .map_err(|e| EngineError::Render(e.to_string()))?;

        info!(
            symbol = %request.symbol,
            generation,
            var = report.metrics.var,
            cvar = ?report.metrics.cvar,
            "dashboard refresh rendered"
        );

        Ok(RefreshOutcome::Rendered(Box::new(DashboardSnapshot {
            request,
            generation,
            figures,
            report,
        })))
    }

    /// Fetches and computes without rendering or generation checks.
    ///
    /// The snapshot carries generation 0.
    pub async fn compute(&self, request: DashboardRequest) -> Result<DashboardSnapshot, EngineError> {
        let (figures, report) = self.run(&request, 0).await?;
        Ok(DashboardSnapshot {
            request,
            generation: 0,
            figures,
            report,
        })
    }

    async fn run(
        &self,
        request: &DashboardRequest,
        generation: u64,
    ) -> Result<(DashboardFigures, RiskReport), EngineError> {
        let alpha = request.alpha()?;

        let prices = self
            .source
            .get_prices(&request.symbol, self.config.start, self.config.end)
            .await
            .map_err(|e| {
                warn!(symbol = %request.symbol, error = %e, "price fetch failed");
                EngineError::MarketData(e)
            })?;
        debug!(
            symbol = %request.symbol,
            rows = prices.len(),
            start = %self.config.start,
            end = %self.config.end,
            "fetched prices"
        );

        let report = RiskReport::compute(&prices, alpha, self.config.quantile_method)?;
        debug!(
            symbol = %request.symbol,
            returns = report.metrics.n,
            k = report.metrics.k,
            "computed risk report"
        );

        let figures = build_figures(&request.symbol, &prices, &report, generation);
        Ok((figures, report))
    }
}
