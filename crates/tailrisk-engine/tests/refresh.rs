//! End-to-end refresh tests over in-memory collaborators.

use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use async_trait::async_trait;
use tokio::sync::Notify;

use tailrisk_config::DashboardConfig;
use tailrisk_core::{Date, PriceSeries};
use tailrisk_engine::{
    DashboardEngineBuilder, DashboardRequest, EngineError, RefreshOutcome, CVAR_LABEL, VAR_LABEL,
};
use tailrisk_ext_file::{EmptyRenderer, InMemoryPriceSource};
use tailrisk_risk::QuantileMethod;
use tailrisk_traits::market_data::{PriceSource, SourceType};
use tailrisk_traits::output::{BarFigure, FigureRenderer, LineFigure};
use tailrisk_traits::{Symbol, TraitError};

fn prices(values: &[f64]) -> PriceSeries {
    let start = Date::from_ymd(2024, 1, 1).unwrap();
    PriceSeries::from_pairs(
        values
            .iter()
            .enumerate()
            .map(|(i, &p)| (start.add_days(i as i64), p)),
    )
    .unwrap()
}

/// Records the symbol of every rendered figure.
#[derive(Default)]
struct Recorder {
    rendered: Mutex<Vec<String>>,
}

impl Recorder {
    fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl FigureRenderer for Recorder {
    async fn render_price(&self, symbol: &Symbol, _: &LineFigure) -> Result<(), TraitError> {
        self.rendered.lock().unwrap().push(format!("{symbol}:price"));
        Ok(())
    }

    async fn render_drawdown(&self, symbol: &Symbol, _: &LineFigure) -> Result<(), TraitError> {
        self.rendered.lock().unwrap().push(format!("{symbol}:drawdown"));
        Ok(())
    }

    async fn render_tail_risk(&self, symbol: &Symbol, _: &BarFigure) -> Result<(), TraitError> {
        self.rendered.lock().unwrap().push(format!("{symbol}:tail_risk"));
        Ok(())
    }
}

/// Holds back fetches for one symbol until released.
struct GatedSource {
    inner: InMemoryPriceSource,
    gated: Symbol,
    gate: Notify,
}

#[async_trait]
impl PriceSource for GatedSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    async fn get_prices(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<PriceSeries, TraitError> {
        if *symbol == self.gated {
            self.gate.notified().await;
        }
        self.inner.get_prices(symbol, start, end).await
    }
}

/// Holds back the first price render for one symbol until released.
struct GatedRenderer {
    inner: Recorder,
    gated: Symbol,
    gate: Notify,
}

#[async_trait]
impl FigureRenderer for GatedRenderer {
    async fn render_price(&self, symbol: &Symbol, figure: &LineFigure) -> Result<(), TraitError> {
        if *symbol == self.gated {
            self.gate.notified().await;
        }
        self.inner.render_price(symbol, figure).await
    }

    async fn render_drawdown(&self, symbol: &Symbol, figure: &LineFigure) -> Result<(), TraitError> {
        self.inner.render_drawdown(symbol, figure).await
    }

    async fn render_tail_risk(&self, symbol: &Symbol, figure: &BarFigure) -> Result<(), TraitError> {
        self.inner.render_tail_risk(symbol, figure).await
    }
}

fn memory_source() -> InMemoryPriceSource {
    InMemoryPriceSource::new()
        .with_series("AAPL", prices(&[100.0, 102.0, 101.0, 105.0, 95.0]))
        .with_series("SPY", prices(&[400.0, 404.0, 398.0, 402.0]))
        .with_series("ONE", prices(&[50.0]))
}

#[tokio::test]
async fn refresh_renders_all_three_figures() {
    let recorder = Arc::new(Recorder::default());
    let engine = DashboardEngineBuilder::new()
        .with_price_source(Arc::new(memory_source()))
        .with_renderer(recorder.clone())
        .build()
        .unwrap();

    let outcome = engine
        .refresh(DashboardRequest::new("aapl", 10).unwrap())
        .await
        .unwrap();

    let snapshot = outcome.snapshot().unwrap();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.figures.symbol.as_str(), "AAPL");
    assert_eq!(snapshot.figures.price.points.len(), 5);
    assert_eq!(snapshot.figures.drawdown.points.len(), 4);
    assert_relative_eq!(snapshot.figures.alpha, 0.1);
    assert_eq!(
        recorder.rendered(),
        vec!["AAPL:price", "AAPL:drawdown", "AAPL:tail_risk"]
    );

    // 4 returns at 10%: k = 0, so the tail is empty
    let bars = &snapshot.figures.tail_risk;
    assert!(bars.bar(VAR_LABEL).unwrap().value.is_some());
    assert_eq!(bars.bar(CVAR_LABEL).unwrap().value, None);
}

#[tokio::test]
async fn newer_trigger_supersedes_slow_one() {
    let source = Arc::new(GatedSource {
        inner: memory_source(),
        gated: Symbol::new("AAPL"),
        gate: Notify::new(),
    });
    let recorder = Arc::new(Recorder::default());
    let engine = DashboardEngineBuilder::new()
        .with_price_source(source.clone())
        .with_renderer(recorder.clone())
        .build()
        .unwrap();

    let slow = engine.refresh(DashboardRequest::new("AAPL", 5).unwrap());
    let fast = async {
        let outcome = engine.refresh(DashboardRequest::new("SPY", 5).unwrap()).await;
        source.gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(
        slow.unwrap(),
        RefreshOutcome::Superseded {
            generation: 1,
            latest: 2
        }
    );
    assert_eq!(fast.unwrap().snapshot().unwrap().generation, 2);
    assert!(recorder.rendered().iter().all(|r| r.starts_with("SPY:")));
    assert_eq!(engine.latest_generation(), 2);
}

#[tokio::test]
async fn slow_render_is_never_overwritten_by_an_older_one() {
    let renderer = Arc::new(GatedRenderer {
        inner: Recorder::default(),
        gated: Symbol::new("AAPL"),
        gate: Notify::new(),
    });
    let engine = DashboardEngineBuilder::new()
        .with_price_source(Arc::new(memory_source()))
        .with_renderer(renderer.clone())
        .build()
        .unwrap();

    // the first refresh passes its staleness check and stalls mid-render;
    // the second must wait for it instead of interleaving
    let first = engine.refresh(DashboardRequest::new("AAPL", 5).unwrap());
    let second = engine.refresh(DashboardRequest::new("SPY", 5).unwrap());
    let release = async { renderer.gate.notify_one() };
    let (first, second, ()) = tokio::join!(first, second, release);

    assert_eq!(first.unwrap().snapshot().unwrap().generation, 1);
    assert_eq!(second.unwrap().snapshot().unwrap().generation, 2);
    assert_eq!(
        renderer.inner.rendered(),
        vec![
            "AAPL:price",
            "AAPL:drawdown",
            "AAPL:tail_risk",
            "SPY:price",
            "SPY:drawdown",
            "SPY:tail_risk",
        ]
    );
}

#[tokio::test]
async fn provider_and_core_failures_propagate() {
    let engine = DashboardEngineBuilder::new()
        .with_price_source(Arc::new(memory_source()))
        .with_renderer(Arc::new(EmptyRenderer))
        .build()
        .unwrap();

    let err = engine
        .refresh(DashboardRequest::new("NOPE", 5).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = engine
        .compute(DashboardRequest::new("ONE", 5).unwrap())
        .await
        .unwrap_err();
    match err {
        EngineError::Risk(e) => assert!(e.is_insufficient_data()),
        other => panic!("expected risk error, got {other}"),
    }
}

#[tokio::test]
async fn compute_uses_configured_window_and_method() {
    let config = DashboardConfig::default()
        .with_window(
            Date::from_ymd(2024, 1, 2).unwrap(),
            Date::from_ymd(2024, 1, 4).unwrap(),
        )
        .with_quantile_method(QuantileMethod::Linear);
    let engine = DashboardEngineBuilder::new()
        .with_config(config)
        .with_price_source(Arc::new(memory_source()))
        .with_renderer(Arc::new(EmptyRenderer))
        .build()
        .unwrap();

    let snapshot = engine
        .compute(DashboardRequest::new("SPY", 5).unwrap())
        .await
        .unwrap();

    assert_eq!(snapshot.generation, 0);
    assert_eq!(snapshot.figures.price.points.len(), 3);
    assert_eq!(snapshot.report.metrics.method, QuantileMethod::Linear);
    assert_eq!(engine.latest_generation(), 0);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["request"]["symbol"], "SPY");
}

#[test]
fn builder_requires_collaborators() {
    assert!(matches!(
        DashboardEngineBuilder::new().build(),
        Err(EngineError::ConfigError(_))
    ));

    let invalid = DashboardConfig::default().with_default_confidence_pct(0);
    let err = DashboardEngineBuilder::new()
        .with_config(invalid)
        .with_price_source(Arc::new(InMemoryPriceSource::new()))
        .with_renderer(Arc::new(EmptyRenderer))
        .build();
    assert!(matches!(err, Err(EngineError::ConfigError(_))));
}
