//! Figure payloads and renderer traits.
//!
//! The dashboard shows three figures:
//! - a price line chart
//! - a drawdown line chart
//! - a two-bar tail risk chart (VaR and CVaR)
//!
//! Renderers receive plain data; drawing is their concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use crate::ids::Symbol;
use tailrisk_core::Date;

// =============================================================================
// FIGURE PAYLOADS
// =============================================================================

/// One point on a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigurePoint {
    /// X axis
    pub date: Date,
    /// Y axis
    pub value: f64,
}

/// A single-series line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFigure {
    /// Chart title
    pub title: String,
    /// Legend label of the series
    pub series_name: String,
    /// Points in date order
    pub points: Vec<FigurePoint>,
}

impl LineFigure {
    /// Builds a line figure from `(date, value)` pairs.
    pub fn from_pairs<I>(title: impl Into<String>, series_name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        Self {
            title: title.into(),
            series_name: series_name.into(),
            points: pairs
                .into_iter()
                .map(|(date, value)| FigurePoint { date, value })
                .collect(),
        }
    }
}

/// One bar; `None` renders as a missing bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    /// Category label
    pub label: String,
    /// Bar height
    pub value: Option<f64>,
}

/// A categorical bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarFigure {
    /// Chart title
    pub title: String,
    /// Bars in display order
    pub bars: Vec<BarValue>,
}

impl BarFigure {
    /// Looks up a bar by label.
    pub fn bar(&self, label: &str) -> Option<&BarValue> {
        self.bars.iter().find(|b| b.label == label)
    }
}

/// The full set of figures produced by one dashboard refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFigures {
    /// Symbol the figures describe
    pub symbol: Symbol,
    /// Tail probability mass used for VaR/CVaR
    pub alpha: f64,
    /// Trigger generation that produced these figures
    pub generation: u64,
    /// Close price history
    pub price: LineFigure,
    /// Drawdown from running peak
    pub drawdown: LineFigure,
    /// VaR and CVaR bars
    pub tail_risk: BarFigure,
}

// =============================================================================
// RENDERER
// =============================================================================

/// Trait for figure renderers.
#[async_trait]
pub trait FigureRenderer: Send + Sync {
    /// Render the price chart.
    async fn render_price(&self, symbol: &Symbol, figure: &LineFigure) -> Result<(), TraitError>;

    /// Render the drawdown chart.
    async fn render_drawdown(&self, symbol: &Symbol, figure: &LineFigure)
        -> Result<(), TraitError>;

    /// Render the tail risk bar chart.
    async fn render_tail_risk(&self, symbol: &Symbol, figure: &BarFigure)
        -> Result<(), TraitError>;

    /// Render all three figures, stopping at the first failure.
    async fn render_all(&self, figures: &DashboardFigures) -> Result<(), TraitError> {
        self.render_price(&figures.symbol, &figures.price).await?;
        self.render_drawdown(&figures.symbol, &figures.drawdown)
            .await?;
        self.render_tail_risk(&figures.symbol, &figures.tail_risk)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FigureRenderer for Recorder {
        async fn render_price(&self, _: &Symbol, f: &LineFigure) -> Result<(), TraitError> {
            self.calls.lock().unwrap().push(f.title.clone());
            Ok(())
        }

        async fn render_drawdown(&self, _: &Symbol, f: &LineFigure) -> Result<(), TraitError> {
            self.calls.lock().unwrap().push(f.title.clone());
            Ok(())
        }

        async fn render_tail_risk(&self, _: &Symbol, f: &BarFigure) -> Result<(), TraitError> {
            self.calls.lock().unwrap().push(f.title.clone());
            Ok(())
        }
    }

    fn figures() -> DashboardFigures {
        let d = Date::from_ymd(2024, 1, 2).unwrap();
        DashboardFigures {
            symbol: Symbol::new("AAPL"),
            alpha: 0.05,
            generation: 1,
            price: LineFigure::from_pairs("Price", "Close", [(d, 100.0)]),
            drawdown: LineFigure::from_pairs("Drawdown", "Drawdown", [(d, 0.0)]),
            tail_risk: BarFigure {
                title: "Tail risk".into(),
                bars: vec![
                    BarValue { label: "VaR".into(), value: Some(0.02) },
                    BarValue { label: "CVaR".into(), value: None },
                ],
            },
        }
    }

    #[tokio::test]
    async fn test_render_all_order() {
        let recorder = Recorder::default();
        recorder.render_all(&figures()).await.unwrap();
        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["Price", "Drawdown", "Tail risk"]
        );
    }

    #[test]
    fn test_missing_bar_serializes_as_null() {
        let json = serde_json::to_value(figures()).unwrap();
        assert!(json["tail_risk"]["bars"][1]["value"].is_null());
        assert_eq!(json["symbol"], "AAPL");
        assert!(figures().tail_risk.bar("CVaR").unwrap().value.is_none());
    }
}
