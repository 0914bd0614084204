//! File-based figure renderers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use tailrisk_traits::error::TraitError;
use tailrisk_traits::ids::Symbol;
use tailrisk_traits::output::{BarFigure, DashboardFigures, FigureRenderer, LineFigure};

/// Writes each figure as pretty JSON under a directory.
///
/// Files are named `<SYMBOL>_price.json`, `<SYMBOL>_drawdown.json` and
/// `<SYMBOL>_tail_risk.json`; [`render_all`](FigureRenderer::render_all)
/// additionally writes the combined `<SYMBOL>_dashboard.json`.
pub struct JsonFigureWriter {
    dir: PathBuf,
}

impl JsonFigureWriter {
    /// Create a writer, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, TraitError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of one figure file.
    pub fn path_for(&self, symbol: &Symbol, figure: &str) -> PathBuf {
        self.dir.join(format!("{}_{figure}.json", symbol.as_str()))
    }

    async fn write<T: Serialize + Sync>(
        &self,
        symbol: &Symbol,
        figure: &str,
        value: &T,
    ) -> Result<(), TraitError> {
        let body = serde_json::to_vec_pretty(value)
            .map_err(|e| TraitError::SerializationError(e.to_string()))?;
        let path = self.path_for(symbol, figure);
        tokio::fs::write(&path, body).await?;
        debug!(%symbol, path = %path.display(), "wrote figure");
        Ok(())
    }
}

#[async_trait]
impl FigureRenderer for JsonFigureWriter {
    async fn render_price(&self, symbol: &Symbol, figure: &LineFigure) -> Result<(), TraitError> {
        self.write(symbol, "price", figure).await
    }

    async fn render_drawdown(
        &self,
        symbol: &Symbol,
        figure: &LineFigure,
    ) -> Result<(), TraitError> {
        self.write(symbol, "drawdown", figure).await
    }

    async fn render_tail_risk(
        &self,
        symbol: &Symbol,
        figure: &BarFigure,
    ) -> Result<(), TraitError> {
        self.write(symbol, "tail_risk", figure).await
    }

    async fn render_all(&self, figures: &DashboardFigures) -> Result<(), TraitError> {
        self.render_price(&figures.symbol, &figures.price).await?;
        self.render_drawdown(&figures.symbol, &figures.drawdown)
            .await?;
        self.render_tail_risk(&figures.symbol, &figures.tail_risk)
            .await?;
        self.write(&figures.symbol, "dashboard", figures).await
    }
}

/// Renderer that discards every figure.
pub struct EmptyRenderer;

#[async_trait]
impl FigureRenderer for EmptyRenderer {
    async fn render_price(&self, _: &Symbol, _: &LineFigure) -> Result<(), TraitError> {
        Ok(())
    }

    async fn render_drawdown(&self, _: &Symbol, _: &LineFigure) -> Result<(), TraitError> {
        Ok(())
    }

    async fn render_tail_risk(&self, _: &Symbol, _: &BarFigure) -> Result<(), TraitError> {
        Ok(())
    }
}
