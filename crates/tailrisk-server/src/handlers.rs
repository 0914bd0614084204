//! Request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use tailrisk_core::{Date, SeriesPoint};
use tailrisk_engine::{DashboardEngine, DashboardRequest, DashboardSnapshot, EngineError};
use tailrisk_risk::{worst_drawdowns, DrawdownPeriod, RiskMetrics};
use tailrisk_traits::output::DashboardFigures;

/// Number of drawdown episodes listed by the risk endpoint.
const WORST_DRAWDOWNS: usize = 5;

/// Application state.
pub struct AppState {
    /// The dashboard engine
    pub engine: Arc<DashboardEngine>,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Engine failure mapped to an HTTP status.
pub struct ApiError(EngineError);

impl ApiError {
    fn status(&self) -> StatusCode {
        if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if matches!(self.0, EngineError::MarketData(_)) {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, %status, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Query parameters shared by the dashboard endpoints.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Ticker symbol. Defaults to the configured symbol.
    pub symbol: Option<String>,
    /// Tail probability in percent (1-10). Defaults to the configured value.
    pub confidence: Option<u8>,
}

async fn snapshot(state: &AppState, query: &DashboardQuery) -> Result<DashboardSnapshot, ApiError> {
    let request = DashboardRequest::with_defaults(
        query.symbol.as_deref(),
        query.confidence,
        state.engine.config(),
    )?;
    Ok(state.engine.compute(request).await?)
}

/// The three dashboard figures for a symbol.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardFigures>, ApiError> {
    let snapshot = snapshot(&state, &query).await?;
    Ok(Json(snapshot.figures))
}

/// Tail risk and drawdown summary response.
#[derive(Debug, Serialize)]
pub struct RiskResponse {
    /// Normalized symbol
    pub symbol: String,
    /// First date of the price window
    pub start: Date,
    /// Last date of the price window
    pub end: Date,
    /// VaR/CVaR and sample details
    pub metrics: RiskMetrics,
    /// Compounded return over the window
    pub total_return: Option<f64>,
    /// Deepest drawdown point
    pub max_drawdown: Option<SeriesPoint>,
    /// Deepest drawdown episodes, worst first
    pub worst_drawdowns: Vec<DrawdownPeriod>,
}

/// VaR, CVaR and drawdown summary for a symbol.
pub async fn risk(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<RiskResponse>, ApiError> {
    let snapshot = snapshot(&state, &query).await?;
    let config = state.engine.config();
    let report = &snapshot.report;

    Ok(Json(RiskResponse {
        symbol: snapshot.request.symbol.to_string(),
        start: config.start,
        end: config.end,
        metrics: report.metrics,
        total_return: report.total_return,
        max_drawdown: report.max_drawdown,
        worst_drawdowns: worst_drawdowns(&report.drawdown, WORST_DRAWDOWNS),
    }))
}
