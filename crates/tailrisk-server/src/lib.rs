//! # Tailrisk Server
//!
//! HTTP JSON server for the Tailrisk risk dashboard.
//!
//! ## Endpoints
//!
//! - `GET /health`, `GET /api/v1/health`
//! - `GET /api/v1/dashboard?symbol=AAPL&confidence=5`: price, drawdown and
//!   tail risk figures
//! - `GET /api/v1/risk?symbol=AAPL&confidence=5`: VaR/CVaR with a drawdown
//!   summary
//!
//! Omitted query parameters fall back to the configured defaults.
//!
//! ## Usage
//!
//! ```ignore
//! use tailrisk_server::Server;
//!
//! let server = Server::new(config, engine);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use tailrisk_engine::DashboardEngine;

pub use config::ServerConfig;

/// The Tailrisk server.
pub struct Server {
    config: ServerConfig,
    engine: Arc<DashboardEngine>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, engine: Arc<DashboardEngine>) -> Self {
        Self { config, engine }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.engine.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Address the server binds to.
    pub fn addr(&self) -> Result<SocketAddr, std::io::Error> {
        let ip: IpAddr = self.config.host.parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid host '{}'", self.config.host),
            )
        })?;
        Ok(SocketAddr::new(ip, self.config.port))
    }

    /// Bind and serve until the process stops.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, symbol = %self.engine.config().default_symbol, "tailrisk server listening");
        axum::serve(listener, self.router()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailrisk_engine::DashboardEngineBuilder;
    use tailrisk_ext_file::{EmptyRenderer, InMemoryPriceSource};

    fn server(host: &str) -> Server {
        let engine = DashboardEngineBuilder::new()
            .with_price_source(Arc::new(InMemoryPriceSource::new()))
            .with_renderer(Arc::new(EmptyRenderer))
            .build()
            .unwrap();
        let config = ServerConfig {
            host: host.to_string(),
            ..ServerConfig::default()
        };
        Server::new(config, Arc::new(engine))
    }

    #[test]
    fn test_addr() {
        assert_eq!(server("127.0.0.1").addr().unwrap().to_string(), "127.0.0.1:8050");
        assert!(server("localhost:80").addr().is_err());
    }
}
