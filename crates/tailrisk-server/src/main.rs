//! Tailrisk dashboard server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tailrisk_config::DataSourceConfig;
use tailrisk_engine::DashboardEngineBuilder;
use tailrisk_ext_file::{create_csv_price_source, EmptyRenderer};
use tailrisk_ext_http::TwelveDataPriceSource;
use tailrisk_server::{Server, ServerConfig};
use tailrisk_traits::market_data::PriceSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tailrisk=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Tailrisk Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/tailrisk.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    let dashboard = &server_config.dashboard;
    let source: Arc<dyn PriceSource> = match &dashboard.data {
        DataSourceConfig::Csv { dir } => {
            info!("Reading prices from {}", dir.display());
            create_csv_price_source(dir)?
        }
        DataSourceConfig::TwelveData { base_url, .. } => {
            let api_key = dashboard
                .data
                .api_key()?
                .ok_or("twelve_data source needs an API key")?;
            info!("Fetching prices from Twelve Data");
            match base_url {
                Some(url) => Arc::new(TwelveDataPriceSource::new_with_base_url(api_key, url.as_str())?),
                None => Arc::new(TwelveDataPriceSource::new(api_key)?),
            }
        }
    };

    // Figures are returned over HTTP, nothing is drawn server side
    let engine = DashboardEngineBuilder::new()
        .with_config(dashboard.clone())
        .with_price_source(source)
        .with_renderer(Arc::new(EmptyRenderer))
        .build()?;

    let server = Server::new(server_config, Arc::new(engine));
    server.start().await?;

    Ok(())
}
