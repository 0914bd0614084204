//! # Tailrisk Traits
//!
//! Trait definitions for the Tailrisk dashboard engine.
//!
//! This crate contains ONLY trait definitions and the plain data they
//! exchange. All implementations are in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`market_data`]: Price history sources
//! - [`output`]: Figure payloads and renderers
//! - [`ids`]: Ticker symbols
//!
//! ## Dependency Injection
//!
//! The dashboard engine uses these traits via dependency injection:
//!
//! ```ignore
//! DashboardEngineBuilder::new()
//!     .with_price_source(impl PriceSource)
//!     .with_renderer(impl FigureRenderer)
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod market_data;
pub mod output;

// Re-export commonly used types
pub use error::TraitError;
pub use ids::*;
