//! # Chainpulse Synthetic
//!
//! Regime-driven synthetic market data engine.
//!
//! ## Overview
//!
//! One latent regime process (bull/bear/sideways intervals with assigned
//! volatility) drives every generated series, so prices, on-chain activity,
//! ETF flows, and the derivatives stack stay mutually coherent. A rule-based
//! detector then derives a discrete event list from the same series.
//!
//! Everything is generated once, eagerly, when [`SyntheticProvider`] is
//! constructed; queries answer from the resulting read-only cache through the
//! [`chainpulse_core::DataProvider`] contract.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Engine construction parameters |
//! | [`events`] | Event catalog, rule table, and detector |
//! | [`generators`] | Series generators and the cached column frame |
//! | [`provider`] | Synthetic/open providers and the selection factory |
//! | [`regime`] | Latent market-regime process |
//! | [`risk`] | Categorical risk classifier |
//! | [`rng`] | Seedable uniform/Gaussian sampler |
//!
//! ## Quick Start
//!
//! ```rust
//! use chainpulse_core::{DataProvider, Metric, SeriesQuery};
//! use chainpulse_synthetic::{EngineConfig, SyntheticProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), chainpulse_core::ProviderError> {
//! let config = EngineConfig::parse("2023-01-01", "2024-12-31")?.with_seed(7);
//! let provider = SyntheticProvider::new(config);
//!
//! let series = provider
//!     .series(SeriesQuery::full(Metric::BtcPrice.id()))
//!     .await?;
//! assert_eq!(series.len(), 731);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod events;
pub mod generators;
pub mod provider;
pub mod regime;
pub mod risk;
pub mod rng;

pub use config::EngineConfig;
pub use events::{EventDetector, EventInputs, CATALOG, MIN_EVENT_SPACING_DAYS, MIN_TOTAL_EVENTS};
pub use generators::SeriesFrame;
pub use provider::{build_provider, OpenProvider, SyntheticProvider};
pub use regime::{Regime, RegimeKind, RegimeProcess};
pub use risk::RiskLevel;
pub use rng::SimRng;
