//! # Chainpulse Core
//!
//! Domain contracts for the chainpulse market-analytics engine.
//!
//! ## Overview
//!
//! This crate defines everything a data consumer and a data provider agree on:
//!
//! - **Domain models** for days, ranges, series, observations, and events
//! - **Metric identifiers**: a validated string key plus the closed set of
//!   metrics the synthetic engine registers
//! - **Provider contract** ([`DataProvider`]) with validated query types
//! - **Metadata catalog** mapping metrics to labels/units/notes
//! - **Error taxonomy** split into validation and provider errors
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Domain models (Day, Series, MarketEvent, Metric) |
//! | [`error`] | Validation and provider error types |
//! | [`metadata`] | Static metric descriptor table |
//! | [`provider`] | `DataProvider` trait and query types |
//! | [`selection`] | Provider implementation selector |
//!
//! ## Error Handling
//!
//! Query construction rejects malformed input before any lookup:
//!
//! ```rust
//! use chainpulse_core::{Day, MetricId, SeriesQuery, ValidationError};
//!
//! let metric = MetricId::parse("btc_price")?;
//! let start = Day::parse("2024-06-01")?;
//! let end = Day::parse("2024-01-01")?;
//!
//! let result = SeriesQuery::new(metric, Some(start), Some(end), None);
//! assert!(matches!(result, Err(ValidationError::InvalidRange { .. })));
//! # Ok::<(), ValidationError>(())
//! ```

pub mod domain;
pub mod error;
pub mod metadata;
pub mod provider;
pub mod selection;

// Re-export commonly used types at crate root for convenience

pub use domain::{
    AssetTag, DateRange, Day, EventCategory, EventDefinition, Frequency, MarketEvent, Metric,
    MetricId, Observation, Series, SeriesDescriptor, SourceType,
};

pub use error::{ProviderError, ValidationError};

pub use metadata::{descriptor_for, descriptor_or_fallback};

pub use provider::{DataProvider, EventQuery, LatestQuery, ProviderFuture, SeriesQuery};

pub use selection::ProviderKind;
