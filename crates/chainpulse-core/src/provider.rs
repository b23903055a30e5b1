//! Provider contract and query types.
//!
//! [`DataProvider`] is the single consumer-facing contract of the system: a
//! dashboard, exporter, or CLI asks for series, latest values, metadata, and
//! events, and never touches regime or generator internals directly.
//!
//! | Method | Request | Response |
//! |--------|---------|----------|
//! | `series` | [`SeriesQuery`] | [`Series`] |
//! | `latest` | [`LatestQuery`] | `f64` |
//! | `metadata` | [`MetricId`] | [`SeriesDescriptor`] |
//! | `events` | [`EventQuery`] | `Vec<MarketEvent>` |
//!
//! Queries validate their date window at construction, so an inverted range is
//! rejected at the boundary before any cache lookup happens.

use std::future::Future;
use std::pin::Pin;

use crate::{
    AssetTag, Day, EventCategory, MarketEvent, MetricId, ProviderError, Series, SeriesDescriptor,
    SourceType, ValidationError,
};

/// Boxed future returned by every provider method.
pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// Windowed request for one metric's series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub metric: MetricId,
    pub start: Option<Day>,
    pub end: Option<Day>,
    pub asset: Option<AssetTag>,
}

impl SeriesQuery {
    pub fn new(
        metric: MetricId,
        start: Option<Day>,
        end: Option<Day>,
        asset: Option<AssetTag>,
    ) -> Result<Self, ValidationError> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(ValidationError::InvalidRange {
                    start: start.format_iso(),
                    end: end.format_iso(),
                });
            }
        }
        Ok(Self {
            metric,
            start,
            end,
            asset,
        })
    }

    /// Query the full cached window of a metric.
    pub fn full(metric: MetricId) -> Self {
        Self {
            metric,
            start: None,
            end: None,
            asset: None,
        }
    }
}

/// Request for the most recent cached value of a metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestQuery {
    pub metric: MetricId,
    /// Accepted for contract compatibility; the synthetic engine holds a
    /// single unfiltered series per metric and ignores it.
    pub asset: Option<AssetTag>,
}

impl LatestQuery {
    pub fn new(metric: MetricId) -> Self {
        Self {
            metric,
            asset: None,
        }
    }
}

/// Windowed, optionally category-scoped request for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventQuery {
    pub start: Option<Day>,
    pub end: Option<Day>,
    pub category: Option<EventCategory>,
}

impl EventQuery {
    pub fn new(
        start: Option<Day>,
        end: Option<Day>,
        category: Option<EventCategory>,
    ) -> Result<Self, ValidationError> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(ValidationError::InvalidRange {
                    start: start.format_iso(),
                    end: end.format_iso(),
                });
            }
        }
        Ok(Self {
            start,
            end,
            category,
        })
    }

    pub fn all() -> Self {
        Self::default()
    }
}

/// Consumer-facing data access contract.
///
/// Implementations answer from a precomputed cache; the async surface exists
/// for the callers' sake and resolves immediately. Implementations must be
/// `Send + Sync` because several UI consumers may query concurrently; no
/// method mutates provider state.
pub trait DataProvider: Send + Sync {
    /// Provenance tag stamped on every series this provider returns.
    fn source_type(&self) -> SourceType;

    /// Slice one metric's series to the requested inclusive window.
    ///
    /// # Errors
    ///
    /// [`ProviderError::UnknownMetric`] if the metric is not cached;
    /// [`ProviderError::NotImplemented`] for stub providers.
    fn series<'a>(&'a self, query: SeriesQuery) -> ProviderFuture<'a, Series>;

    /// Most recent cached value of one metric.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`series`](DataProvider::series).
    fn latest<'a>(&'a self, query: LatestQuery) -> ProviderFuture<'a, f64>;

    /// Descriptive metadata for a metric id.
    ///
    /// The synthetic implementation never fails here: ids absent from the
    /// metadata table fall back to a generic descriptor. This asymmetry with
    /// `series`/`latest` is intentional and part of the contract.
    fn metadata<'a>(&'a self, metric: MetricId) -> ProviderFuture<'a, SeriesDescriptor>;

    /// Events filtered by inclusive date bounds and optional category.
    fn events<'a>(&'a self, query: EventQuery) -> ProviderFuture<'a, Vec<MarketEvent>>;
}
