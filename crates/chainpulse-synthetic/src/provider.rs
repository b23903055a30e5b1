//! Caching synthetic provider and the provider factory.
//!
//! [`SyntheticProvider`] runs the whole engine eagerly at construction: daily
//! axis, regime process, every series in dependency order, then the event
//! detector. Queries only ever read from the resulting cache, so the provider
//! is a read-only value and concurrent readers never race. A fresh instance
//! means a fresh random draw; there is no in-place reset.

use std::sync::Arc;

use chainpulse_core::{
    descriptor_for, descriptor_or_fallback, DataProvider, Day, EventQuery, LatestQuery,
    MarketEvent, Metric, MetricId, Observation, ProviderError, ProviderFuture, ProviderKind,
    Series, SeriesDescriptor, SeriesQuery, SourceType,
};

use crate::config::EngineConfig;
use crate::events::{EventDetector, EventInputs};
use crate::generators::SeriesFrame;
use crate::regime::RegimeProcess;
use crate::risk::RiskLevel;
use crate::rng::SimRng;

/// Provider backed entirely by the synthetic engine.
pub struct SyntheticProvider {
    axis: Vec<Day>,
    regimes: RegimeProcess,
    frame: SeriesFrame,
    events: Vec<MarketEvent>,
}

impl SyntheticProvider {
    /// Build the full cache. Generation is one synchronous batch pass; the
    /// provider answers no query before it completes.
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SimRng::seeded(seed),
            None => SimRng::new(),
        };

        let axis = config.range.daily_axis();
        let regimes = RegimeProcess::generate(config.range, &mut rng);
        let frame = SeriesFrame::generate(&axis, &regimes, &mut rng);
        let events = EventDetector::detect(
            &EventInputs {
                dates: &axis,
                prices: frame.column(Metric::BtcPrice),
                volatility: frame.column(Metric::RealizedVolatility),
                leverage: frame.column(Metric::LeverageRatio),
                etf_flows: frame.column(Metric::EtfFlow),
                stable_supply: frame.column(Metric::StablecoinSupply),
            },
            &mut rng,
        );

        Self {
            axis,
            regimes,
            frame,
            events,
        }
    }

    pub fn axis(&self) -> &[Day] {
        &self.axis
    }

    pub fn regimes(&self) -> &RegimeProcess {
        &self.regimes
    }

    pub fn frame(&self) -> &SeriesFrame {
        &self.frame
    }

    pub fn risk_levels(&self) -> &[RiskLevel] {
        self.frame.risk_levels()
    }

    pub fn cached_events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Half-open `[lo, hi)` index window for inclusive date bounds: first date
    /// at or after `start`, last date at or before `end`.
    fn window_indices(&self, start: Option<Day>, end: Option<Day>) -> (usize, usize) {
        let lo = match start {
            Some(start) => self.axis.partition_point(|&day| day < start),
            None => 0,
        };
        let hi = match end {
            Some(end) => self.axis.partition_point(|&day| day <= end),
            None => self.axis.len(),
        };
        (lo, hi.max(lo))
    }

    fn resolve(&self, query: &SeriesQuery) -> Result<Series, ProviderError> {
        let metric =
            Metric::lookup(&query.metric).ok_or_else(|| ProviderError::UnknownMetric {
                metric: query.metric.clone(),
            })?;

        let (lo, hi) = self.window_indices(query.start, query.end);
        let column = self.frame.column(metric);
        let observations = self.axis[lo..hi]
            .iter()
            .zip(&column[lo..hi])
            .map(|(&date, &value)| Observation::new(date, value))
            .collect();

        Ok(Series::new(
            query.metric.clone(),
            descriptor_for(metric),
            observations,
            SourceType::Synthetic,
        ))
    }

    fn resolve_latest(&self, query: &LatestQuery) -> Result<f64, ProviderError> {
        let metric =
            Metric::lookup(&query.metric).ok_or_else(|| ProviderError::UnknownMetric {
                metric: query.metric.clone(),
            })?;

        let value = self
            .frame
            .column(metric)
            .last()
            .copied()
            .expect("generated columns cover at least one day");
        Ok(value)
    }

    fn resolve_events(&self, query: &EventQuery) -> Vec<MarketEvent> {
        self.events
            .iter()
            .filter(|event| query.start.is_none_or(|start| event.date >= start))
            .filter(|event| query.end.is_none_or(|end| event.date <= end))
            .filter(|event| {
                query
                    .category
                    .is_none_or(|category| event.category == category)
            })
            .cloned()
            .collect()
    }
}

impl DataProvider for SyntheticProvider {
    fn source_type(&self) -> SourceType {
        SourceType::Synthetic
    }

    fn series<'a>(&'a self, query: SeriesQuery) -> ProviderFuture<'a, Series> {
        Box::pin(async move { self.resolve(&query) })
    }

    fn latest<'a>(&'a self, query: LatestQuery) -> ProviderFuture<'a, f64> {
        Box::pin(async move { self.resolve_latest(&query) })
    }

    fn metadata<'a>(&'a self, metric: MetricId) -> ProviderFuture<'a, SeriesDescriptor> {
        Box::pin(async move { Ok(descriptor_or_fallback(&metric)) })
    }

    fn events<'a>(&'a self, query: EventQuery) -> ProviderFuture<'a, Vec<MarketEvent>> {
        Box::pin(async move { Ok(self.resolve_events(&query)) })
    }
}

/// Placeholder for a future non-synthetic feed. Every call fails with
/// [`ProviderError::NotImplemented`] so callers can fall back to the
/// synthetic provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenProvider;

impl OpenProvider {
    const PROVIDER: &'static str = "open";
}

impl DataProvider for OpenProvider {
    fn source_type(&self) -> SourceType {
        SourceType::Open
    }

    fn series<'a>(&'a self, _query: SeriesQuery) -> ProviderFuture<'a, Series> {
        Box::pin(async {
            Err(ProviderError::NotImplemented {
                provider: Self::PROVIDER,
            })
        })
    }

    fn latest<'a>(&'a self, _query: LatestQuery) -> ProviderFuture<'a, f64> {
        Box::pin(async {
            Err(ProviderError::NotImplemented {
                provider: Self::PROVIDER,
            })
        })
    }

    fn metadata<'a>(&'a self, _metric: MetricId) -> ProviderFuture<'a, SeriesDescriptor> {
        Box::pin(async {
            Err(ProviderError::NotImplemented {
                provider: Self::PROVIDER,
            })
        })
    }

    fn events<'a>(&'a self, _query: EventQuery) -> ProviderFuture<'a, Vec<MarketEvent>> {
        Box::pin(async {
            Err(ProviderError::NotImplemented {
                provider: Self::PROVIDER,
            })
        })
    }
}

/// Select a provider implementation. The synthetic engine is the default;
/// `open` exists behind the same contract but is not implemented.
pub fn build_provider(kind: ProviderKind, config: EngineConfig) -> Arc<dyn DataProvider> {
    match kind {
        ProviderKind::Synthetic => Arc::new(SyntheticProvider::new(config)),
        ProviderKind::Open => Arc::new(OpenProvider),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainpulse_core::MetricId;

    fn provider() -> SyntheticProvider {
        let config = EngineConfig::parse("2023-01-01", "2023-12-31")
            .expect("valid window")
            .with_seed(42);
        SyntheticProvider::new(config)
    }

    #[tokio::test]
    async fn slices_inclusive_subrange_in_order() {
        let provider = provider();
        let query = SeriesQuery::new(
            MetricId::parse("btc_price").expect("valid id"),
            Some(Day::parse("2023-03-01").expect("valid day")),
            Some(Day::parse("2023-03-31").expect("valid day")),
            None,
        )
        .expect("valid query");

        let series = provider.series(query).await.expect("known metric");
        assert_eq!(series.len(), 31);
        assert_eq!(series.observations[0].date.format_iso(), "2023-03-01");
        assert_eq!(
            series.observations.last().expect("non-empty").date.format_iso(),
            "2023-03-31"
        );
        for pair in series.observations.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[tokio::test]
    async fn clamps_window_to_nearest_cached_dates() {
        let provider = provider();
        // Start before the cache, end after it: full range comes back.
        let query = SeriesQuery::new(
            MetricId::parse("eth_price").expect("valid id"),
            Some(Day::parse("2020-01-01").expect("valid day")),
            Some(Day::parse("2030-01-01").expect("valid day")),
            None,
        )
        .expect("valid query");

        let series = provider.series(query).await.expect("known metric");
        assert_eq!(series.len(), provider.axis().len());
    }

    #[tokio::test]
    async fn unknown_metric_fails_series_and_latest_but_not_metadata() {
        let provider = provider();
        let unknown = MetricId::parse("nft_floor_price").expect("valid id");

        let err = provider
            .series(SeriesQuery::full(unknown.clone()))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ProviderError::UnknownMetric { .. }));

        let err = provider
            .latest(LatestQuery::new(unknown.clone()))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ProviderError::UnknownMetric { .. }));

        let descriptor = provider
            .metadata(unknown.clone())
            .await
            .expect("metadata never fails on the synthetic provider");
        assert_eq!(descriptor.label, unknown.as_str());
        assert!(descriptor.unit.is_empty());
    }

    #[tokio::test]
    async fn latest_matches_last_observation() {
        let provider = provider();
        let metric = MetricId::parse("liquidity_stress").expect("valid id");

        let series = provider
            .series(SeriesQuery::full(metric.clone()))
            .await
            .expect("known metric");
        let latest = provider
            .latest(LatestQuery::new(metric))
            .await
            .expect("known metric");

        assert_eq!(series.latest(), Some(latest));
    }

    #[tokio::test]
    async fn filters_events_by_category() {
        let provider = provider();
        let query = EventQuery::new(None, None, Some(chainpulse_core::EventCategory::Liquidity))
            .expect("valid query");

        let events = provider.events(query).await.expect("events never fail");
        for event in &events {
            assert_eq!(event.category, chainpulse_core::EventCategory::Liquidity);
        }
    }

    #[tokio::test]
    async fn open_provider_fails_every_call() {
        let provider = OpenProvider;
        let metric = MetricId::parse("btc_price").expect("valid id");

        let err = provider
            .series(SeriesQuery::full(metric.clone()))
            .await
            .expect_err("stub must fail");
        assert!(matches!(err, ProviderError::NotImplemented { provider: "open" }));

        let err = provider
            .metadata(metric)
            .await
            .expect_err("stub must fail");
        assert!(matches!(err, ProviderError::NotImplemented { .. }));
    }

    #[test]
    fn factory_selects_by_kind() {
        let config = EngineConfig::parse("2023-01-01", "2023-06-30")
            .expect("valid window")
            .with_seed(1);
        let synthetic = build_provider(ProviderKind::Synthetic, config);
        assert_eq!(synthetic.source_type(), SourceType::Synthetic);

        let open = build_provider(ProviderKind::Open, config);
        assert_eq!(open.source_type(), SourceType::Open);
    }
}
