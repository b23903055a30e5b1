//! Static descriptor table for the known metrics.
//!
//! Labels, units, and notes are fixed properties of a metric, independent of
//! any generated values. Unknown ids fall back to a generic descriptor rather
//! than failing; see [`crate::DataProvider::metadata`].

use crate::{AssetTag, Metric, MetricId, SeriesDescriptor};

/// Descriptor for a registered metric.
pub fn descriptor_for(metric: Metric) -> SeriesDescriptor {
    match metric {
        Metric::BtcPrice => SeriesDescriptor::new("BTC price", "USD")
            .with_asset(AssetTag::Btc)
            .with_notes("Primary asset spot price"),
        Metric::EthPrice => SeriesDescriptor::new("ETH price", "USD")
            .with_asset(AssetTag::Eth)
            .with_notes("Secondary asset spot price, correlated with BTC"),
        Metric::TotalMarketCap => SeriesDescriptor::new("Total market cap", "USD trillions")
            .with_asset(AssetTag::Total)
            .with_notes("BTC + ETH caps plus a 30% loading for other assets"),
        Metric::RealizedVolatility => {
            SeriesDescriptor::new("Realized volatility (30d)", "% annualized")
                .with_asset(AssetTag::Btc)
                .with_notes("Rolling std-dev of log returns, blended with regime volatility")
        }
        Metric::Drawdown => SeriesDescriptor::new("Drawdown from peak", "%")
            .with_asset(AssetTag::Btc),
        Metric::StablecoinSupply => {
            SeriesDescriptor::new("Stablecoin supply", "USD billions")
                .with_asset(AssetTag::Stables)
        }
        Metric::StablecoinNetIssuance => {
            SeriesDescriptor::new("Stablecoin net issuance (30d)", "USD billions")
                .with_asset(AssetTag::Stables)
        }
        Metric::OnchainVolume => SeriesDescriptor::new("On-chain volume", "USD billions"),
        Metric::ActiveAddresses => SeriesDescriptor::new("Active addresses", "index")
            .with_notes("Indexed to on-chain volume, not an absolute address count"),
        Metric::NetworkFee => SeriesDescriptor::new("Average network fee", "USD"),
        Metric::EtfFlow => SeriesDescriptor::new("ETF net flow", "USD millions/day"),
        Metric::EtfCumulativeFlow => {
            SeriesDescriptor::new("ETF cumulative flow", "USD billions")
        }
        Metric::EtfMomentum => SeriesDescriptor::new("ETF momentum score", "score 0-100")
            .with_notes("20-day trailing average of flows mapped to 0-100"),
        Metric::FuturesOpenInterest => {
            SeriesDescriptor::new("Futures open interest", "USD billions")
        }
        Metric::LeverageRatio => SeriesDescriptor::new("Leverage ratio", "%")
            .with_notes("Open interest as a share of total market cap"),
        Metric::FundingRate => SeriesDescriptor::new("Perpetual funding rate", "% APR"),
        Metric::LiquidationVolume => {
            SeriesDescriptor::new("Liquidation volume", "USD billions")
        }
        Metric::RiskRegime => SeriesDescriptor::new("Risk regime", "score")
            .with_notes("Categorical risk_off/neutral/risk_on encoded as 0/50/100"),
        Metric::LiquidityStress => {
            SeriesDescriptor::new("Liquidity stress index", "score 0-100")
                .with_notes("Weighted composite of volatility, leverage, and volume")
        }
        Metric::StablecoinVelocity => {
            SeriesDescriptor::new("Stablecoin velocity", "index").with_asset(AssetTag::Stables)
        }
    }
}

/// Descriptor for any metric id: the static table entry when the id is
/// registered, the generic fallback otherwise. Never fails.
pub fn descriptor_or_fallback(id: &MetricId) -> SeriesDescriptor {
    match Metric::lookup(id) {
        Some(metric) => descriptor_for(metric),
        None => SeriesDescriptor::fallback(id),
    }
}
