use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Normalized metric identifier.
///
/// The provider contract is keyed by this string newtype so that unknown ids
/// surface as `UnknownMetric` at query time; [`Metric`] enumerates the ids the
/// synthetic engine actually registers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MetricId(String);

impl MetricId {
    /// Parse and normalize a metric id to lowercase snake case.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyMetricId);
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::MetricIdInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_';
            if !valid {
                return Err(ValidationError::MetricIdInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MetricId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for MetricId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<MetricId> for String {
    fn from(value: MetricId) -> Self {
        value.0
    }
}

/// Closed set of metrics produced by the synthetic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BtcPrice,
    EthPrice,
    TotalMarketCap,
    RealizedVolatility,
    Drawdown,
    StablecoinSupply,
    StablecoinNetIssuance,
    OnchainVolume,
    ActiveAddresses,
    NetworkFee,
    EtfFlow,
    EtfCumulativeFlow,
    EtfMomentum,
    FuturesOpenInterest,
    LeverageRatio,
    FundingRate,
    LiquidationVolume,
    RiskRegime,
    LiquidityStress,
    StablecoinVelocity,
}

impl Metric {
    pub const ALL: [Self; 20] = [
        Self::BtcPrice,
        Self::EthPrice,
        Self::TotalMarketCap,
        Self::RealizedVolatility,
        Self::Drawdown,
        Self::StablecoinSupply,
        Self::StablecoinNetIssuance,
        Self::OnchainVolume,
        Self::ActiveAddresses,
        Self::NetworkFee,
        Self::EtfFlow,
        Self::EtfCumulativeFlow,
        Self::EtfMomentum,
        Self::FuturesOpenInterest,
        Self::LeverageRatio,
        Self::FundingRate,
        Self::LiquidationVolume,
        Self::RiskRegime,
        Self::LiquidityStress,
        Self::StablecoinVelocity,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BtcPrice => "btc_price",
            Self::EthPrice => "eth_price",
            Self::TotalMarketCap => "total_market_cap",
            Self::RealizedVolatility => "realized_volatility",
            Self::Drawdown => "drawdown",
            Self::StablecoinSupply => "stablecoin_supply",
            Self::StablecoinNetIssuance => "stablecoin_net_issuance",
            Self::OnchainVolume => "onchain_volume",
            Self::ActiveAddresses => "active_addresses",
            Self::NetworkFee => "network_fee",
            Self::EtfFlow => "etf_flow",
            Self::EtfCumulativeFlow => "etf_cumulative_flow",
            Self::EtfMomentum => "etf_momentum",
            Self::FuturesOpenInterest => "futures_open_interest",
            Self::LeverageRatio => "leverage_ratio",
            Self::FundingRate => "funding_rate",
            Self::LiquidationVolume => "liquidation_volume",
            Self::RiskRegime => "risk_regime",
            Self::LiquidityStress => "liquidity_stress",
            Self::StablecoinVelocity => "stablecoin_velocity",
        }
    }

    pub fn id(self) -> MetricId {
        MetricId(self.as_str().to_owned())
    }

    /// Resolve a metric id against the closed set; `None` for unregistered ids.
    pub fn lookup(id: &MetricId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == id.as_str())
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset scope tag carried by asset-specific series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetTag {
    Btc,
    Eth,
    Total,
    Stables,
}

impl AssetTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Total => "TOTAL",
            Self::Stables => "STABLES",
        }
    }
}

impl Display for AssetTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetTag {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BTC" => Ok(Self::Btc),
            "ETH" => Ok(Self::Eth),
            "TOTAL" => Ok(Self::Total),
            "STABLES" => Ok(Self::Stables),
            other => Err(ValidationError::InvalidAsset {
                value: other.to_owned(),
            }),
        }
    }
}

/// Observation frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Provenance of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Synthetic,
    Open,
}

impl SourceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::Open => "open",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_metric_id() {
        let parsed = MetricId::parse(" BTC_Price ").expect("must parse");
        assert_eq!(parsed.as_str(), "btc_price");
    }

    #[test]
    fn rejects_empty_metric_id() {
        let err = MetricId::parse("   ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyMetricId));
    }

    #[test]
    fn rejects_invalid_metric_chars() {
        let err = MetricId::parse("btc-price").expect_err("must fail");
        assert!(matches!(err, ValidationError::MetricIdInvalidChar { .. }));
    }

    #[test]
    fn every_known_metric_round_trips_through_lookup() {
        for metric in Metric::ALL {
            let id = metric.id();
            assert_eq!(Metric::lookup(&id), Some(metric));
        }
    }

    #[test]
    fn lookup_misses_unregistered_id() {
        let id = MetricId::parse("dogecoin_price").expect("valid id");
        assert_eq!(Metric::lookup(&id), None);
    }

    #[test]
    fn parses_asset_tag_case_insensitively() {
        let tag: AssetTag = "btc".parse().expect("must parse");
        assert_eq!(tag, AssetTag::Btc);
        assert!(matches!(
            "doge".parse::<AssetTag>(),
            Err(ValidationError::InvalidAsset { .. })
        ));
    }
}
