//! Series generators.
//!
//! Each generator is a pure function of its declared inputs plus the shared
//! [`SimRng`]. They run once, in dependency order (prices, then market cap and
//! volatility, then everything downstream), against one shared daily axis, and
//! the results are cached as parallel columns in a [`SeriesFrame`].

use chainpulse_core::{Day, Metric};

use crate::regime::{RegimeKind, RegimeProcess};
use crate::risk::RiskLevel;
use crate::rng::SimRng;

const TRADING_DAYS: f64 = 252.0;
const BTC_SUPPLY: f64 = 19_500_000.0;
const ETH_SUPPLY: f64 = 120_000_000.0;
/// BTC + ETH caps carry a 30% loading for everything else.
const OTHER_ASSETS_LOADING: f64 = 1.3;

const BTC_PRICE_FLOOR: f64 = 10_000.0;
const BTC_PRICE_CEILING: f64 = 150_000.0;
const ETH_PRICE_FLOOR: f64 = 500.0;
const ETH_PRICE_CEILING: f64 = 10_000.0;
const STABLE_SUPPLY_FLOOR: f64 = 80.0;
const STABLE_SUPPLY_CEILING: f64 = 180.0;

const VOL_WINDOW: usize = 30;
const ISSUANCE_WINDOW: usize = 30;
const ETF_MOMENTUM_WINDOW: usize = 20;

/// Primary asset price: multiplicative random walk with regime-conditioned
/// drift and volatility.
fn btc_price(axis: &[Day], regimes: &RegimeProcess, rng: &mut SimRng) -> Vec<f64> {
    let mut price = rng.range(30_000.0, 50_000.0);
    let mut out = Vec::with_capacity(axis.len());

    for &day in axis {
        let regime = regimes.at(day);
        let daily_sigma = (regime.volatility / TRADING_DAYS.sqrt()) / 100.0;
        let step = regime.kind.daily_drift() + rng.gaussian() * daily_sigma;
        price = (price * (1.0 + step)).clamp(BTC_PRICE_FLOOR, BTC_PRICE_CEILING);
        out.push(price);
    }
    out
}

/// Secondary asset price: beta of 0.85 on primary returns plus idiosyncratic
/// noise.
fn eth_price(btc: &[f64], rng: &mut SimRng) -> Vec<f64> {
    let mut price = rng.range(1_500.0, 2_500.0);
    let mut out = Vec::with_capacity(btc.len());

    for i in 0..btc.len() {
        let primary_return = if i == 0 { 0.0 } else { btc[i] / btc[i - 1] - 1.0 };
        let step = 0.85 * primary_return + rng.gaussian() * 0.015 * 0.15;
        price = (price * (1.0 + step)).clamp(ETH_PRICE_FLOOR, ETH_PRICE_CEILING);
        out.push(price);
    }
    out
}

/// Aggregate market cap in USD trillions.
fn total_market_cap(btc: &[f64], eth: &[f64]) -> Vec<f64> {
    btc.iter()
        .zip(eth)
        .map(|(&b, &e)| (b * BTC_SUPPLY + e * ETH_SUPPLY) * OTHER_ASSETS_LOADING / 1e12)
        .collect()
}

/// 30-day realized volatility of log returns, annualized, blended 70/30 with
/// the regime-assigned level. The first 30 observations use the regime level
/// outright.
fn realized_volatility(btc: &[f64], axis: &[Day], regimes: &RegimeProcess) -> Vec<f64> {
    let mut out = Vec::with_capacity(btc.len());

    for i in 0..btc.len() {
        let regime_vol = regimes.at(axis[i]).volatility;
        let value = if i < VOL_WINDOW {
            regime_vol
        } else {
            let window: Vec<f64> = (i - VOL_WINDOW + 1..=i)
                .map(|j| (btc[j] / btc[j - 1]).ln())
                .collect();
            let mean = window.iter().sum::<f64>() / window.len() as f64;
            let variance = window
                .iter()
                .map(|r| (r - mean).powi(2))
                .sum::<f64>()
                / (window.len() - 1) as f64;
            let realized = variance.sqrt() * TRADING_DAYS.sqrt() * 100.0;
            0.7 * realized + 0.3 * regime_vol
        };
        out.push(value.clamp(0.0, 150.0));
    }
    out
}

/// Percentage drawdown from the running peak; 0 exactly at a new peak, never
/// positive.
fn drawdown(prices: &[f64]) -> Vec<f64> {
    let mut peak = f64::MIN;
    prices
        .iter()
        .map(|&price| {
            peak = peak.max(price);
            (price - peak) / peak * 100.0
        })
        .collect()
}

/// Stablecoin supply in USD billions: multiplicative daily growth whose rate
/// depends on the regime.
fn stablecoin_supply(axis: &[Day], regimes: &RegimeProcess, rng: &mut SimRng) -> Vec<f64> {
    let mut supply = rng.range(100.0, 120.0);
    let mut out = Vec::with_capacity(axis.len());

    for &day in axis {
        let daily_pct = match regimes.at(day).kind {
            RegimeKind::Bull => rng.range(0.10, 0.20),
            RegimeKind::Bear => rng.range(-0.05, 0.0),
            RegimeKind::Sideways => rng.range(0.0, 0.05),
        };
        supply = (supply * (1.0 + daily_pct / 100.0))
            .clamp(STABLE_SUPPLY_FLOOR, STABLE_SUPPLY_CEILING);
        out.push(supply);
    }
    out
}

/// 30-day change in stablecoin supply; zero until the window fills.
fn stablecoin_net_issuance(supply: &[f64]) -> Vec<f64> {
    (0..supply.len())
        .map(|i| {
            if i < ISSUANCE_WINDOW {
                0.0
            } else {
                supply[i] - supply[i - ISSUANCE_WINDOW]
            }
        })
        .collect()
}

/// On-chain settled volume in USD billions, scaled by regime volatility and
/// total market cap.
fn onchain_volume(
    axis: &[Day],
    regimes: &RegimeProcess,
    cap: &[f64],
    rng: &mut SimRng,
) -> Vec<f64> {
    axis.iter()
        .zip(cap)
        .map(|(&day, &cap)| {
            let vol = regimes.at(day).volatility;
            rng.range(20.0, 30.0) * (1.0 + vol / 100.0) * (cap / 1.5) * rng.range(0.8, 1.2)
        })
        .collect()
}

/// Active address index: affine transform of on-chain volume plus jitter.
fn active_addresses(volume: &[f64], rng: &mut SimRng) -> Vec<f64> {
    volume
        .iter()
        .map(|&v| 800.0 + v * 10.0 + rng.range(-25.0, 25.0))
        .collect()
}

/// Average network fee in USD: volume-linked base scaled by a congestion
/// multiplier (bull markets congest).
fn network_fee(
    volume: &[f64],
    axis: &[Day],
    regimes: &RegimeProcess,
    rng: &mut SimRng,
) -> Vec<f64> {
    volume
        .iter()
        .zip(axis)
        .map(|(&v, &day)| {
            let congestion = if regimes.at(day).kind == RegimeKind::Bull {
                1.5
            } else {
                0.7
            };
            2.5 * (1.0 + v / 50.0) * congestion * rng.range(0.8, 1.2)
        })
        .collect()
}

/// ETF net flow in USD millions/day: exponentially-smoothed momentum toward a
/// regime target, plus a Gaussian shock.
fn etf_flow(axis: &[Day], regimes: &RegimeProcess, rng: &mut SimRng) -> Vec<f64> {
    let mut momentum = 0.0;
    let mut out = Vec::with_capacity(axis.len());

    for &day in axis {
        match regimes.at(day).kind {
            RegimeKind::Bull => momentum = 0.8 * momentum + 0.2 * 200.0,
            RegimeKind::Bear => momentum = 0.8 * momentum + 0.2 * -100.0,
            RegimeKind::Sideways => momentum *= 0.9,
        }
        out.push(momentum + rng.gaussian() * 150.0);
    }
    out
}

/// Running sum of ETF flows, converted millions to billions.
fn etf_cumulative_flow(flow: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    flow.iter()
        .map(|&f| {
            total += f;
            total / 1_000.0
        })
        .collect()
}

/// 20-day trailing average of flows mapped affinely onto [0, 100]; 50 until
/// the window fills.
fn etf_momentum(flow: &[f64]) -> Vec<f64> {
    (0..flow.len())
        .map(|i| {
            if i < ETF_MOMENTUM_WINDOW {
                50.0
            } else {
                let window = &flow[i - ETF_MOMENTUM_WINDOW + 1..=i];
                let avg = window.iter().sum::<f64>() / window.len() as f64;
                (50.0 + avg * 0.25).clamp(0.0, 100.0)
            }
        })
        .collect()
}

/// Futures open interest in USD billions: a regime-dependent ratio of total
/// market cap.
fn futures_open_interest(
    axis: &[Day],
    regimes: &RegimeProcess,
    cap: &[f64],
    rng: &mut SimRng,
) -> Vec<f64> {
    axis.iter()
        .zip(cap)
        .map(|(&day, &cap)| {
            let ratio = match regimes.at(day).kind {
                RegimeKind::Bull => rng.range(0.18, 0.23),
                RegimeKind::Bear => rng.range(0.10, 0.15),
                RegimeKind::Sideways => 0.15,
            };
            cap * 1_000.0 * ratio
        })
        .collect()
}

/// Open interest as a percentage of total market cap.
fn leverage_ratio(open_interest: &[f64], cap: &[f64]) -> Vec<f64> {
    open_interest
        .iter()
        .zip(cap)
        .map(|(&oi, &cap)| oi / (cap * 1_000.0) * 100.0)
        .collect()
}

/// Perpetual funding rate in % APR: 1% baseline, elevated in levered bull
/// markets, negative in bear markets.
fn funding_rate(
    axis: &[Day],
    regimes: &RegimeProcess,
    leverage: &[f64],
    rng: &mut SimRng,
) -> Vec<f64> {
    axis.iter()
        .zip(leverage)
        .map(|(&day, &lev)| match regimes.at(day).kind {
            RegimeKind::Bull if lev > 18.0 => rng.range(5.0, 10.0),
            RegimeKind::Bear => rng.range(-2.0, 0.0),
            _ => 1.0,
        })
        .collect()
}

/// Liquidation volume in USD billions, with a 5x spike at 5% probability in
/// bear regimes.
fn liquidation_volume(
    axis: &[Day],
    regimes: &RegimeProcess,
    volatility: &[f64],
    leverage: &[f64],
    rng: &mut SimRng,
) -> Vec<f64> {
    axis.iter()
        .zip(volatility.iter().zip(leverage))
        .map(|(&day, (&vol, &lev))| {
            let bear = regimes.at(day).kind == RegimeKind::Bear;
            let spike = if bear && rng.chance(0.05) { 5.0 } else { 1.0 };
            0.5 * (vol / 50.0) * (lev / 15.0) * spike * rng.range(0.8, 1.2)
        })
        .collect()
}

/// Weighted composite stress score on [0, 100]; each sub-score is clamped to
/// [0, 100] before combination.
fn liquidity_stress_at(volatility: f64, leverage: f64, volume: f64) -> f64 {
    let vol_score = volatility.clamp(0.0, 100.0);
    let leverage_score = ((leverage - 10.0) * 8.0).clamp(0.0, 100.0);
    let volume_score = (volume * 2.5).clamp(0.0, 100.0);
    (0.4 * vol_score + 0.3 * leverage_score + 0.3 * volume_score).clamp(0.0, 100.0)
}

fn liquidity_stress(volatility: &[f64], leverage: &[f64], volume: &[f64]) -> Vec<f64> {
    volatility
        .iter()
        .zip(leverage.iter().zip(volume))
        .map(|(&vol, (&lev, &v))| liquidity_stress_at(vol, lev, v))
        .collect()
}

/// Stablecoin turnover index.
fn stablecoin_velocity(volume: &[f64], supply: &[f64], rng: &mut SimRng) -> Vec<f64> {
    volume
        .iter()
        .zip(supply)
        .map(|(&v, &s)| 80.0 + (v / s * 100.0) * 0.2 + rng.range(0.0, 10.0))
        .collect()
}

/// All generated columns, aligned 1:1 with the shared daily axis.
#[derive(Debug, Clone)]
pub struct SeriesFrame {
    btc_price: Vec<f64>,
    eth_price: Vec<f64>,
    total_market_cap: Vec<f64>,
    realized_volatility: Vec<f64>,
    drawdown: Vec<f64>,
    stablecoin_supply: Vec<f64>,
    stablecoin_net_issuance: Vec<f64>,
    onchain_volume: Vec<f64>,
    active_addresses: Vec<f64>,
    network_fee: Vec<f64>,
    etf_flow: Vec<f64>,
    etf_cumulative_flow: Vec<f64>,
    etf_momentum: Vec<f64>,
    futures_open_interest: Vec<f64>,
    leverage_ratio: Vec<f64>,
    funding_rate: Vec<f64>,
    liquidation_volume: Vec<f64>,
    risk_levels: Vec<RiskLevel>,
    risk_score: Vec<f64>,
    liquidity_stress: Vec<f64>,
    stablecoin_velocity: Vec<f64>,
}

impl SeriesFrame {
    /// Run every generator once, in dependency order.
    pub fn generate(axis: &[Day], regimes: &RegimeProcess, rng: &mut SimRng) -> Self {
        let btc = btc_price(axis, regimes, rng);
        let eth = eth_price(&btc, rng);
        let cap = total_market_cap(&btc, &eth);
        let vol = realized_volatility(&btc, axis, regimes);
        let dd = drawdown(&btc);

        let supply = stablecoin_supply(axis, regimes, rng);
        let issuance = stablecoin_net_issuance(&supply);
        let volume = onchain_volume(axis, regimes, &cap, rng);
        let addresses = active_addresses(&volume, rng);
        let fee = network_fee(&volume, axis, regimes, rng);

        let flow = etf_flow(axis, regimes, rng);
        let cumulative = etf_cumulative_flow(&flow);
        let momentum = etf_momentum(&flow);

        let oi = futures_open_interest(axis, regimes, &cap, rng);
        let leverage = leverage_ratio(&oi, &cap);
        let funding = funding_rate(axis, regimes, &leverage, rng);
        let liquidations = liquidation_volume(axis, regimes, &vol, &leverage, rng);

        let risk_levels: Vec<RiskLevel> = vol
            .iter()
            .zip(&leverage)
            .map(|(&v, &l)| RiskLevel::classify(v, l))
            .collect();
        let risk_score = risk_levels.iter().map(|level| level.score()).collect();
        let stress = liquidity_stress(&vol, &leverage, &volume);
        let velocity = stablecoin_velocity(&volume, &supply, rng);

        Self {
            btc_price: btc,
            eth_price: eth,
            total_market_cap: cap,
            realized_volatility: vol,
            drawdown: dd,
            stablecoin_supply: supply,
            stablecoin_net_issuance: issuance,
            onchain_volume: volume,
            active_addresses: addresses,
            network_fee: fee,
            etf_flow: flow,
            etf_cumulative_flow: cumulative,
            etf_momentum: momentum,
            futures_open_interest: oi,
            leverage_ratio: leverage,
            funding_rate: funding,
            liquidation_volume: liquidations,
            risk_levels,
            risk_score,
            liquidity_stress: stress,
            stablecoin_velocity: velocity,
        }
    }

    /// Numeric column for a registered metric; the categorical risk regime is
    /// served through its numeric projection.
    pub fn column(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::BtcPrice => &self.btc_price,
            Metric::EthPrice => &self.eth_price,
            Metric::TotalMarketCap => &self.total_market_cap,
            Metric::RealizedVolatility => &self.realized_volatility,
            Metric::Drawdown => &self.drawdown,
            Metric::StablecoinSupply => &self.stablecoin_supply,
            Metric::StablecoinNetIssuance => &self.stablecoin_net_issuance,
            Metric::OnchainVolume => &self.onchain_volume,
            Metric::ActiveAddresses => &self.active_addresses,
            Metric::NetworkFee => &self.network_fee,
            Metric::EtfFlow => &self.etf_flow,
            Metric::EtfCumulativeFlow => &self.etf_cumulative_flow,
            Metric::EtfMomentum => &self.etf_momentum,
            Metric::FuturesOpenInterest => &self.futures_open_interest,
            Metric::LeverageRatio => &self.leverage_ratio,
            Metric::FundingRate => &self.funding_rate,
            Metric::LiquidationVolume => &self.liquidation_volume,
            Metric::RiskRegime => &self.risk_score,
            Metric::LiquidityStress => &self.liquidity_stress,
            Metric::StablecoinVelocity => &self.stablecoin_velocity,
        }
    }

    pub fn risk_levels(&self) -> &[RiskLevel] {
        &self.risk_levels
    }
}
