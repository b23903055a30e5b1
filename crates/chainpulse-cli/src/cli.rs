//! CLI argument definitions for chainpulse.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `series` | Fetch one metric's daily series |
//! | `latest` | Fetch the most recent value of a metric |
//! | `events` | List detected market events |
//! | `metrics` | List the metric catalog with metadata |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--provider` | `synthetic` | Provider backend |
//! | `--seed` | entropy | Fixed engine seed for reproducible runs |
//! | `--start` | `2022-01-01` | First day of the generated window |
//! | `--end` | `2025-08-31` | Last day of the generated window |
//!
//! # Examples
//!
//! ```bash
//! # Full BTC price history, pretty JSON
//! chainpulse series btc_price --pretty
//!
//! # Reproducible liquidity events in a subwindow
//! chainpulse --seed 42 events --from 2023-01-01 --to 2023-12-31 --category liquidity
//!
//! # Metric catalog as a table
//! chainpulse metrics --format table
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Regime-driven synthetic market analytics CLI.
///
/// Generates a coherent multi-year set of daily crypto market series from one
/// latent regime process and serves series, latest values, metadata, and
/// detected events from the resulting cache.
#[derive(Debug, Parser)]
#[command(
    name = "chainpulse",
    author,
    version,
    about = "Synthetic crypto market data CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Provider backend serving the queries.
    #[arg(long, global = true, value_enum, default_value_t = ProviderSelector::Synthetic)]
    pub provider: ProviderSelector,

    /// Fixed RNG seed; omit for a fresh simulation each run.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// First day of the generated window (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub start: Option<String>,

    /// Last day of the generated window (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub end: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Aligned text table for terminal display.
    Table,
}

/// Provider backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderSelector {
    /// Regime-driven synthetic engine (default).
    Synthetic,
    /// Open data feed placeholder; every call fails until implemented.
    Open,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one metric's daily series.
    ///
    /// # Examples
    ///
    ///   chainpulse series btc_price
    ///   chainpulse series etf_flow --from 2024-01-01 --to 2024-06-30
    Series(SeriesArgs),

    /// Fetch the most recent value of a metric.
    ///
    /// # Examples
    ///
    ///   chainpulse latest realized_volatility
    Latest(LatestArgs),

    /// List detected market events.
    ///
    /// # Examples
    ///
    ///   chainpulse events
    ///   chainpulse events --category liquidity --from 2023-06-01
    Events(EventsArgs),

    /// List the metric catalog with descriptive metadata.
    Metrics(MetricsArgs),
}

/// Arguments for the `series` command.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Metric identifier (e.g. btc_price, etf_flow, risk_regime).
    pub metric: String,

    /// First day of the query window (YYYY-MM-DD); defaults to the cache start.
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of the query window (YYYY-MM-DD); defaults to the cache end.
    #[arg(long)]
    pub to: Option<String>,

    /// Asset scope filter (BTC, ETH, TOTAL, STABLES).
    #[arg(long)]
    pub asset: Option<String>,
}

/// Arguments for the `latest` command.
#[derive(Debug, Args)]
pub struct LatestArgs {
    /// Metric identifier.
    pub metric: String,
}

/// Arguments for the `events` command.
#[derive(Debug, Args)]
pub struct EventsArgs {
    /// First day of the query window (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of the query window (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,

    /// Event category filter (policy, market, microstructure, regulation,
    /// liquidity).
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the `metrics` command.
#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Include descriptor notes in the listing.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
