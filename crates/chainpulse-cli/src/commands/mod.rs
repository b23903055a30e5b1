mod events;
mod latest;
mod metrics;
mod series;

use serde::Serialize;

use chainpulse_core::{DateRange, Day, ProviderKind, Series};
use chainpulse_synthetic::{build_provider, EngineConfig};

use crate::cli::{Cli, Command, ProviderSelector};
use crate::error::CliError;

pub use events::EventsReport;
pub use latest::LatestReport;
pub use metrics::{MetricEntry, MetricsReport};

/// Payload of one completed command, handed to the output layer.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Series(Series),
    Latest(LatestReport),
    Events(EventsReport),
    Metrics(MetricsReport),
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    let provider = build_provider(to_provider_kind(cli.provider), engine_config(cli)?);

    match &cli.command {
        Command::Series(args) => series::run(args, provider.as_ref()).await,
        Command::Latest(args) => latest::run(args, provider.as_ref()).await,
        Command::Events(args) => events::run(args, provider.as_ref()).await,
        Command::Metrics(args) => metrics::run(args, provider.as_ref()).await,
    }
}

fn engine_config(cli: &Cli) -> Result<EngineConfig, CliError> {
    let mut config = EngineConfig::default();

    if cli.start.is_some() || cli.end.is_some() {
        let start = match &cli.start {
            Some(raw) => Day::parse(raw)?,
            None => config.range.start(),
        };
        let end = match &cli.end {
            Some(raw) => Day::parse(raw)?,
            None => config.range.end(),
        };
        config.range = DateRange::new(start, end)?;
    }

    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    Ok(config)
}

fn to_provider_kind(provider: ProviderSelector) -> ProviderKind {
    match provider {
        ProviderSelector::Synthetic => ProviderKind::Synthetic,
        ProviderSelector::Open => ProviderKind::Open,
    }
}

fn parse_day(raw: Option<&str>) -> Result<Option<Day>, CliError> {
    raw.map(Day::parse).transpose().map_err(CliError::from)
}
