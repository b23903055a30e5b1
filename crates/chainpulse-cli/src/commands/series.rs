use chainpulse_core::{AssetTag, DataProvider, MetricId, SeriesQuery};

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::{parse_day, Report};

pub async fn run(args: &SeriesArgs, provider: &dyn DataProvider) -> Result<Report, CliError> {
    let metric = MetricId::parse(&args.metric)?;
    let start = parse_day(args.from.as_deref())?;
    let end = parse_day(args.to.as_deref())?;
    let asset = args
        .asset
        .as_deref()
        .map(|raw| raw.parse::<AssetTag>())
        .transpose()?;

    let query = SeriesQuery::new(metric, start, end, asset)?;
    let series = provider.series(query).await?;

    Ok(Report::Series(series))
}
