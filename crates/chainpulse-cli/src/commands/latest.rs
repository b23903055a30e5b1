use serde::Serialize;

use chainpulse_core::{DataProvider, LatestQuery, MetricId, SourceType};

use crate::cli::LatestArgs;
use crate::error::CliError;

use super::Report;

/// Wire shape of the `latest` command output.
#[derive(Debug, Serialize)]
pub struct LatestReport {
    pub metric_id: MetricId,
    pub value: f64,
    pub source_type: SourceType,
}

pub async fn run(args: &LatestArgs, provider: &dyn DataProvider) -> Result<Report, CliError> {
    let metric = MetricId::parse(&args.metric)?;
    let value = provider.latest(LatestQuery::new(metric.clone())).await?;

    Ok(Report::Latest(LatestReport {
        metric_id: metric,
        value,
        source_type: provider.source_type(),
    }))
}
