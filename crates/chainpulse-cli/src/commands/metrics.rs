use serde::Serialize;

use chainpulse_core::{AssetTag, DataProvider, Frequency, Metric, MetricId};

use crate::cli::MetricsArgs;
use crate::error::CliError;

use super::Report;

/// One catalog row of the `metrics` command output.
#[derive(Debug, Serialize)]
pub struct MetricEntry {
    pub metric_id: MetricId,
    pub label: String,
    pub unit: String,
    pub frequency: Frequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetTag>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// Wire shape of the `metrics` command output.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub count: usize,
    pub metrics: Vec<MetricEntry>,
}

pub async fn run(args: &MetricsArgs, provider: &dyn DataProvider) -> Result<Report, CliError> {
    let mut metrics = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        let id = metric.id();
        let descriptor = provider.metadata(id.clone()).await?;
        metrics.push(MetricEntry {
            metric_id: id,
            label: descriptor.label,
            unit: descriptor.unit,
            frequency: descriptor.frequency,
            asset: descriptor.asset,
            notes: if args.verbose {
                descriptor.notes
            } else {
                String::new()
            },
        });
    }

    Ok(Report::Metrics(MetricsReport {
        count: metrics.len(),
        metrics,
    }))
}
