use chainpulse_core::Series;

use crate::cli::OutputFormat;
use crate::commands::{EventsReport, LatestReport, MetricsReport, Report};
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(report),
    }

    Ok(())
}

fn render_table(report: &Report) {
    match report {
        Report::Series(series) => render_series(series),
        Report::Latest(latest) => render_latest(latest),
        Report::Events(events) => render_events(events),
        Report::Metrics(metrics) => render_metrics(metrics),
    }
}

fn render_series(series: &Series) {
    println!("metric     : {}", series.metric_id);
    println!("label      : {}", series.label);
    if !series.unit.is_empty() {
        println!("unit       : {}", series.unit);
    }
    println!("frequency  : {}", series.frequency.as_str());
    if let Some(asset) = series.asset {
        println!("asset      : {asset}");
    }
    println!("source     : {}", series.source_type.as_str());
    println!("points     : {}", series.len());
    println!();
    for observation in &series.observations {
        println!("{}  {:>16.4}", observation.date, observation.value);
    }
}

fn render_latest(latest: &LatestReport) {
    println!("metric : {}", latest.metric_id);
    println!("value  : {:.4}", latest.value);
    println!("source : {}", latest.source_type.as_str());
}

fn render_events(report: &EventsReport) {
    println!("events : {}", report.count);
    for event in &report.events {
        println!(
            "{}  sev {}  {:<14}  {:<26}  {}",
            event.date,
            event.severity,
            event.category.as_str(),
            event.event_id,
            event.label
        );
    }
}

fn render_metrics(report: &MetricsReport) {
    println!("metrics : {}", report.count);
    for entry in &report.metrics {
        let asset = entry.asset.map(|a| a.as_str()).unwrap_or("-");
        println!(
            "{:<26}  {:<34}  {:<12}  {:<7}  {}",
            entry.metric_id.as_str(),
            entry.label,
            entry.unit,
            asset,
            entry.frequency.as_str()
        );
        if !entry.notes.is_empty() {
            println!("    {}", entry.notes);
        }
    }
}
