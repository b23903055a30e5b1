use serde::Serialize;

use chainpulse_core::{DataProvider, EventCategory, EventQuery, MarketEvent};

use crate::cli::EventsArgs;
use crate::error::CliError;

use super::{parse_day, Report};

/// Wire shape of the `events` command output.
#[derive(Debug, Serialize)]
pub struct EventsReport {
    pub count: usize,
    pub events: Vec<MarketEvent>,
}

pub async fn run(args: &EventsArgs, provider: &dyn DataProvider) -> Result<Report, CliError> {
    let start = parse_day(args.from.as_deref())?;
    let end = parse_day(args.to.as_deref())?;
    let category = args
        .category
        .as_deref()
        .map(|raw| raw.parse::<EventCategory>())
        .transpose()?;

    let query = EventQuery::new(start, end, category)?;
    let events = provider.events(query).await?;

    Ok(Report::Events(EventsReport {
        count: events.len(),
        events,
    }))
}
