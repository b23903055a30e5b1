//! Domain models shared by every provider implementation.

mod day;
mod event;
mod metric;
mod series;

pub use day::{DateRange, Day};
pub use event::{EventCategory, EventDefinition, MarketEvent};
pub use metric::{AssetTag, Frequency, Metric, MetricId, SourceType};
pub use series::{Observation, Series, SeriesDescriptor};
