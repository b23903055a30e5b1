use serde::{Deserialize, Serialize};

use crate::{AssetTag, Day, Frequency, MetricId, SourceType};

/// Single dated value of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: Day,
    pub value: f64,
}

impl Observation {
    pub const fn new(date: Day, value: f64) -> Self {
        Self { date, value }
    }
}

/// Descriptive metadata for a metric, independent of any generated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    pub label: String,
    pub unit: String,
    pub frequency: Frequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetTag>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl SeriesDescriptor {
    pub fn new(label: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            unit: unit.into(),
            frequency: Frequency::Daily,
            asset: None,
            notes: String::new(),
        }
    }

    pub fn with_asset(mut self, asset: AssetTag) -> Self {
        self.asset = Some(asset);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Generic descriptor for ids absent from the metadata table: the id
    /// doubles as the label, unit and notes stay empty.
    pub fn fallback(id: &MetricId) -> Self {
        Self::new(id.as_str(), "")
    }
}

/// Named, ordered sequence of observations plus metadata. The wire shape of
/// every `series` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub metric_id: MetricId,
    pub label: String,
    pub unit: String,
    pub frequency: Frequency,
    pub observations: Vec<Observation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetTag>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub source_type: SourceType,
}

impl Series {
    pub fn new(
        metric_id: MetricId,
        descriptor: SeriesDescriptor,
        observations: Vec<Observation>,
        source_type: SourceType,
    ) -> Self {
        Self {
            metric_id,
            label: descriptor.label,
            unit: descriptor.unit,
            frequency: descriptor.frequency,
            observations,
            asset: descriptor.asset,
            notes: descriptor.notes,
            source_type,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.observations.last().map(|obs| obs.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_shape() {
        let id = MetricId::parse("btc_price").expect("valid id");
        let descriptor = SeriesDescriptor::new("BTC price", "USD").with_asset(AssetTag::Btc);
        let day = Day::parse("2024-01-01").expect("valid day");
        let series = Series::new(
            id,
            descriptor,
            vec![Observation::new(day, 42_000.0)],
            SourceType::Synthetic,
        );

        let json = serde_json::to_value(&series).expect("must serialize");
        assert_eq!(json["metric_id"], "btc_price");
        assert_eq!(json["frequency"], "daily");
        assert_eq!(json["asset"], "BTC");
        assert_eq!(json["source_type"], "synthetic");
        assert_eq!(json["observations"][0]["date"], "2024-01-01");
        assert!(json.get("notes").is_none(), "empty notes stay off the wire");
    }

    #[test]
    fn fallback_descriptor_uses_id_as_label() {
        let id = MetricId::parse("mystery_metric").expect("valid id");
        let descriptor = SeriesDescriptor::fallback(&id);
        assert_eq!(descriptor.label, "mystery_metric");
        assert!(descriptor.unit.is_empty());
        assert!(descriptor.notes.is_empty());
    }
}
