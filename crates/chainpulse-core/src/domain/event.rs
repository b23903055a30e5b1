use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Day, ValidationError};

/// Category of a market event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Policy,
    Market,
    Microstructure,
    Regulation,
    Liquidity,
}

impl EventCategory {
    pub const ALL: [Self; 5] = [
        Self::Policy,
        Self::Market,
        Self::Microstructure,
        Self::Regulation,
        Self::Liquidity,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Market => "market",
            Self::Microstructure => "microstructure",
            Self::Regulation => "regulation",
            Self::Liquidity => "liquidity",
        }
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "policy" => Ok(Self::Policy),
            "market" => Ok(Self::Market),
            "microstructure" => Ok(Self::Microstructure),
            "regulation" => Ok(Self::Regulation),
            "liquidity" => Ok(Self::Liquidity),
            other => Err(ValidationError::InvalidCategory {
                value: other.to_owned(),
            }),
        }
    }
}

/// Static catalog entry: everything about an event except its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub category: EventCategory,
    pub severity: u8,
    pub description: &'static str,
}

/// Discrete, dated, categorized occurrence derived from series conditions.
/// The wire shape of every `events` response entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub event_id: String,
    pub label: String,
    pub date: Day,
    pub category: EventCategory,
    pub severity: u8,
    pub description: String,
}

impl MarketEvent {
    pub fn new(
        event_id: impl Into<String>,
        label: impl Into<String>,
        date: Day,
        category: EventCategory,
        severity: u8,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&severity) {
            return Err(ValidationError::InvalidSeverity { value: severity });
        }
        Ok(Self {
            event_id: event_id.into(),
            label: label.into(),
            date,
            category,
            severity,
            description: description.into(),
        })
    }

    /// Instantiate a catalog definition at a concrete date. Catalog severities
    /// are compile-time constants inside 1..=5, so this cannot fail.
    pub fn from_definition(definition: &EventDefinition, date: Day) -> Self {
        Self {
            event_id: definition.id.to_owned(),
            label: definition.label.to_owned(),
            date,
            category: definition.category,
            severity: definition.severity,
            description: definition.description.to_owned(),
        }
    }
}
