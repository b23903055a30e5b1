use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Provider implementation selector.
///
/// `synthetic` is the default and the only implemented source; `open` is a
/// placeholder for a future non-synthetic feed and fails every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Synthetic,
    Open,
}

impl ProviderKind {
    pub const ALL: [Self; 2] = [Self::Synthetic, Self::Open];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::Open => "open",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "open" => Ok(Self::Open),
            other => Err(ValidationError::InvalidProviderKind {
                value: other.to_owned(),
            }),
        }
    }
}
