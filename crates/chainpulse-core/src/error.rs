use thiserror::Error;

use crate::MetricId;

/// Validation errors raised at the query and parsing boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date must be ISO-8601 (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },

    #[error("range end '{end}' is before start '{start}'")]
    InvalidRange { start: String, end: String },

    #[error("metric id cannot be empty")]
    EmptyMetricId,
    #[error("metric id must start with an ASCII letter: '{ch}'")]
    MetricIdInvalidStart { ch: char },
    #[error("metric id contains invalid character '{ch}' at index {index}")]
    MetricIdInvalidChar { ch: char, index: usize },

    #[error(
        "invalid event category '{value}', expected one of policy, market, microstructure, regulation, liquidity"
    )]
    InvalidCategory { value: String },

    #[error("invalid asset tag '{value}', expected one of BTC, ETH, TOTAL, STABLES")]
    InvalidAsset { value: String },

    #[error("severity {value} is out of range 1..=5")]
    InvalidSeverity { value: u8 },

    #[error("invalid provider kind '{value}', expected one of synthetic, open")]
    InvalidProviderKind { value: String },
}

/// Errors surfaced by `DataProvider` implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The requested metric key is absent from the cache. A programmer or
    /// configuration error; callers should propagate rather than retry.
    #[error("unknown metric '{metric}'")]
    UnknownMetric { metric: MetricId },

    /// A non-synthetic provider was invoked. Surfaced as a clear failure so
    /// the caller can fall back to the synthetic provider.
    #[error("provider '{provider}' is not implemented")]
    NotImplemented { provider: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
