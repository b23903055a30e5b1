use chainpulse_core::{DateRange, Day, ValidationError};
use time::macros::date;

/// Engine construction parameters.
///
/// The range is validated before any generation starts; a malformed window is
/// fatal at construction rather than producing a partial cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub range: DateRange,
    /// Fixed RNG seed; `None` draws from entropy, so every construction is a
    /// fresh simulation.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn new(range: DateRange) -> Self {
        Self { range, seed: None }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(DateRange::parse(start, end)?))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for EngineConfig {
    /// Multi-year default window matching the dashboard's full history view.
    fn default() -> Self {
        let start = Day::from_date(date!(2022 - 01 - 01));
        let end = Day::from_date(date!(2025 - 08 - 31));
        Self::new(DateRange::new(start, end).expect("default engine window must be valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_spans_multiple_years() {
        let config = EngineConfig::default();
        assert!(config.range.day_count() > 1_000);
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_rejects_inverted_window() {
        let err = EngineConfig::parse("2024-06-01", "2024-01-01").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }
}
