use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Categorical risk posture derived from volatility and leverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    RiskOff,
    Neutral,
    RiskOn,
}

impl RiskLevel {
    /// Rule-based classification.
    ///
    /// | Condition | Level |
    /// |-----------|-------|
    /// | volatility > 70 or leverage < 12 | risk_off |
    /// | volatility < 40 and leverage > 17 | risk_on |
    /// | otherwise | neutral |
    ///
    /// The risk_off rule is checked first, so high volatility wins regardless
    /// of leverage.
    pub fn classify(volatility: f64, leverage: f64) -> Self {
        if volatility > 70.0 || leverage < 12.0 {
            Self::RiskOff
        } else if volatility < 40.0 && leverage > 17.0 {
            Self::RiskOn
        } else {
            Self::Neutral
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskOff => "risk_off",
            Self::Neutral => "neutral",
            Self::RiskOn => "risk_on",
        }
    }

    /// Numeric projection used on the series surface, where every metric is a
    /// numeric column: risk_off 0, neutral 50, risk_on 100.
    pub const fn score(self) -> f64 {
        match self {
            Self::RiskOff => 0.0,
            Self::Neutral => 50.0,
            Self::RiskOn => 100.0,
        }
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_volatility_is_risk_off_regardless_of_leverage() {
        assert_eq!(RiskLevel::classify(75.0, 20.0), RiskLevel::RiskOff);
        assert_eq!(RiskLevel::classify(75.0, 10.0), RiskLevel::RiskOff);
    }

    #[test]
    fn low_leverage_is_risk_off() {
        assert_eq!(RiskLevel::classify(30.0, 11.0), RiskLevel::RiskOff);
    }

    #[test]
    fn calm_and_levered_is_risk_on() {
        assert_eq!(RiskLevel::classify(35.0, 18.0), RiskLevel::RiskOn);
    }

    #[test]
    fn middle_ground_is_neutral() {
        assert_eq!(RiskLevel::classify(55.0, 15.0), RiskLevel::Neutral);
        assert_eq!(RiskLevel::classify(35.0, 15.0), RiskLevel::Neutral);
    }

    #[test]
    fn scores_are_ordered() {
        assert!(RiskLevel::RiskOff.score() < RiskLevel::Neutral.score());
        assert!(RiskLevel::Neutral.score() < RiskLevel::RiskOn.score());
    }
}
