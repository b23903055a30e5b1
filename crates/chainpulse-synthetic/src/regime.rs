//! Latent market-regime process.
//!
//! A probabilistic state machine lays labeled regimes (bull/bear/sideways)
//! end to end across the requested window. Every downstream series conditions
//! its drift, volatility, or level on the regime covering each day, which is
//! what makes the generated set mutually coherent.

use chainpulse_core::{DateRange, Day};

use crate::rng::SimRng;

/// Market regime label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegimeKind {
    Bull,
    Bear,
    Sideways,
}

impl RegimeKind {
    /// First-order Markov transition on a uniform draw `r` in `[0, 1)`.
    ///
    /// Cumulative thresholds, conditioned only on the previous kind:
    ///
    /// | From | r < | Next |
    /// |------|------|------|
    /// | Bull | 0.10 | Bear |
    /// | Bull | 0.30 | Sideways |
    /// | Bear | 0.15 | Bull |
    /// | Bear | 0.35 | Sideways |
    /// | Sideways | 0.40 | Bull |
    /// | Sideways | 0.70 | Bear |
    ///
    /// Otherwise the kind persists.
    pub fn transition(self, r: f64) -> Self {
        match self {
            Self::Bull => {
                if r < 0.10 {
                    Self::Bear
                } else if r < 0.30 {
                    Self::Sideways
                } else {
                    Self::Bull
                }
            }
            Self::Bear => {
                if r < 0.15 {
                    Self::Bull
                } else if r < 0.35 {
                    Self::Sideways
                } else {
                    Self::Bear
                }
            }
            Self::Sideways => {
                if r < 0.40 {
                    Self::Bull
                } else if r < 0.70 {
                    Self::Bear
                } else {
                    Self::Sideways
                }
            }
        }
    }

    /// Inclusive duration range in days.
    pub const fn duration_days(self) -> (i64, i64) {
        match self {
            Self::Bull => (30, 180),
            Self::Bear => (20, 90),
            Self::Sideways => (15, 60),
        }
    }

    /// Annualized volatility band in percent.
    pub const fn volatility_band(self) -> (f64, f64) {
        match self {
            Self::Bull => (40.0, 70.0),
            Self::Bear => (60.0, 100.0),
            Self::Sideways => (25.0, 50.0),
        }
    }

    /// Daily drift of the primary asset price, as a fraction.
    pub const fn daily_drift(self) -> f64 {
        match self {
            Self::Bull => 0.0015,
            Self::Bear => -0.0020,
            Self::Sideways => 0.0002,
        }
    }
}

/// One labeled, time-bounded interval of market behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regime {
    pub start: Day,
    pub end: Day,
    pub kind: RegimeKind,
    /// Annualized volatility level in percent.
    pub volatility: f64,
}

impl Regime {
    pub fn contains(&self, day: Day) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn duration(&self) -> i64 {
        self.start.days_until(self.end) + 1
    }
}

/// Ordered, contiguous regime sequence covering a date range exactly once.
///
/// Built once at engine construction and immutable thereafter.
#[derive(Debug, Clone)]
pub struct RegimeProcess {
    regimes: Vec<Regime>,
}

impl RegimeProcess {
    pub fn generate(range: DateRange, rng: &mut SimRng) -> Self {
        let mut regimes = Vec::new();
        let mut cursor = range.start();
        let mut previous: Option<RegimeKind> = None;

        while cursor <= range.end() {
            let kind = match previous {
                // First regime: uniform choice between bull and bear.
                None => {
                    if rng.chance(0.5) {
                        RegimeKind::Bull
                    } else {
                        RegimeKind::Bear
                    }
                }
                Some(prev) => prev.transition(rng.uniform()),
            };

            let (min_days, max_days) = kind.duration_days();
            let duration = rng.range_i64(min_days, max_days);
            let (vol_lo, vol_hi) = kind.volatility_band();
            let volatility = rng.range(vol_lo, vol_hi);

            // End clipped to the window; the cursor advances by the unclipped
            // duration so the next regime starts on the following day.
            let end = match cursor.plus_days(duration - 1) {
                Some(end) if end <= range.end() => end,
                _ => range.end(),
            };
            regimes.push(Regime {
                start: cursor,
                end,
                kind,
                volatility,
            });
            previous = Some(kind);

            match cursor.plus_days(duration) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Self { regimes }
    }

    pub fn regimes(&self) -> &[Regime] {
        &self.regimes
    }

    /// Regime covering `day`. Coverage is an invariant of `generate`; the
    /// first regime is the defensive default for out-of-range days.
    pub fn at(&self, day: Day) -> &Regime {
        self.regimes
            .iter()
            .find(|regime| regime.contains(day))
            .unwrap_or_else(|| {
                self.regimes
                    .first()
                    .expect("regime process covers a non-empty range")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::parse("2022-01-01", "2025-08-31").expect("valid range")
    }

    #[test]
    fn transition_thresholds_match_table() {
        assert_eq!(RegimeKind::Bull.transition(0.05), RegimeKind::Bear);
        assert_eq!(RegimeKind::Bull.transition(0.15), RegimeKind::Sideways);
        assert_eq!(RegimeKind::Bull.transition(0.50), RegimeKind::Bull);

        assert_eq!(RegimeKind::Bear.transition(0.10), RegimeKind::Bull);
        assert_eq!(RegimeKind::Bear.transition(0.20), RegimeKind::Sideways);
        assert_eq!(RegimeKind::Bear.transition(0.90), RegimeKind::Bear);

        assert_eq!(RegimeKind::Sideways.transition(0.39), RegimeKind::Bull);
        assert_eq!(RegimeKind::Sideways.transition(0.69), RegimeKind::Bear);
        assert_eq!(RegimeKind::Sideways.transition(0.70), RegimeKind::Sideways);
    }

    #[test]
    fn regimes_are_contiguous_and_cover_the_window() {
        for seed in 0..25 {
            let mut rng = SimRng::seeded(seed);
            let process = RegimeProcess::generate(range(), &mut rng);
            let regimes = process.regimes();

            assert!(!regimes.is_empty());
            assert_eq!(regimes[0].start, range().start());
            assert_eq!(regimes.last().expect("non-empty").end, range().end());

            for pair in regimes.windows(2) {
                assert_eq!(
                    pair[0].end.plus_days(1).expect("within calendar"),
                    pair[1].start,
                    "gap or overlap between regimes (seed {seed})"
                );
            }
        }
    }

    #[test]
    fn durations_and_volatility_respect_kind_bands() {
        let mut rng = SimRng::seeded(3);
        let process = RegimeProcess::generate(range(), &mut rng);
        let regimes = process.regimes();

        for (index, regime) in regimes.iter().enumerate() {
            let (vol_lo, vol_hi) = regime.kind.volatility_band();
            assert!(regime.volatility >= vol_lo && regime.volatility < vol_hi);

            let (min_days, max_days) = regime.kind.duration_days();
            let clipped = index == regimes.len() - 1;
            if clipped {
                assert!(regime.duration() <= max_days);
            } else {
                assert!(regime.duration() >= min_days && regime.duration() <= max_days);
            }
        }
    }

    #[test]
    fn every_day_maps_to_exactly_one_regime() {
        let mut rng = SimRng::seeded(11);
        let process = RegimeProcess::generate(range(), &mut rng);

        for day in range().daily_axis() {
            let covering = process
                .regimes()
                .iter()
                .filter(|regime| regime.contains(day))
                .count();
            assert_eq!(covering, 1, "day {day} covered {covering} times");
            assert!(process.at(day).contains(day));
        }
    }

    #[test]
    fn lookup_falls_back_to_first_regime_out_of_range() {
        let mut rng = SimRng::seeded(5);
        let process = RegimeProcess::generate(range(), &mut rng);

        let outside = Day::parse("1999-01-01").expect("valid day");
        assert_eq!(process.at(outside).start, range().start());
    }
}
