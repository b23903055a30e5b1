use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar day serialized as `YYYY-MM-DD`.
///
/// All chainpulse series are daily; sub-day precision never enters the
/// contract, so the domain type is a date rather than a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(Date);

impl Day {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), DAY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn date(self) -> Date {
        self.0
    }

    /// Next calendar day; `None` only at the end of the supported calendar.
    pub fn next(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// Day shifted by a signed number of calendar days.
    pub fn plus_days(self, days: i64) -> Option<Self> {
        self.0.checked_add(time::Duration::days(days)).map(Self)
    }

    /// Signed distance in days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(DAY_FORMAT)
            .expect("Day must be ISO-8601 formattable")
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for Day {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Inclusive `[start, end]` window of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: Day,
    end: Day,
}

impl DateRange {
    pub fn new(start: Day, end: Day) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidRange {
                start: start.format_iso(),
                end: end.format_iso(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(Day::parse(start)?, Day::parse(end)?)
    }

    pub const fn start(self) -> Day {
        self.start
    }

    pub const fn end(self) -> Day {
        self.end
    }

    /// Number of calendar days in the window, inclusive of both endpoints.
    pub fn day_count(self) -> usize {
        (self.start.days_until(self.end) + 1) as usize
    }

    pub fn contains(self, day: Day) -> bool {
        self.start <= day && day <= self.end
    }

    /// One entry per calendar day, ascending, endpoints included.
    pub fn daily_axis(self) -> Vec<Day> {
        let mut axis = Vec::with_capacity(self.day_count());
        let mut cursor = self.start;
        while cursor <= self.end {
            axis.push(cursor);
            match cursor.next() {
                Some(next) => cursor = next,
                None => break,
            }
        }
        axis
    }
}
