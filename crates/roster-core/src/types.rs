//! Attendance domain types

use crate::error::{Result, RosterError};
use chrono::{DateTime, NaiveDate, TimeZone};
use std::fmt;
use std::str::FromStr;

/// Canonical text form of a [`Day`]. Sorts the same way the dates do.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, the partition key for attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The calendar day of `at`, read in `at`'s own time zone.
    pub fn of<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.date_naive())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for Day {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        // chrono accepts unpadded fields, the canonical form does not
        if s.len() != 10 {
            return Err(RosterError::InvalidDay(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DAY_FORMAT)
            .map(Self)
            .map_err(|_| RosterError::InvalidDay(s.to_string()))
    }
}

/// One person's sign-up for one day. Unique per (name, day).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub name: String,
    pub day: Day,
}

/// Result of adding a record. A duplicate is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    AlreadyExists,
}

impl AddOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, AddOutcome::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_display_is_zero_padded() {
        let day = Day::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(day.to_string(), "2024-06-01");
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!("2024-06-01".parse::<Day>().is_ok());
        assert!("2024-6-1".parse::<Day>().is_err());
        assert!("2024-13-01".parse::<Day>().is_err());
        assert!("yesterday".parse::<Day>().is_err());
        assert!("".parse::<Day>().is_err());
    }

    #[test]
    fn test_order_matches_text_order() {
        let days = ["2023-12-31", "2024-01-01", "2024-01-10", "2024-02-01"];
        for pair in days.windows(2) {
            let a: Day = pair[0].parse().unwrap();
            let b: Day = pair[1].parse().unwrap();
            assert!(a < b);
            assert!(a.to_string() < b.to_string());
        }
    }

    #[test]
    fn test_day_of_uses_the_datetime_zone() {
        // 2024-06-01 23:30 UTC is already June 2nd at UTC+2
        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 23, 30, 0).unwrap();
        let plus_two = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());

        assert_eq!(Day::of(&utc).to_string(), "2024-06-01");
        assert_eq!(Day::of(&plus_two).to_string(), "2024-06-02");
    }
}
