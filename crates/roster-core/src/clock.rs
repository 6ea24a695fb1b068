//! The single source of "today"
//!
//! Request handling and the reset scheduler both derive the current day
//! through a [`Clock`], so they always agree on where the day boundary is.

use crate::types::Day;
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};

/// Longest stretch of non-existent local time we search past for midnight.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Wall-clock source in local time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Today's day in local time.
    fn today(&self) -> Day {
        Day::of(&self.now())
    }
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Start of the calendar day after `now`'s day, in `now`'s time zone.
///
/// An ambiguous midnight resolves to its earliest instant. A midnight that
/// falls in a DST gap resolves to the first local time that exists after it.
pub fn next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return now.clone() + Duration::days(1);
    };
    let start = tomorrow.and_time(NaiveTime::MIN);

    for minute in 0..=MAX_GAP_MINUTES {
        let candidate = start + Duration::minutes(minute);
        if let Some(at) = tz.from_local_datetime(&candidate).earliest() {
            return at;
        }
    }

    now.clone() + Duration::days(1)
}

/// Time left until [`next_midnight`], never negative.
pub fn until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> std::time::Duration {
    next_midnight(now)
        .signed_duration_since(now.clone())
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}
