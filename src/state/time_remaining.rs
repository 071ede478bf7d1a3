//! Time remaining until the countdown target

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Breakdown of the time left, recomputed every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub is_expired: bool,
}

impl TimeRemaining {
    /// The value reported once the target has been reached
    pub fn expired() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            is_expired: true,
        }
    }

    /// Whole milliseconds represented by the components
    pub fn total_ms(&self) -> i64 {
        self.days as i64 * MS_PER_DAY
            + self.hours as i64 * MS_PER_HOUR
            + self.minutes as i64 * MS_PER_MINUTE
            + self.seconds as i64 * MS_PER_SECOND
    }

    /// Days, hours, minutes and seconds as display strings
    pub fn padded(&self) -> [String; 4] {
        [
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds),
        ]
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, h, m, s] = self.padded();
        write!(f, "{}:{}:{}:{}", d, h, m, s)
    }
}

/// Compute the time left from `now` until `target`.
///
/// A target at or before `now` is expired.
pub fn time_remaining(now: DateTime<Utc>, target: DateTime<Utc>) -> TimeRemaining {
    let diff = (target - now).num_milliseconds();
    if diff <= 0 {
        return TimeRemaining::expired();
    }

    TimeRemaining {
        days: (diff / MS_PER_DAY) as u64,
        hours: ((diff / MS_PER_HOUR) % 24) as u64,
        minutes: ((diff / MS_PER_MINUTE) % 60) as u64,
        seconds: ((diff / MS_PER_SECOND) % 60) as u64,
        is_expired: false,
    }
}

/// Zero-pad to at least two digits
pub fn pad2(value: u64) -> String {
    format!("{:02}", value)
}
