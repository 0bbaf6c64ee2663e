//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    ///
    /// Domain code should take time from the `Clock` port instead.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp from calendar fields, `None` if they do not form a valid instant.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days. Saturates at the representable range.
    pub fn add_days(&self, days: i64) -> Self {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .unwrap_or(if days < 0 {
                Self(DateTime::<Utc>::MIN_UTC)
            } else {
                Self(DateTime::<Utc>::MAX_UTC)
            })
    }

    /// Adds whole calendar months, keeping the time of day.
    ///
    /// When the target month is shorter than the source day, the result is
    /// clamped to the last day of the target month: Jan 31 + 1 month is
    /// Feb 28 (or Feb 29 in a leap year). Clamping is not undone on later
    /// additions, so repeated monthly renewals drift towards shorter days.
    /// Saturates at the maximum representable instant.
    pub fn add_calendar_months(&self, months: u32) -> Self {
        self.0
            .checked_add_months(Months::new(months))
            .map(Self)
            .unwrap_or(Self(DateTime::<Utc>::MAX_UTC))
    }

    /// Returns the timestamp as Unix milliseconds.
    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
