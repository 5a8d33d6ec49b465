//! Clock abstraction and calendar helpers.
//!
//! The schedule number embeds the instant a schedule was created. Reading the
//! system clock directly would make numbering untestable, so every caller goes
//! through [`Clock`].

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::error::{DispatchError, DispatchResult};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Today's date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Frozen at midnight UTC of the given calendar day.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parse a delivery date.
///
/// Accepts a plain ISO date (`2024-06-15`) or an RFC 3339 timestamp
/// (`2024-06-15T09:30:00Z`, `2024-06-15T09:30:00-07:00`). For timestamps the
/// calendar date in the timestamp's own offset is used.
pub fn parse_delivery_date(input: &str) -> DispatchResult<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DispatchError::invalid_date(input, "empty date"));
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(date_err) => DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.date_naive())
            .map_err(|_| DispatchError::invalid_date(input, date_err)),
    }
}

/// Fixed three-letter weekday code used in schedule numbers.
pub fn weekday_code(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "SUN",
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
    }
}

/// Creation stamp in `YYMMDD` form, normalized to UTC.
pub fn creation_stamp(instant: DateTime<Utc>) -> String {
    instant.format("%y%m%d").to_string()
}

/// Long display form, e.g. `Wednesday, June 12, 2024`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
