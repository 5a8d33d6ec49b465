//! Schedule number generation.
//!
//! Format: `DS-<YYMMDD>-<WEEKDAY>-<DRIVERCODE>`, e.g. `DS-240615-SAT-D12`.
//!
//! - `YYMMDD` is the creation instant in UTC.
//! - `WEEKDAY` is the delivery date's three-letter code, or `XXX` when the
//!   delivery date cannot be parsed.
//! - `DRIVERCODE` is `D` followed by the deduplicated, prefix-stripped,
//!   ascending driver tokens concatenated together, or `D00` when no driver
//!   is assigned.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use crate::models::time::{creation_stamp, parse_delivery_date, weekday_code};

/// Namespace prefix carried by driver ids in the external store.
pub const DEFAULT_DRIVER_PREFIX: &str = "driver-";

/// Weekday placeholder for unparseable delivery dates.
pub const UNKNOWN_WEEKDAY: &str = "XXX";

/// Driver code for a schedule with no assigned drivers.
pub const NO_DRIVER_CODE: &str = "D00";

const SCHEDULE_PREFIX: &str = "DS";

/// Generates schedule numbers for a given driver-id namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleNumberer {
    driver_prefix: String,
}

impl ScheduleNumberer {
    pub fn new(driver_prefix: impl Into<String>) -> Self {
        Self {
            driver_prefix: driver_prefix.into(),
        }
    }

    pub fn driver_prefix(&self) -> &str {
        &self.driver_prefix
    }

    /// Driver segment of a schedule number.
    pub fn driver_code<S: AsRef<str>>(&self, driver_ids: &[S]) -> String {
        // BTreeSet dedupes and sorts in one pass
        let tokens: BTreeSet<&str> = driver_ids
            .iter()
            .map(|id| {
                let id = id.as_ref().trim();
                id.strip_prefix(self.driver_prefix.as_str()).unwrap_or(id)
            })
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.is_empty() {
            return NO_DRIVER_CODE.to_string();
        }
        let mut code = String::from("D");
        code.extend(tokens);
        code
    }

    /// Schedule number for a delivery date that is already parsed.
    pub fn for_date<S: AsRef<str>>(
        &self,
        now: DateTime<Utc>,
        delivery_date: NaiveDate,
        driver_ids: &[S],
    ) -> String {
        self.compose(now, weekday_code(delivery_date), driver_ids)
    }

    /// Schedule number for an ISO delivery date string.
    ///
    /// Never fails: an unparseable date yields the `XXX` weekday segment.
    pub fn generate<S: AsRef<str>>(
        &self,
        now: DateTime<Utc>,
        delivery_date_iso: &str,
        driver_ids: &[S],
    ) -> String {
        let weekday = match parse_delivery_date(delivery_date_iso) {
            Ok(date) => weekday_code(date),
            Err(e) => {
                warn!(error = %e, "falling back to placeholder weekday");
                UNKNOWN_WEEKDAY
            }
        };
        self.compose(now, weekday, driver_ids)
    }

    fn compose<S: AsRef<str>>(&self, now: DateTime<Utc>, weekday: &str, driver_ids: &[S]) -> String {
        format!(
            "{}-{}-{}-{}",
            SCHEDULE_PREFIX,
            creation_stamp(now),
            weekday,
            self.driver_code(driver_ids)
        )
    }
}

impl Default for ScheduleNumberer {
    fn default() -> Self {
        Self::new(DEFAULT_DRIVER_PREFIX)
    }
}

/// Schedule number using the default `driver-` namespace.
pub fn generate_schedule_number<S: AsRef<str>>(
    now: DateTime<Utc>,
    delivery_date_iso: &str,
    driver_ids: &[S],
) -> String {
    ScheduleNumberer::default().generate(now, delivery_date_iso, driver_ids)
}
