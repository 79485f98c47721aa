//! Report windows for popularity aggregation.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use thiserror::Error;

/// A fixed report window, evaluated relative to the day the aggregation is
/// requested. Rolling windows include today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
}

impl Period {
    /// The four supported windows, in display order.
    pub const ALL: [Period; 4] = [
        Period::Today,
        Period::Yesterday,
        Period::Last7Days,
        Period::Last30Days,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::Last7Days => "last7days",
            Period::Last30Days => "last30days",
        }
    }

    /// Inclusive day range covered by this window, relative to `today`.
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Today => (today, today),
            Period::Yesterday => {
                let yesterday = days_back(today, 1);
                (yesterday, yesterday)
            }
            Period::Last7Days => (days_back(today, 6), today),
            Period::Last30Days => (days_back(today, 29), today),
        }
    }
}

fn days_back(day: NaiveDate, n: u64) -> NaiveDate {
    day.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// Rejected period name, with the accepted spellings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid period '{0}', expected one of: today, yesterday, last7days, last30days")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "yesterday" => Ok(Period::Yesterday),
            "last7days" => Ok(Period::Last7Days),
            "last30days" => Ok(Period::Last30Days),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}
