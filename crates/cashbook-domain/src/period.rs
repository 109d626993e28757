//! Reporting periods used to time-box the profit and loss statement.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ParseError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Selects which payments and invoices a profit and loss statement covers.
pub enum ReportPeriod {
    #[default]
    ThisMonth,
    LastMonth,
    AllTime,
}

/// Calendar month expressed as `(year, month)` with `month` in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// The month immediately before this one; January rolls back a year.
    pub fn previous(self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl ReportPeriod {
    /// Returns true when `at` falls inside the period as seen from `now`.
    pub fn contains(self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            ReportPeriod::ThisMonth => MonthKey::of(at) == MonthKey::of(now),
            ReportPeriod::LastMonth => MonthKey::of(at) == MonthKey::of(now).previous(),
            ReportPeriod::AllTime => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportPeriod::ThisMonth => "This Month",
            ReportPeriod::LastMonth => "Last Month",
            ReportPeriod::AllTime => "All Time",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportPeriod {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "this-month" | "month" | "current" => Ok(ReportPeriod::ThisMonth),
            "last-month" | "previous" => Ok(ReportPeriod::LastMonth),
            "all-time" | "all" => Ok(ReportPeriod::AllTime),
            _ => Err(ParseError::new("period", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn this_month_matches_calendar_month_only() {
        let now = at(2024, 5, 20);
        assert!(ReportPeriod::ThisMonth.contains(at(2024, 5, 1), now));
        assert!(!ReportPeriod::ThisMonth.contains(at(2024, 4, 30), now));
        assert!(!ReportPeriod::ThisMonth.contains(at(2023, 5, 20), now));
    }

    #[test]
    fn last_month_rolls_over_january() {
        let now = at(2024, 1, 10);
        assert!(ReportPeriod::LastMonth.contains(at(2023, 12, 31), now));
        assert!(!ReportPeriod::LastMonth.contains(at(2024, 12, 1), now));
        assert!(!ReportPeriod::LastMonth.contains(at(2024, 1, 1), now));
    }

    #[test]
    fn all_time_matches_everything() {
        assert!(ReportPeriod::AllTime.contains(at(1999, 1, 1), at(2024, 1, 1)));
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("this-month".parse::<ReportPeriod>(), Ok(ReportPeriod::ThisMonth));
        assert_eq!("LAST_MONTH".parse::<ReportPeriod>(), Ok(ReportPeriod::LastMonth));
        assert_eq!("all".parse::<ReportPeriod>(), Ok(ReportPeriod::AllTime));
        assert!("quarter".parse::<ReportPeriod>().is_err());
    }
}
