use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::{length_of_month, length_of_year, max_days_in_month, sub_days};
use super::PeriodOffset;

/// Granularity of a recurrence. Weeks start on Monday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
    Year,
}

impl PeriodUnit {
    pub const ALL: [PeriodUnit; 4] = [
        PeriodUnit::Day,
        PeriodUnit::Week,
        PeriodUnit::Month,
        PeriodUnit::Year,
    ];

    /// Offset spanning exactly one period of this unit.
    pub const fn canonical_period(self) -> PeriodOffset {
        match self {
            PeriodUnit::Day => PeriodOffset::new(0, 1),
            PeriodUnit::Week => PeriodOffset::new(0, 7),
            PeriodUnit::Month => PeriodOffset::new(1, 0),
            PeriodUnit::Year => PeriodOffset::new(12, 0),
        }
    }

    /// First date of the period instance containing `date`.
    pub fn start_of_period(self, date: NaiveDate) -> NaiveDate {
        match self {
            PeriodUnit::Day => date,
            PeriodUnit::Week => sub_days(date, date.weekday().num_days_from_monday()),
            PeriodUnit::Month => date.with_day(1).unwrap_or(date),
            PeriodUnit::Year => date.with_ordinal(1).unwrap_or(date),
        }
    }

    /// Day count of the period instance containing `date`.
    pub fn max_days_in_period(self, date: NaiveDate) -> u32 {
        match self {
            PeriodUnit::Day => 1,
            PeriodUnit::Week => 7,
            PeriodUnit::Month => length_of_month(date),
            PeriodUnit::Year => length_of_year(date),
        }
    }

    /// Whether `offset` names a real position inside a period of this unit.
    ///
    /// Day periods take no offsets. Year offsets store a zero-based month and
    /// accept Feb 29, which clamps to Feb 28 in common years.
    pub fn accepts(self, offset: PeriodOffset) -> bool {
        let PeriodOffset {
            month_offset,
            day_offset,
        } = offset;
        match self {
            PeriodUnit::Day => false,
            PeriodUnit::Week => month_offset == 0 && (1..=7).contains(&day_offset),
            PeriodUnit::Month => month_offset == 0 && (1..=31).contains(&day_offset),
            PeriodUnit::Year => {
                month_offset < 12
                    && day_offset >= 1
                    && day_offset <= max_days_in_month(month_offset + 1)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodUnit::Day => "Daily",
            PeriodUnit::Week => "Weekly",
            PeriodUnit::Month => "Monthly",
            PeriodUnit::Year => "Yearly",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodUnit::Day => "Day",
            PeriodUnit::Week => "Week",
            PeriodUnit::Month => "Month",
            PeriodUnit::Year => "Year",
        };
        f.write_str(label)
    }
}
