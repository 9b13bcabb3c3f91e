use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{add_days, add_months};
use super::ScheduledPeriod;

/// Position relative to the start of a period, as a month and a 1-based day.
///
/// An offset is not a calendar date: it only gains meaning once projected onto
/// a concrete period start with [`PeriodOffset::resolve`]. Ordering is
/// lexicographic on `(month_offset, day_offset)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodOffset {
    pub month_offset: u32,
    pub day_offset: u32,
}

impl PeriodOffset {
    pub const fn new(month_offset: u32, day_offset: u32) -> Self {
        Self {
            month_offset,
            day_offset,
        }
    }

    /// Offset addressing the `day`-th day of a period.
    pub const fn day(day: u32) -> Self {
        Self::new(0, day)
    }

    /// Projects the offset onto the period beginning at `period_start`.
    ///
    /// Day offsets past the end of the period instance clamp to its last day,
    /// so the 31st of a monthly rule lands on the 30th in April.
    pub fn resolve(self, period_start: NaiveDate, period: &ScheduledPeriod) -> NaiveDate {
        let max_days = period.unit.max_days_in_period(period_start);
        let day_delta = self.day_offset.min(max_days).saturating_sub(1);
        add_months(add_days(period_start, day_delta), self.month_offset)
    }

    /// Advances `date` by this offset `times` over, months first.
    pub(crate) fn advance(self, date: NaiveDate, times: u32) -> NaiveDate {
        let months = self.month_offset.saturating_mul(times);
        let days = self.day_offset.saturating_mul(times);
        add_days(add_months(date, months), days)
    }
}

impl fmt::Display for PeriodOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m{}d", self.month_offset, self.day_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::PeriodUnit;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ordering_is_month_then_day() {
        let mut offsets = vec![
            PeriodOffset::new(1, 2),
            PeriodOffset::new(0, 15),
            PeriodOffset::new(1, 1),
            PeriodOffset::new(0, 3),
        ];
        offsets.sort();
        assert_eq!(
            offsets,
            vec![
                PeriodOffset::new(0, 3),
                PeriodOffset::new(0, 15),
                PeriodOffset::new(1, 1),
                PeriodOffset::new(1, 2),
            ]
        );
    }

    #[test]
    fn resolve_week_day_lands_on_that_weekday() {
        let period = ScheduledPeriod::single(PeriodUnit::Week);
        let monday = date(2025, 3, 3);
        assert_eq!(PeriodOffset::day(1).resolve(monday, &period), monday);
        assert_eq!(
            PeriodOffset::day(3).resolve(monday, &period),
            date(2025, 3, 5)
        );
        assert_eq!(
            PeriodOffset::day(7).resolve(monday, &period),
            date(2025, 3, 9)
        );
    }

    #[test]
    fn resolve_clamps_to_short_month() {
        let period = ScheduledPeriod::single(PeriodUnit::Month);
        assert_eq!(
            PeriodOffset::day(31).resolve(date(2025, 2, 1), &period),
            date(2025, 2, 28)
        );
        assert_eq!(
            PeriodOffset::day(31).resolve(date(2024, 2, 1), &period),
            date(2024, 2, 29)
        );
        assert_eq!(
            PeriodOffset::day(31).resolve(date(2025, 4, 1), &period),
            date(2025, 4, 30)
        );
    }

    #[test]
    fn resolve_year_offset_adds_days_then_months() {
        let period = ScheduledPeriod::single(PeriodUnit::Year);
        let start = date(2025, 1, 1);
        assert_eq!(
            PeriodOffset::new(2, 15).resolve(start, &period),
            date(2025, 3, 15)
        );
        assert_eq!(
            PeriodOffset::new(1, 29).resolve(start, &period),
            date(2025, 2, 28)
        );
        assert_eq!(
            PeriodOffset::new(1, 29).resolve(date(2024, 1, 1), &period),
            date(2024, 2, 29)
        );
    }
}
