use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use super::calendar::add_days;
use super::{Occurrences, PeriodOffset, PeriodUnit, ScheduledPeriod};
use crate::errors::ScheduleError;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A recurrence rule anchored at a start date.
///
/// The schedule never changes in place: [`Schedule::next`] hands back the rule
/// anchored one occurrence further along.
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use schedule_core::Schedule;
///
/// let wednesday = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
/// let schedule = Schedule::weekly(wednesday, &[Weekday::Mon, Weekday::Fri]);
/// assert_eq!(schedule.execute_date(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
/// assert_eq!(
///     schedule.next().execute_date(),
///     NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Schedule {
    start_date: NaiveDate,
    period: ScheduledPeriod,
    period_days: BTreeSet<PeriodOffset>,
}

impl Schedule {
    /// Builds a schedule after checking every offset fits the period unit.
    pub fn new(
        start_date: NaiveDate,
        period: ScheduledPeriod,
        period_days: impl IntoIterator<Item = PeriodOffset>,
    ) -> Result<Self, ScheduleError> {
        if period.amount == 0 {
            return Err(ScheduleError::InvalidAmount(period.amount));
        }
        let period_days: BTreeSet<PeriodOffset> = period_days.into_iter().collect();
        if let Some(offset) = period_days.iter().find(|offset| !period.unit.accepts(**offset)) {
            return Err(ScheduleError::InvalidOffsetForUnit {
                unit: period.unit,
                offset: *offset,
            });
        }
        debug!(
            "built {} schedule from {} with {} offset(s)",
            period.label(),
            start_date,
            period_days.len()
        );
        Ok(Self {
            start_date,
            period,
            period_days,
        })
    }

    fn unchecked(
        start_date: NaiveDate,
        unit: PeriodUnit,
        period_days: BTreeSet<PeriodOffset>,
    ) -> Self {
        Self {
            start_date,
            period: ScheduledPeriod::single(unit),
            period_days,
        }
    }

    pub fn daily(start_date: NaiveDate) -> Self {
        Self::unchecked(start_date, PeriodUnit::Day, BTreeSet::new())
    }

    /// Fires on each listed weekday.
    pub fn weekly(start_date: NaiveDate, days: &[Weekday]) -> Self {
        let period_days = days
            .iter()
            .map(|day| PeriodOffset::day(day.number_from_monday()))
            .collect();
        Self::unchecked(start_date, PeriodUnit::Week, period_days)
    }

    /// Fires on each listed ISO weekday number (1 = Monday .. 7 = Sunday).
    pub fn weekly_on(start_date: NaiveDate, days: &[u32]) -> Result<Self, ScheduleError> {
        Self::new(
            start_date,
            ScheduledPeriod::single(PeriodUnit::Week),
            days.iter().copied().map(PeriodOffset::day),
        )
    }

    /// Weekly rule with no target days: fires on the start date, then every 7 days.
    pub fn every_week(start_date: NaiveDate) -> Self {
        Self::unchecked(start_date, PeriodUnit::Week, BTreeSet::new())
    }

    /// Fires on each listed day of the month, or on the start date's day when
    /// `days` is empty. Days past a short month's end land on its last day.
    pub fn monthly(start_date: NaiveDate, days: &[u32]) -> Result<Self, ScheduleError> {
        let period = ScheduledPeriod::single(PeriodUnit::Month);
        if days.is_empty() {
            return Self::new(start_date, period, [PeriodOffset::day(start_date.day())]);
        }
        Self::new(start_date, period, days.iter().copied().map(PeriodOffset::day))
    }

    /// Fires on each `(month, day)` pair, months counted from 1.
    pub fn yearly(start_date: NaiveDate, days: &[(u32, u32)]) -> Result<Self, ScheduleError> {
        let mut period_days = BTreeSet::new();
        for &(month, day) in days {
            if !(1..=12).contains(&month) {
                return Err(ScheduleError::InvalidMonth(month));
            }
            period_days.insert(PeriodOffset::new(month - 1, day));
        }
        Self::new(
            start_date,
            ScheduledPeriod::single(PeriodUnit::Year),
            period_days,
        )
    }

    /// Repeats the rule every `amount` periods instead of every period.
    pub fn with_amount(self, amount: u32) -> Result<Self, ScheduleError> {
        let period = ScheduledPeriod::new(self.period.unit, amount)?;
        Ok(Self { period, ..self })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn unit(&self) -> PeriodUnit {
        self.period.unit
    }

    pub fn amount(&self) -> u32 {
        self.period.amount
    }

    pub fn period(&self) -> ScheduledPeriod {
        self.period
    }

    /// Target offsets in ascending order.
    pub fn period_days(&self) -> impl Iterator<Item = PeriodOffset> + '_ {
        self.period_days.iter().copied()
    }

    /// First date on or after the start date at which the schedule fires.
    pub fn execute_date(&self) -> NaiveDate {
        let Some(earliest) = self.period_days.first() else {
            return self.start_date;
        };
        let period_start = self.period.unit.start_of_period(self.start_date);
        let in_period = self
            .period_days
            .iter()
            .map(|offset| offset.resolve(period_start, &self.period))
            .filter(|date| *date >= self.start_date)
            .min();
        if let Some(date) = in_period {
            return date;
        }

        let following = self.period.add_to(period_start);
        debug!(
            "no offset left in period starting {}; rolling over to {}",
            period_start, following
        );
        earliest.resolve(following, &self.period)
    }

    /// The same rule anchored just past the current execute date.
    pub fn next(&self) -> Schedule {
        Schedule {
            start_date: self.next_start_date(),
            period: self.period,
            period_days: self.period_days.clone(),
        }
    }

    fn next_start_date(&self) -> NaiveDate {
        if self.period_days.is_empty() {
            return self.period.add_to(self.start_date);
        }
        let fired = self.execute_date();
        let day_after = add_days(fired, 1);
        let fired_period = self.period.unit.start_of_period(fired);
        if self.period.unit.start_of_period(day_after) == fired_period {
            day_after
        } else {
            // Crossed into the next period; an `amount` above one skips the ones between.
            self.period.add_to(fired_period)
        }
    }

    /// Successive execute dates, starting with this schedule's.
    pub fn occurrences(&self) -> Occurrences {
        Occurrences::new(self.clone())
    }

    /// Execute dates on or before `limit`.
    pub fn occurrences_until(&self, limit: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        self.occurrences().take_while(move |date| *date <= limit)
    }

    pub fn label(&self) -> String {
        let base = self.period.label();
        if self.period_days.is_empty() {
            return base;
        }
        let days: Vec<String> = self
            .period_days
            .iter()
            .map(|offset| self.offset_label(*offset))
            .collect();
        format!("{} on {}", base, days.join(", "))
    }

    fn offset_label(&self, offset: PeriodOffset) -> String {
        match self.period.unit {
            PeriodUnit::Week => WEEKDAY_LABELS
                .get(offset.day_offset.saturating_sub(1) as usize)
                .map(|label| label.to_string())
                .unwrap_or_else(|| offset.to_string()),
            PeriodUnit::Year => match MONTH_LABELS.get(offset.month_offset as usize) {
                Some(month) => format!("{} {}", month, offset.day_offset),
                None => offset.to_string(),
            },
            PeriodUnit::Day | PeriodUnit::Month => offset.day_offset.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_offsets_fire_on_start_date() {
        let start = date(2025, 6, 18);
        assert_eq!(Schedule::daily(start).execute_date(), start);
        assert_eq!(Schedule::every_week(start).execute_date(), start);
    }

    #[test]
    fn picks_earliest_qualifying_date_not_earliest_offset() {
        // Thursday: Monday already passed, Saturday is still ahead.
        let thursday = date(2025, 3, 13);
        let schedule = Schedule::weekly_on(thursday, &[1, 6]).unwrap();
        assert_eq!(schedule.execute_date(), date(2025, 3, 15));
    }

    #[test]
    fn rolls_over_to_smallest_offset_of_next_period() {
        let schedule = Schedule::monthly(date(2025, 1, 20), &[15, 5, 10]).unwrap();
        assert_eq!(schedule.execute_date(), date(2025, 2, 5));
    }

    #[test]
    fn next_keeps_rule_and_moves_anchor() {
        let schedule = Schedule::monthly(date(2025, 1, 1), &[1, 15]).unwrap();
        let next = schedule.next();
        assert_eq!(next.start_date(), date(2025, 1, 2));
        assert_eq!(next.unit(), PeriodUnit::Month);
        assert_eq!(next.amount(), 1);
        assert_eq!(
            next.period_days().collect::<Vec<_>>(),
            vec![PeriodOffset::day(1), PeriodOffset::day(15)]
        );
        assert_eq!(next.execute_date(), date(2025, 1, 15));
    }

    #[test]
    fn invalid_offsets_are_rejected() {
        let start = date(2025, 1, 1);
        assert_eq!(
            Schedule::weekly_on(start, &[8]),
            Err(ScheduleError::InvalidOffsetForUnit {
                unit: PeriodUnit::Week,
                offset: PeriodOffset::day(8),
            })
        );
        assert!(Schedule::monthly(start, &[0]).is_err());
        assert!(Schedule::monthly(start, &[32]).is_err());
        assert_eq!(
            Schedule::yearly(start, &[(13, 1)]),
            Err(ScheduleError::InvalidMonth(13))
        );
        assert!(Schedule::yearly(start, &[(4, 31)]).is_err());
        assert!(Schedule::daily(start).with_amount(0).is_err());
    }

    #[test]
    fn labels_describe_the_rule() {
        let start = date(2025, 1, 1);
        assert_eq!(Schedule::daily(start).label(), "Daily");
        assert_eq!(
            Schedule::weekly(start, &[Weekday::Wed, Weekday::Mon]).label(),
            "Weekly on Mon, Wed"
        );
        assert_eq!(
            Schedule::monthly(start, &[15, 1]).unwrap().label(),
            "Monthly on 1, 15"
        );
        assert_eq!(
            Schedule::yearly(start, &[(3, 15)]).unwrap().label(),
            "Yearly on Mar 15"
        );
        assert_eq!(
            Schedule::weekly(start, &[Weekday::Fri])
                .with_amount(2)
                .unwrap()
                .label(),
            "Every 2 Weeks on Fri"
        );
    }
}
