use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PeriodUnit;
use crate::errors::ScheduleError;

/// A period unit repeated `amount` times, e.g. "every 2 weeks".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScheduledPeriod {
    pub unit: PeriodUnit,
    pub amount: u32,
}

impl ScheduledPeriod {
    pub fn new(unit: PeriodUnit, amount: u32) -> Result<Self, ScheduleError> {
        if amount == 0 {
            return Err(ScheduleError::InvalidAmount(amount));
        }
        Ok(Self { unit, amount })
    }

    pub const fn single(unit: PeriodUnit) -> Self {
        Self { unit, amount: 1 }
    }

    /// Advances `date` by `amount` canonical periods of the unit.
    pub fn add_to(&self, date: NaiveDate) -> NaiveDate {
        self.unit.canonical_period().advance(date, self.amount)
    }

    pub fn label(&self) -> String {
        match self.amount {
            1 => self.unit.label().into(),
            n => format!("Every {} {}s", n, self.unit),
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
    fn add_to_advances_one_period() {
        let start = date(2025, 1, 31);
        assert_eq!(
            ScheduledPeriod::single(PeriodUnit::Day).add_to(start),
            date(2025, 2, 1)
        );
        assert_eq!(
            ScheduledPeriod::single(PeriodUnit::Week).add_to(start),
            date(2025, 2, 7)
        );
        assert_eq!(
            ScheduledPeriod::single(PeriodUnit::Month).add_to(start),
            date(2025, 2, 28)
        );
        assert_eq!(
            ScheduledPeriod::single(PeriodUnit::Year).add_to(date(2024, 2, 29)),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn add_to_multiplies_by_amount() {
        let start = date(2025, 1, 1);
        let biweekly = ScheduledPeriod::new(PeriodUnit::Week, 2).unwrap();
        assert_eq!(biweekly.add_to(start), date(2025, 1, 15));
        let quarterly = ScheduledPeriod::new(PeriodUnit::Month, 3).unwrap();
        assert_eq!(quarterly.add_to(start), date(2025, 4, 1));
    }

    #[test]
    fn zero_amount_is_rejected() {
        assert_eq!(
            ScheduledPeriod::new(PeriodUnit::Month, 0),
            Err(ScheduleError::InvalidAmount(0))
        );
    }

    #[test]
    fn label_generation() {
        assert_eq!(ScheduledPeriod::single(PeriodUnit::Month).label(), "Monthly");
        assert_eq!(
            ScheduledPeriod::new(PeriodUnit::Week, 2).unwrap().label(),
            "Every 2 Weeks"
        );
    }
}
