use chrono::NaiveDate;

use super::Schedule;

/// Iterator over the execute dates of a schedule and each of its successors.
///
/// Stops once dates stop increasing, which only happens when the calendar
/// arithmetic saturates at the end of the supported date range.
#[derive(Debug, Clone)]
pub struct Occurrences {
    current: Option<Schedule>,
    last: Option<NaiveDate>,
}

impl Occurrences {
    pub(crate) fn new(schedule: Schedule) -> Self {
        Self {
            current: Some(schedule),
            last: None,
        }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let schedule = self.current.take()?;
        let date = schedule.execute_date();
        if self.last.is_some_and(|last| date <= last) {
            return None;
        }
        self.last = Some(date);
        self.current = Some(schedule.next());
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn yields_successive_execute_dates() {
        let dates: Vec<_> = Schedule::monthly(date(2025, 1, 10), &[1, 15])
            .unwrap()
            .occurrences()
            .take(4)
            .collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 1, 15),
                date(2025, 2, 1),
                date(2025, 2, 15),
                date(2025, 3, 1),
            ]
        );
    }

    #[test]
    fn ends_when_dates_saturate() {
        let near_end = NaiveDate::MAX.pred_opt().unwrap();
        let dates: Vec<_> = Schedule::daily(near_end).occurrences().collect();
        assert_eq!(dates, vec![near_end, NaiveDate::MAX]);
    }

    #[test]
    fn until_stops_at_limit() {
        let dates: Vec<_> = Schedule::daily(date(2025, 1, 1))
            .occurrences_until(date(2025, 1, 3))
            .collect();
        assert_eq!(dates, vec![date(2025, 1, 1), date(2025, 1, 2), date(2025, 1, 3)]);
    }
}
