//! Saturating calendar helpers over `chrono::NaiveDate`.

use chrono::{Datelike, Days, Months, NaiveDate};

pub(crate) fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

pub(crate) fn sub_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Adds calendar months, clamping the day to the end of the target month.
pub(crate) fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

pub(crate) fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Longest a given month can be in any year.
pub(crate) fn max_days_in_month(month: u32) -> u32 {
    days_in_month(2000, month)
}

pub(crate) fn length_of_month(date: NaiveDate) -> u32 {
    days_in_month(date.year(), date.month())
}

pub(crate) fn length_of_year(date: NaiveDate) -> u32 {
    days_in_year(date.year())
}
