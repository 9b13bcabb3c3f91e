//! Recurrence rules and the period arithmetic behind them.

mod calendar;
mod occurrences;
mod period;
mod period_offset;
mod period_unit;
#[allow(clippy::module_inception)]
mod schedule;

pub use occurrences::Occurrences;
pub use period::ScheduledPeriod;
pub use period_offset::PeriodOffset;
pub use period_unit::PeriodUnit;
pub use schedule::Schedule;
