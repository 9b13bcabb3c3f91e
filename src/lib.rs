#![doc(test(attr(deny(warnings))))]

//! Schedule Core computes recurring calendar dates from compact rules: a start
//! date, a period unit and the positions inside each period the rule fires on.

pub mod cli;
pub mod config;
pub mod errors;
pub mod schedule;
pub mod utils;

pub use errors::{ConfigError, ScheduleError};
pub use schedule::{Occurrences, PeriodOffset, PeriodUnit, Schedule, ScheduledPeriod};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Schedule Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
