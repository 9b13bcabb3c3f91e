//! JSON schedule definitions and the file manager that loads and saves them.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};

use crate::errors::{ConfigError, ScheduleError};
use crate::schedule::{PeriodOffset, PeriodUnit, Schedule, ScheduledPeriod};

const TMP_SUFFIX: &str = "tmp";

/// A target position as written in a config file: a bare day number for
/// weekly and monthly rules, a `[month, day]` pair for yearly rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DaySpec {
    Day(u32),
    MonthDay(u32, u32),
}

/// Serializable description of a recurrence rule.
///
/// ```json
/// { "unit": "week", "start": "2025-03-12", "every": 2, "days": [1, 3] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub unit: PeriodUnit,
    pub start: NaiveDate,
    #[serde(default = "ScheduleConfig::default_every")]
    pub every: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<DaySpec>,
}

impl ScheduleConfig {
    fn default_every() -> u32 {
        1
    }

    pub fn new(unit: PeriodUnit, start: NaiveDate) -> Self {
        Self {
            unit,
            start,
            every: Self::default_every(),
            days: Vec::new(),
        }
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the definition and turns it into a [`Schedule`].
    ///
    /// Monthly rules without days fire on the start date's day of month.
    pub fn build(&self) -> Result<Schedule, ScheduleError> {
        let period = ScheduledPeriod::new(self.unit, self.every)?;
        let mut offsets = Vec::with_capacity(self.days.len());
        for spec in &self.days {
            offsets.push(self.offset_for(*spec)?);
        }
        if offsets.is_empty() && self.unit == PeriodUnit::Month {
            offsets.push(PeriodOffset::day(self.start.day()));
        }
        Schedule::new(self.start, period, offsets)
    }

    fn offset_for(&self, spec: DaySpec) -> Result<PeriodOffset, ScheduleError> {
        match (self.unit, spec) {
            (PeriodUnit::Year, DaySpec::MonthDay(month, day)) => {
                if !(1..=12).contains(&month) {
                    return Err(ScheduleError::InvalidMonth(month));
                }
                Ok(PeriodOffset::new(month - 1, day))
            }
            (PeriodUnit::Year, DaySpec::Day(day)) => Err(ScheduleError::InvalidOffsetForUnit {
                unit: self.unit,
                offset: PeriodOffset::day(day),
            }),
            (_, DaySpec::MonthDay(month, day)) => Err(ScheduleError::InvalidOffsetForUnit {
                unit: self.unit,
                offset: PeriodOffset::new(month, day),
            }),
            (_, DaySpec::Day(day)) => Ok(PeriodOffset::day(day)),
        }
    }
}

impl From<&Schedule> for ScheduleConfig {
    fn from(schedule: &Schedule) -> Self {
        let days = schedule
            .period_days()
            .map(|offset| match schedule.unit() {
                PeriodUnit::Year => DaySpec::MonthDay(offset.month_offset + 1, offset.day_offset),
                _ => DaySpec::Day(offset.day_offset),
            })
            .collect();
        Self {
            unit: schedule.unit(),
            start: schedule.start_date(),
            every: schedule.amount(),
            days,
        }
    }
}

/// Reads and writes a single schedule definition on disk.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<ScheduleConfig, ConfigError> {
        let data = fs::read_to_string(&self.path)?;
        ScheduleConfig::from_json(&data)
    }

    /// Loads the definition and builds the schedule it describes.
    pub fn load_schedule(&self) -> Result<Schedule, ConfigError> {
        Ok(self.load()?.build()?)
    }

    pub fn save(&self, config: &ScheduleConfig) -> Result<(), ConfigError> {
        let json = config.to_json()?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
