use thiserror::Error;

use crate::schedule::{PeriodOffset, PeriodUnit};

/// Error type raised when a schedule rule is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Offset {offset} is not a valid position within a {unit} period")]
    InvalidOffsetForUnit {
        unit: PeriodUnit,
        offset: PeriodOffset,
    },
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("Period amount must be at least 1, got {0}")]
    InvalidAmount(u32),
}

/// Error type for loading and saving schedule configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Error type for command-line invocations.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Invalid occurrence count `{0}`")]
    InvalidCount(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
