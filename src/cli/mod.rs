//! Command-line front end: prints upcoming execute dates for a schedule file.

pub mod output;

use std::io::Write;

use tracing::warn;

use crate::config::ConfigManager;
use crate::errors::CliError;
use crate::utils::build_info;
use output::{format_message, MessageKind};

pub const DEFAULT_COUNT: usize = 10;
pub const MAX_OCCURRENCES: usize = 1024;

const USAGE: &str = "Usage: schedule_core_cli [--plain] [--count N] <schedule.json>
       schedule_core_cli --version";

/// Parsed command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Show {
        path: String,
        count: usize,
        plain: bool,
    },
}

impl Command {
    pub fn parse<I, S>(args: I) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = None;
        let mut count = DEFAULT_COUNT;
        let mut plain = false;
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_ref() {
                "-h" | "--help" => return Ok(Command::Help),
                "-V" | "--version" => return Ok(Command::Version),
                "--plain" => plain = true,
                "-n" | "--count" => {
                    let raw = iter
                        .next()
                        .ok_or_else(|| CliError::Usage("--count needs a value".into()))?;
                    count = parse_count(raw.as_ref())?;
                }
                other if other.starts_with('-') => {
                    return Err(CliError::Usage(format!("unknown flag `{other}`\n{USAGE}")));
                }
                other => {
                    if path.replace(other.to_string()).is_some() {
                        return Err(CliError::Usage(format!(
                            "expected one schedule file\n{USAGE}"
                        )));
                    }
                }
            }
        }
        let path = path.ok_or_else(|| CliError::Usage(USAGE.into()))?;
        Ok(Command::Show { path, count, plain })
    }
}

fn parse_count(raw: &str) -> Result<usize, CliError> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(CliError::InvalidCount(raw.to_string())),
        Ok(count) if count > MAX_OCCURRENCES => {
            warn!("occurrence count {} capped at {}", count, MAX_OCCURRENCES);
            Ok(MAX_OCCURRENCES)
        }
        Ok(count) => Ok(count),
    }
}

/// Runs a parsed command, writing its report to `out`.
pub fn run<W: Write>(command: &Command, out: &mut W) -> Result<(), CliError> {
    match command {
        Command::Help => writeln!(out, "{USAGE}")?,
        Command::Version => writeln!(out, "{}", build_info::current().summary())?,
        Command::Show { path, count, plain } => {
            let schedule = ConfigManager::new(path).load_schedule()?;
            let heading = format_message(MessageKind::Section, schedule.label(), *plain);
            writeln!(out, "{heading}")?;
            for date in schedule.occurrences().take(*count) {
                writeln!(out, "{}", date.format("%Y-%m-%d %a"))?;
            }
        }
    }
    Ok(())
}
