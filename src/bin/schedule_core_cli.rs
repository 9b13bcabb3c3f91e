use std::io;
use std::process::ExitCode;

use schedule_core::cli::{self, output, Command};

fn main() -> ExitCode {
    schedule_core::init();

    let result = Command::parse(std::env::args().skip(1))
        .and_then(|command| cli::run(&command, &mut io::stdout().lock()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!(
                "{}",
                output::format_message(output::MessageKind::Error, err, false)
            );
            ExitCode::FAILURE
        }
    }
}
