use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Section,
}

/// Formats a message, colouring it unless `plain` is set.
pub fn format_message(kind: MessageKind, message: impl fmt::Display, plain: bool) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Error => format!("ERROR: [x] {text}"),
    };

    if plain {
        return formatted;
    }

    match kind {
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
    }
}
