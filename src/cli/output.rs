use std::fmt;

use colored::Colorize;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

/// Turns ANSI colouring off when the configuration asks for plain output.
/// Leaves terminal auto-detection in charge otherwise.
pub fn set_color_enabled(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => format!("OK: {text}").green().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").yellow().to_string(),
        MessageKind::Error => format!("ERROR: {text}").red().to_string(),
        MessageKind::Hint => format!("Hint: {text}").dimmed().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints a `label : value` line with the label padded to `width`.
pub fn field(label: &str, value: impl fmt::Display, width: usize) {
    println!("  {label:<width$} : {value}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_styles_keep_their_prefixes() {
        set_color_enabled(false);
        assert_eq!(apply_style(MessageKind::Warning, "careful"), "WARNING: careful");
        assert_eq!(apply_style(MessageKind::Section, " Books "), "=== Books ===");
        assert_eq!(apply_style(MessageKind::Info, "plain"), "plain");
    }
}
