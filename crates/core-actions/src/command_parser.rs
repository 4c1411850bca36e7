//! Command line parsing.
//!
//! Converts the raw `:` buffer into a [`ParsedCommand`]. Pure
//! classification, no side effects; unknown input is carried through for
//! the status message.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Empty command line; nothing to do.
    Noop,
    Quit { force: bool },
    Write { path: Option<PathBuf> },
    WriteQuit,
    Edit(PathBuf),
    Unknown(String),
}

/// Parse a command body (the buffer content after the `:` prompt).
pub fn parse(raw: &str) -> ParsedCommand {
    let s = raw.trim();
    if s.is_empty() {
        return ParsedCommand::Noop;
    }
    let mut parts = s.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (head, arg) {
        ("q", None) => ParsedCommand::Quit { force: false },
        ("q!", None) => ParsedCommand::Quit { force: true },
        ("w", path) => ParsedCommand::Write {
            path: path.map(PathBuf::from),
        },
        ("wq" | "x", None) => ParsedCommand::WriteQuit,
        ("e" | "edit", Some(path)) => ParsedCommand::Edit(PathBuf::from(path)),
        _ => ParsedCommand::Unknown(s.to_string()),
    }
}
