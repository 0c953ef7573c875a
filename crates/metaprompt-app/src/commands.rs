//! Slash commands of the conversation view.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Prompt(String),
    KeySet,
    KeyClear,
    KeyStatus,
    Test,
    Attach(PathBuf),
    Detach,
    Reset,
    Status,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

/// Classify one input line. Lines not starting with `/` are prompts.
pub fn parse(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Prompt(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match (name, arg) {
        ("key", "") => ReplCommand::KeySet,
        ("key", "clear") => ReplCommand::KeyClear,
        ("key", "status") => ReplCommand::KeyStatus,
        ("test", "") => ReplCommand::Test,
        ("attach", "") => ReplCommand::Unknown(line.to_string()),
        ("attach", path) => ReplCommand::Attach(PathBuf::from(path)),
        ("detach", "") => ReplCommand::Detach,
        ("reset", "") => ReplCommand::Reset,
        ("status", "") => ReplCommand::Status,
        ("help", "") | ("?", "") => ReplCommand::Help,
        ("quit", "") | ("exit", "") | ("q", "") => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}
