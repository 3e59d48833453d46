//! Command parsing

use alloc::string::String;
use core::fmt;

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit editor
    Quit { force: bool },
    /// Write to current file
    Write,
    /// Write and quit
    WriteQuit,
}

/// Command-line text that is not a known command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(cmd) => write!(f, "Unknown command: {}", cmd),
        }
    }
}

/// Parse command string (without leading ':')
pub fn parse_command(cmd_str: &str) -> Result<Command, CommandError> {
    match cmd_str.trim() {
        "q" => Ok(Command::Quit { force: false }),
        "q!" => Ok(Command::Quit { force: true }),
        "w" => Ok(Command::Write),
        "wq" => Ok(Command::WriteQuit),
        other => Err(CommandError::Unknown(other.into())),
    }
}
