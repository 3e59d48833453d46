//! Shell error types

use fs_tree::FsError;
use thiserror::Error;

/// Errors reported by shell commands
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("{0}: missing operand")]
    MissingOperand(String),

    #[error("{0}: command not found")]
    UnknownCommand(String),

    /// A failure with a command-specific message
    #[error("{command}: {message}")]
    Failed {
        command: &'static str,
        message: String,
    },

    #[error(transparent)]
    Fs(#[from] FsError),
}

impl ShellError {
    pub fn failed(command: &'static str, message: impl Into<String>) -> Self {
        ShellError::Failed {
            command,
            message: message.into(),
        }
    }

    /// The one-line message printed for a failed `command`
    pub fn render(&self, command: &str) -> String {
        match self {
            ShellError::Fs(err) => format!("{}: {}", command, err),
            other => other.to_string(),
        }
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
