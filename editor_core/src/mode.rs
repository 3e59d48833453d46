//! Editor modes

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum EditorMode {
    /// Normal mode (navigation and commands)
    Normal,
    /// Insert mode (text entry)
    Insert,
    /// Command mode (ex commands like :q, :w)
    Command,
    /// Session is over; no further keys are handled
    Exit,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Command => "COMMAND",
            EditorMode::Exit => "EXIT",
        }
    }

    /// Text shown at the right of the status bar
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::Normal => "-- NORMAL --",
            EditorMode::Insert => "-- INSERT --",
            EditorMode::Command => ":",
            EditorMode::Exit => "",
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, EditorMode::Exit)
    }
}
