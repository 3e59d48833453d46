//! Platform-independent key representation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Key as seen by the editor state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Key {
    /// A character key, printable or not
    Char(char),

    // Navigation
    Left,
    Right,
    Up,
    Down,

    // Special keys
    Enter,
    Backspace,
    Escape,
}

impl Key {
    /// The character to insert, if this key types one
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(ch) if (' '..='~').contains(ch) => Some(*ch),
            _ => None,
        }
    }
}
