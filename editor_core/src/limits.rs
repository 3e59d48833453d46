//! Editor capacities

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Bounds applied to the buffer and the command line
///
/// Hitting one of these turns the keystroke into a no-op rather than an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(default))]
pub struct EditorLimits {
    /// Maximum number of lines in a buffer
    pub max_lines: usize,
    /// Maximum characters per line
    pub max_line_len: usize,
    /// Text rows shown at once
    pub viewport_rows: usize,
    /// Maximum length of a `:` command
    pub max_command_len: usize,
}

impl Default for EditorLimits {
    fn default() -> Self {
        Self {
            max_lines: 50,
            max_line_len: 75,
            viewport_rows: 23,
            max_command_len: 78,
        }
    }
}
