//! # Input Script Parser
//!
//! Provides a simple scripted input format for deterministic runs and tests.
//!
//! ## Format
//!
//! Scripts are line-based, with each line producing one or more key presses:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Tab`, `Space`
//! - Arrow keys: `Up`, `Down`, `Left`, `Right`
//! - Single characters: `i`, `:`, `x`
//! - Text strings: `"mkdir docs"` (typed one character at a time)
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! # Create a file with the editor
//! "vi notes.txt"
//! Enter
//! i
//! "Hello Pebble"
//! Escape
//! ":wq"
//! Enter
//! ```

use std::collections::VecDeque;

use input_types::{scancode, KeyEvent};
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("line {line}: invalid key name: {name}")]
    InvalidKeyName { line: usize, name: String },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    #[error("Empty script")]
    EmptyScript,
}

/// A queue of key presses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    inputs: VecDeque<KeyEvent>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut inputs = VecDeque::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            inputs.extend(Self::parse_line(line, index + 1)?);
        }

        if inputs.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }
        Ok(Self { inputs })
    }

    /// Types each line of `text` followed by Enter
    pub fn from_typed_lines(text: &str) -> Self {
        let mut script = Self::new();
        for line in text.lines() {
            script.push_line(line);
        }
        script
    }

    /// Queues the characters of `line` and an Enter
    pub fn push_line(&mut self, line: &str) {
        self.inputs.extend(line.chars().map(KeyEvent::char));
        self.inputs.push_back(KeyEvent::enter());
    }

    pub fn push(&mut self, event: KeyEvent) {
        self.inputs.push_back(event);
    }

    fn parse_line(line: &str, line_num: usize) -> Result<Vec<KeyEvent>, InputScriptError> {
        if let Some(quoted) = line.strip_prefix('"') {
            let text = quoted
                .strip_suffix('"')
                .ok_or(InputScriptError::UnterminatedString { line: line_num })?;
            return Ok(text.chars().map(KeyEvent::char).collect());
        }

        Self::parse_key(line)
            .map(|event| vec![event])
            .ok_or_else(|| InputScriptError::InvalidKeyName {
                line: line_num,
                name: line.to_string(),
            })
    }

    /// Parses a key name or a single character
    fn parse_key(name: &str) -> Option<KeyEvent> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyEvent::char(c));
        }

        let event = match name.to_lowercase().as_str() {
            "enter" | "return" => KeyEvent::enter(),
            "escape" | "esc" => KeyEvent::escape(),
            "backspace" | "back" => KeyEvent::backspace(),
            "tab" => KeyEvent::special(scancode::TAB),
            "space" => KeyEvent::char(' '),
            "up" => KeyEvent::special(scancode::UP),
            "down" => KeyEvent::special(scancode::DOWN),
            "left" => KeyEvent::special(scancode::LEFT),
            "right" => KeyEvent::special(scancode::RIGHT),
            _ => return None,
        };
        Some(event)
    }

    /// Returns the next key press, if any
    pub fn next_input(&mut self) -> Option<KeyEvent> {
        self.inputs.pop_front()
    }

    pub fn has_more(&self) -> bool {
        !self.inputs.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Iterator for InputScript {
    type Item = KeyEvent;

    fn next(&mut self) -> Option<KeyEvent> {
        self.next_input()
    }
}
