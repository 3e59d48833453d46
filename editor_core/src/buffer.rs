//! Text buffer and position types
//!
//! The buffer owns the cursor and viewport as well as the text, so every
//! mutation can re-establish `row < line_count` and `col <= line_length`
//! before returning. Capacity limits make mutations return `false` instead
//! of failing.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::limits::EditorLimits;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Cursor position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Bounded line buffer with cursor, viewport and dirty tracking
///
/// Lines only ever hold ASCII, so byte and character columns agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
    view_offset: usize,
    dirty: bool,
    path: String,
    limits: EditorLimits,
}

impl TextBuffer {
    pub fn new(limits: EditorLimits) -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::zero(),
            view_offset: 0,
            dirty: false,
            path: String::new(),
            limits,
        }
    }

    /// Loads file content
    ///
    /// Lines are split on `\n` and one trailing newline is ignored. Lines past
    /// `max_lines` are dropped and long lines are cut at `max_line_len`.
    /// Non-ASCII bytes become `?`.
    pub fn from_bytes(content: &[u8], limits: EditorLimits) -> Self {
        let mut buffer = Self::new(limits);
        let content = content.strip_suffix(b"\n").unwrap_or(content);
        if content.is_empty() {
            return buffer;
        }

        buffer.lines = content
            .split(|&byte| byte == b'\n')
            .take(limits.max_lines.max(1))
            .map(|line| {
                line.iter()
                    .take(limits.max_line_len)
                    .map(|&byte| if byte.is_ascii() { byte as char } else { '?' })
                    .collect()
            })
            .collect();
        buffer
    }

    pub fn from_text(content: &str, limits: EditorLimits) -> Self {
        Self::from_bytes(content.as_bytes(), limits)
    }

    /// Lines joined by `\n`, no trailing newline
    pub fn as_content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    pub fn line_length(&self, row: usize) -> usize {
        self.lines.get(row).map(|s| s.len()).unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// First line shown in the viewport
    pub fn view_offset(&self) -> usize {
        self.view_offset
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Associated file path, empty when untitled
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn limits(&self) -> &EditorLimits {
        &self.limits
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Inserts `ch` at the cursor; `\n` splits the line
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch == '\n' {
            return self.split_line();
        }
        if !ch.is_ascii() {
            return false;
        }

        let Position { row, col } = self.cursor;
        let line = &mut self.lines[row];
        if line.len() >= self.limits.max_line_len {
            return false;
        }

        line.insert(col, ch);
        self.cursor.col += 1;
        self.dirty = true;
        true
    }

    fn split_line(&mut self) -> bool {
        if self.lines.len() >= self.limits.max_lines {
            return false;
        }

        let Position { row, col } = self.cursor;
        let rest = self.lines[row].split_off(col);
        self.lines.insert(row + 1, rest);
        self.cursor = Position::new(row + 1, 0);
        self.dirty = true;
        self.scroll_to_cursor();
        true
    }

    /// Backspace
    ///
    /// At column 0 the line is appended to the previous one. Characters that
    /// would overflow the joined line are dropped.
    pub fn delete_char_before_cursor(&mut self) -> bool {
        let Position { row, col } = self.cursor;

        if col > 0 {
            self.lines[row].remove(col - 1);
            self.cursor.col -= 1;
        } else if row > 0 {
            let current = self.lines.remove(row);
            let previous = &mut self.lines[row - 1];
            let join_col = previous.len();
            let room = self.limits.max_line_len.saturating_sub(join_col);
            previous.push_str(&current[..current.len().min(room)]);
            self.cursor = Position::new(row - 1, join_col);
            self.scroll_to_cursor();
        } else {
            return false;
        }

        self.dirty = true;
        true
    }

    pub fn delete_char_under_cursor(&mut self) -> bool {
        let Position { row, col } = self.cursor;
        let line = &mut self.lines[row];
        if col >= line.len() {
            return false;
        }

        line.remove(col);
        self.dirty = true;
        true
    }

    /// Removes the cursor line; the last remaining line is never removed
    pub fn delete_line(&mut self) -> bool {
        if self.lines.len() <= 1 {
            return false;
        }

        self.lines.remove(self.cursor.row);
        if self.cursor.row >= self.lines.len() {
            self.cursor.row = self.lines.len() - 1;
        }
        self.cursor.col = 0;
        self.dirty = true;
        self.scroll_to_cursor();
        true
    }

    pub fn open_line_below(&mut self) -> bool {
        if self.lines.len() >= self.limits.max_lines {
            return false;
        }

        let row = self.cursor.row + 1;
        self.lines.insert(row, String::new());
        self.cursor = Position::new(row, 0);
        self.dirty = true;
        self.scroll_to_cursor();
        true
    }

    /// Moves by a delta, then clamps into the text and scrolls if needed
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let last_row = self.lines.len() - 1;
        let row = self
            .cursor
            .row
            .saturating_add_signed(dy)
            .min(last_row);
        let col = self
            .cursor
            .col
            .saturating_add_signed(dx)
            .min(self.lines[row].len());

        self.cursor = Position::new(row, col);
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let rows = self.limits.viewport_rows.max(1);
        if self.cursor.row < self.view_offset {
            self.view_offset = self.cursor.row;
        } else if self.cursor.row >= self.view_offset + rows {
            self.view_offset = self.cursor.row + 1 - rows;
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(EditorLimits::default())
    }
}
