//! # Scrollback Buffer for VGA Text Console
//!
//! Output history for the shell. Lines are stored with one attribute per
//! character so a single line can mix colours (prompt, path, input).
//!
//! ## Design
//!
//! - Fixed-width lines (longer text is clipped to `cols`)
//! - Oldest lines are dropped once `max_lines` is exceeded
//! - The visible window is always the most recent `viewport_rows` lines

use alloc::vec::Vec;

/// A line of text in the scrollback buffer with VGA attributes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VgaLine {
    /// Text content (up to cols characters)
    pub text: Vec<u8>,
    /// VGA attribute for each character
    pub attrs: Vec<u8>,
}

impl VgaLine {
    pub fn new(cols: usize) -> Self {
        Self {
            text: Vec::with_capacity(cols),
            attrs: Vec::with_capacity(cols),
        }
    }

    /// Create a line from text with uniform attribute, truncating if needed
    pub fn from_text(text: &str, attr: u8, cols: usize) -> Self {
        Self::from_segments(&[(text, attr)], cols)
    }

    /// Create a line from differently coloured pieces
    pub fn from_segments(segments: &[(&str, u8)], cols: usize) -> Self {
        let mut line = Self::new(cols);
        for (text, attr) in segments {
            for byte in text.bytes() {
                if !line.push(byte, *attr, cols) {
                    return line;
                }
            }
        }
        line
    }

    /// Get the text as a string slice (empty for non-UTF8)
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.text).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a character with attribute to the line (if space available)
    pub fn push(&mut self, ch: u8, attr: u8, max_cols: usize) -> bool {
        if self.text.len() < max_cols {
            self.text.push(ch);
            self.attrs.push(attr);
            true
        } else {
            false
        }
    }
}

/// Scrollback buffer for VGA terminal text
#[derive(Clone, Debug)]
pub struct VgaScrollback {
    max_lines: usize,
    cols: usize,
    viewport_rows: usize,
    lines: Vec<VgaLine>,
}

impl VgaScrollback {
    /// Create a new scrollback buffer
    ///
    /// # Arguments
    /// * `cols` - Width in columns
    /// * `viewport_rows` - Height of visible viewport
    /// * `max_lines` - Maximum lines to store (older lines are dropped)
    pub fn new(cols: usize, viewport_rows: usize, max_lines: usize) -> Self {
        Self {
            max_lines,
            cols,
            viewport_rows,
            lines: Vec::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Get the total number of lines stored
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Add a new line to the buffer
    pub fn push_line(&mut self, text: &str, attr: u8) {
        let line = VgaLine::from_text(text, attr, self.cols);
        self.push(line);
    }

    /// Add a line made of differently coloured pieces
    pub fn push_segments(&mut self, segments: &[(&str, u8)]) {
        let line = VgaLine::from_segments(segments, self.cols);
        self.push(line);
    }

    fn push(&mut self, line: VgaLine) {
        self.lines.push(line);
        if self.lines.len() > self.max_lines {
            let excess = self.lines.len() - self.max_lines;
            self.lines.drain(..excess);
        }
    }

    /// The most recent `viewport_rows` lines, oldest first
    pub fn visible_lines(&self) -> &[VgaLine] {
        let start = self.lines.len().saturating_sub(self.viewport_rows);
        &self.lines[start..]
    }

    /// Every stored line, oldest first
    pub fn lines(&self) -> &[VgaLine] {
        &self.lines
    }

    /// Clear all content
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
