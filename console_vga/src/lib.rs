//! # VGA Text Console
//!
//! An 80x25 grid of character/attribute cells that the shell and the editor
//! render into.
//!
//! ## Philosophy
//!
//! This is NOT a terminal emulator. No ANSI escape codes, no VT100, no TTY model.
//! It's a deterministic text renderer: same state, same cells.
//!
//! ## Design Principles
//!
//! 1. **Minimal and deterministic**: Simple 80x25 text with attributes
//! 2. **Testable**: The grid lives in memory and can be read back cell by cell
//! 3. **Explicit cursor**: Cursor position is passed in, not tracked internally

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

pub mod scrollback;

pub use scrollback::{VgaLine, VgaScrollback};

/// VGA text mode dimensions
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;

/// VGA color codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

impl VgaColor {
    /// Make a VGA attribute byte from foreground and background colors
    pub const fn make_attr(fg: VgaColor, bg: VgaColor) -> u8 {
        (bg as u8) << 4 | (fg as u8)
    }
}

/// Swaps the foreground and background nibbles
pub const fn invert_attr(attr: u8) -> u8 {
    ((attr & 0x0F) << 4) | ((attr & 0xF0) >> 4)
}

/// Semantic text styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Normal,
    Bold,
    Error,
    Success,
    Info,
    /// Directory names in listings
    Directory,
    /// Secondary text such as line numbers
    Dim,
    /// Banner and headings
    Banner,
}

impl Style {
    /// Convert style to VGA attribute byte
    pub fn to_vga_attr(self) -> u8 {
        match self {
            Style::Normal => VgaColor::make_attr(VgaColor::White, VgaColor::Black),
            Style::Bold => VgaColor::make_attr(VgaColor::LightGreen, VgaColor::Black),
            Style::Error => VgaColor::make_attr(VgaColor::LightRed, VgaColor::Black),
            Style::Success => VgaColor::make_attr(VgaColor::LightGreen, VgaColor::Black),
            Style::Info => VgaColor::make_attr(VgaColor::LightCyan, VgaColor::Black),
            Style::Directory => VgaColor::make_attr(VgaColor::LightBlue, VgaColor::Black),
            Style::Dim => VgaColor::make_attr(VgaColor::DarkGray, VgaColor::Black),
            Style::Banner => VgaColor::make_attr(VgaColor::Brown, VgaColor::Black),
        }
    }
}

/// Trait for display output
pub trait DisplaySink {
    /// Get display dimensions (cols, rows)
    fn dims(&self) -> (usize, usize);

    /// Clear the display with the given attribute
    fn clear(&mut self, attr: u8);

    /// Write a character at the given position
    fn write_at(&mut self, col: usize, row: usize, ch: u8, attr: u8) -> bool;

    /// Write a string at the given position
    fn write_str_at(&mut self, col: usize, row: usize, text: &str, attr: u8) -> usize;

    /// Draw a cursor at the given position (usually by inverting attributes)
    fn draw_cursor(&mut self, col: usize, row: usize, attr: u8);

    /// Write a line at `row`, clipped to the width, padding the rest with spaces
    fn write_line_at(&mut self, row: usize, text: &str, attr: u8) {
        let (cols, rows) = self.dims();
        if row >= rows {
            return;
        }
        let bytes = text.as_bytes();
        for col in 0..cols {
            let ch = bytes.get(col).copied().unwrap_or(b' ');
            self.write_at(col, row, ch, attr);
        }
    }

    /// Draws lines from `first_row` down, stopping at the bottom edge
    ///
    /// Returns the row below the last line drawn.
    fn draw_lines(&mut self, first_row: usize, lines: &[VgaLine]) -> usize {
        let (cols, rows) = self.dims();
        let mut row = first_row;
        for line in lines {
            if row >= rows {
                break;
            }
            for (col, (&ch, &attr)) in line.text.iter().zip(line.attrs.iter()).enumerate() {
                if col >= cols {
                    break;
                }
                self.write_at(col, row, ch, attr);
            }
            row += 1;
        }
        row
    }

    /// Clears, then draws the visible part of a scrollback from the top row
    fn render_scrollback(&mut self, scrollback: &VgaScrollback) -> usize {
        self.clear(Style::Normal.to_vga_attr());
        self.draw_lines(0, scrollback.visible_lines())
    }
}

/// In-memory text grid
///
/// Each cell is a character byte plus an attribute byte, laid out row-major
/// the way the hardware text buffer is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl TextGrid {
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self {
            cells: vec![0; width * height * 2],
            width,
            height,
        };
        grid.clear(Style::Normal.to_vga_attr());
        grid
    }

    /// A standard 80x25 grid
    pub fn vga() -> Self {
        Self::new(VGA_WIDTH, VGA_HEIGHT)
    }

    fn offset(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some((row * self.width + col) * 2)
    }

    pub fn get_char(&self, col: usize, row: usize) -> Option<u8> {
        self.offset(col, row).map(|offset| self.cells[offset])
    }

    pub fn get_attr(&self, col: usize, row: usize) -> Option<u8> {
        self.offset(col, row).map(|offset| self.cells[offset + 1])
    }

    /// Text of one row with trailing spaces removed
    pub fn row_text(&self, row: usize) -> Option<String> {
        if row >= self.height {
            return None;
        }
        let mut line: String = (0..self.width)
            .filter_map(|col| self.get_char(col, row))
            .map(|ch| if ch == 0 { ' ' } else { ch as char })
            .collect();
        let trimmed = line.trim_end().len();
        line.truncate(trimmed);
        Some(line)
    }

    /// Every row, trailing spaces removed
    pub fn screen_text(&self) -> Vec<String> {
        (0..self.height)
            .filter_map(|row| self.row_text(row))
            .collect()
    }

}

impl Default for TextGrid {
    fn default() -> Self {
        Self::vga()
    }
}

impl DisplaySink for TextGrid {
    fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self, attr: u8) {
        for cell in self.cells.chunks_exact_mut(2) {
            cell[0] = b' ';
            cell[1] = attr;
        }
    }

    fn write_at(&mut self, col: usize, row: usize, ch: u8, attr: u8) -> bool {
        match self.offset(col, row) {
            Some(offset) => {
                self.cells[offset] = ch;
                self.cells[offset + 1] = attr;
                true
            }
            None => false,
        }
    }

    /// Text wraps to the next row if it exceeds the width.
    fn write_str_at(&mut self, mut col: usize, mut row: usize, text: &str, attr: u8) -> usize {
        let mut written = 0;

        for byte in text.bytes() {
            if byte == b'\n' {
                row += 1;
                col = 0;
                if row >= self.height {
                    break;
                }
                continue;
            }

            if col >= self.width {
                col = 0;
                row += 1;
            }

            if row >= self.height {
                break;
            }

            if self.write_at(col, row, byte, attr) {
                written += 1;
            }

            col += 1;
        }

        written
    }

    fn draw_cursor(&mut self, col: usize, row: usize, attr: u8) {
        let Some(offset) = self.offset(col, row) else {
            return;
        };
        self.cells[offset + 1] = invert_attr(attr);
        // make a cursor on blank space visible
        if self.cells[offset] == b' ' {
            self.cells[offset] = b'_';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vga_dimensions() {
        let grid = TextGrid::vga();
        assert_eq!(grid.dims(), (80, 25));
    }

    #[test]
    fn test_vga_color_attr() {
        let attr = VgaColor::make_attr(VgaColor::White, VgaColor::Black);
        assert_eq!(attr, 0x0F);

        let attr = VgaColor::make_attr(VgaColor::LightGreen, VgaColor::Black);
        assert_eq!(attr, 0x0A);
        assert_eq!(invert_attr(0x07), 0x70);
    }

    #[test]
    fn test_style_to_vga_attr() {
        assert_eq!(Style::Normal.to_vga_attr(), 0x0F);
        assert_eq!(Style::Error.to_vga_attr(), 0x0C);
        assert_eq!(Style::Directory.to_vga_attr(), 0x09);
        assert_eq!(Style::Dim.to_vga_attr(), 0x08);
    }

    #[test]
    fn test_write_at() {
        let mut grid = TextGrid::vga();
        assert!(grid.write_at(0, 0, b'A', 0x07));
        assert_eq!(grid.get_char(0, 0), Some(b'A'));
        assert_eq!(grid.get_attr(0, 0), Some(0x07));

        assert!(!grid.write_at(VGA_WIDTH, 0, b'B', 0x07));
        assert!(!grid.write_at(0, VGA_HEIGHT, b'C', 0x07));
    }

    #[test]
    fn test_write_str_with_newline() {
        let mut grid = TextGrid::vga();
        let written = grid.write_str_at(0, 0, "Line1\nLine2", 0x07);
        assert_eq!(written, 10);
        assert_eq!(grid.row_text(0).unwrap(), "Line1");
        assert_eq!(grid.row_text(1).unwrap(), "Line2");
    }

    #[test]
    fn test_write_str_wraps_and_clamps() {
        let mut grid = TextGrid::vga();
        let text = "A".repeat(VGA_WIDTH + 5);
        assert_eq!(grid.write_str_at(0, 0, &text, 0x07), VGA_WIDTH + 5);
        assert_eq!(grid.get_char(4, 1), Some(b'A'));

        let long_text = "A".repeat(VGA_WIDTH * VGA_HEIGHT + 100);
        assert_eq!(
            grid.write_str_at(0, 0, &long_text, 0x07),
            VGA_WIDTH * VGA_HEIGHT
        );
    }

    #[test]
    fn test_write_line_at_pads() {
        let mut grid = TextGrid::vga();
        grid.write_str_at(0, 3, "xxxxxxxx", 0x07);
        grid.write_line_at(3, "ab", 0x1F);
        assert_eq!(grid.row_text(3).unwrap(), "ab");
        assert_eq!(grid.get_attr(79, 3), Some(0x1F));
    }

    #[test]
    fn test_clear() {
        let mut grid = TextGrid::vga();
        grid.write_at(0, 0, b'A', 0x07);
        grid.clear(0x07);
        for row in 0..VGA_HEIGHT {
            for col in 0..VGA_WIDTH {
                assert_eq!(grid.get_char(col, row), Some(b' '));
                assert_eq!(grid.get_attr(col, row), Some(0x07));
            }
        }
    }

    #[test]
    fn test_cursor_visibility() {
        let mut grid = TextGrid::vga();
        grid.clear(0x07);
        grid.draw_cursor(5, 5, 0x07);
        assert_eq!(grid.get_char(5, 5), Some(b'_'));
        assert_eq!(grid.get_attr(5, 5), Some(0x70));

        grid.write_at(6, 5, b'x', 0x07);
        grid.draw_cursor(6, 5, 0x07);
        assert_eq!(grid.get_char(6, 5), Some(b'x'));
    }

    #[test]
    fn test_render_scrollback() {
        let mut grid = TextGrid::vga();
        let mut scrollback = VgaScrollback::new(VGA_WIDTH, VGA_HEIGHT, 1000);
        scrollback.push_line("Line 1", 0x07);
        scrollback.push_line("Line 2", 0x0A);

        assert_eq!(grid.render_scrollback(&scrollback), 2);
        assert_eq!(grid.row_text(0).unwrap(), "Line 1");
        assert_eq!(grid.get_attr(0, 1), Some(0x0A));
        assert_eq!(grid.row_text(2).unwrap(), "");
    }

    #[test]
    fn test_screen_text() {
        let mut grid = TextGrid::new(10, 3);
        grid.write_str_at(0, 1, "hi   ", 0x07);
        let screen = grid.screen_text();
        assert_eq!(screen.len(), 3);
        assert_eq!(screen[1], "hi");
    }
}
