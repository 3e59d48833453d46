//! Editor rendering and output
//!
//! Screen layout on an 80x25 sink:
//!
//! ```text
//! row 0..23   "   1 text..."     line number (dim), gap, text
//! row 23      "[+] name      -- INSERT --"   inverted status bar
//! row 24      ":wq_" in Command mode, otherwise the status message
//! ```

use console_vga::{invert_attr, DisplaySink, Style, VGA_HEIGHT};
use editor_core::{EditorCore, EditorMode};

/// Width of the line number gutter including the gap after it
pub const GUTTER_WIDTH: usize = 5;

/// Text rows left on the screen above the status bar and command row
pub const MAX_TEXT_ROWS: usize = VGA_HEIGHT - 2;

/// Draws editor state into a display sink
#[derive(Debug, Clone, Default)]
pub struct EditorView;

impl EditorView {
    pub fn new() -> Self {
        Self
    }

    pub fn render<S: DisplaySink>(&self, core: &EditorCore, sink: &mut S) {
        let (cols, rows) = sink.dims();
        let normal = Style::Normal.to_vga_attr();
        sink.clear(normal);
        if rows < 2 {
            return;
        }

        let status_row = rows - 2;
        let text_rows = core.buffer().limits().viewport_rows.min(status_row);
        self.render_text(core, sink, text_rows, cols);
        sink.write_line_at(
            status_row,
            &self.status_bar(core, cols),
            invert_attr(normal),
        );
        sink.write_line_at(rows - 1, &self.command_line(core), normal);

        if core.mode() != EditorMode::Command {
            let cursor = core.cursor();
            let screen_row = cursor.row - core.buffer().view_offset();
            if screen_row < text_rows {
                sink.draw_cursor(cursor.col + GUTTER_WIDTH, screen_row, normal);
            }
        }
    }

    fn render_text<S: DisplaySink>(
        &self,
        core: &EditorCore,
        sink: &mut S,
        text_rows: usize,
        cols: usize,
    ) {
        let buffer = core.buffer();
        let text_cols = cols.saturating_sub(GUTTER_WIDTH);
        let dim = Style::Dim.to_vga_attr();
        let normal = Style::Normal.to_vga_attr();

        for screen_row in 0..text_rows {
            let index = buffer.view_offset() + screen_row;
            match buffer.line(index) {
                Some(line) => {
                    sink.write_str_at(0, screen_row, &format!("{:>4}", index + 1), dim);
                    let shown = &line[..line.len().min(text_cols)];
                    sink.write_str_at(GUTTER_WIDTH, screen_row, shown, normal);
                }
                None => {
                    sink.write_at(0, screen_row, b'~', dim);
                }
            }
        }
    }

    /// `[+] name` on the left, mode label on the right
    pub fn status_bar(&self, core: &EditorCore, cols: usize) -> String {
        let buffer = core.buffer();
        let mut left = String::new();
        if buffer.is_dirty() {
            left.push_str("[+] ");
        }
        if buffer.path().is_empty() {
            left.push_str("[No Name]");
        } else {
            left.push_str(buffer.path());
        }

        let label = core.mode().label();
        let pad = cols.saturating_sub(left.len() + label.len());
        format!("{}{}{}", left, " ".repeat(pad), label)
    }

    /// Text of the bottom row
    pub fn command_line(&self, core: &EditorCore) -> String {
        match core.mode() {
            EditorMode::Command => format!(":{}_", core.command_buffer()),
            _ => core.status_message().to_string(),
        }
    }
}

/// Draws `core` with the default view
pub fn render<S: DisplaySink>(core: &EditorCore, sink: &mut S) {
    EditorView::new().render(core, sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_vga::{TextGrid, VgaColor};
    use editor_core::{EditorLimits, Key, TextBuffer};

    fn editor(content: &str) -> EditorCore {
        let mut buffer = TextBuffer::from_text(content, EditorLimits::default());
        buffer.set_path("notes.txt");
        EditorCore::with_buffer(buffer)
    }

    fn draw(core: &EditorCore) -> TextGrid {
        let mut grid = TextGrid::vga();
        render(core, &mut grid);
        grid
    }

    #[test]
    fn test_render_empty_buffer() {
        let grid = draw(&EditorCore::new(EditorLimits::default()));

        assert_eq!(grid.row_text(0).unwrap(), "   1 _");
        assert_eq!(grid.row_text(1).unwrap(), "~");
        assert_eq!(grid.row_text(22).unwrap(), "~");
        assert!(grid.row_text(23).unwrap().starts_with("[No Name]"));
        assert!(grid.row_text(23).unwrap().ends_with("-- NORMAL --"));
        assert_eq!(grid.row_text(24).unwrap(), "-- NORMAL --");
    }

    #[test]
    fn test_render_with_content() {
        let grid = draw(&editor("hello\nworld"));

        assert_eq!(grid.row_text(0).unwrap(), "   1 hello");
        assert_eq!(grid.row_text(1).unwrap(), "   2 world");
        assert_eq!(grid.get_attr(0, 0), Some(Style::Dim.to_vga_attr()));
        assert_eq!(grid.get_attr(6, 0), Some(Style::Normal.to_vga_attr()));
    }

    #[test]
    fn test_render_cursor_position() {
        let mut core = editor("hello");
        core.apply_key(Key::Char('l'));
        core.apply_key(Key::Char('l'));
        let grid = draw(&core);

        let inverted = VgaColor::make_attr(VgaColor::Black, VgaColor::White);
        assert_eq!(grid.get_char(7, 0), Some(b'l'));
        assert_eq!(grid.get_attr(7, 0), Some(inverted));
        assert_eq!(grid.get_attr(6, 0), Some(Style::Normal.to_vga_attr()));
    }

    #[test]
    fn test_status_bar_dirty_and_mode() {
        let mut core = editor("hello");
        core.apply_key(Key::Char('i'));
        core.apply_key(Key::Char('x'));
        let grid = draw(&core);

        let status = grid.row_text(23).unwrap();
        assert!(status.starts_with("[+] notes.txt"));
        assert!(status.ends_with("-- INSERT --"));
        assert_eq!(status.len(), 80);
        assert_eq!(
            grid.get_attr(40, 23),
            Some(VgaColor::make_attr(VgaColor::Black, VgaColor::White))
        );
    }

    #[test]
    fn test_command_line() {
        let mut core = editor("hello");
        core.apply_key(Key::Char(':'));
        core.apply_key(Key::Char('w'));
        core.apply_key(Key::Char('q'));
        let grid = draw(&core);

        assert_eq!(grid.row_text(24).unwrap(), ":wq_");
        assert!(grid.row_text(23).unwrap().ends_with(':'));
    }

    #[test]
    fn test_render_scrolled_view() {
        let content: Vec<String> = (1..=30).map(|i| format!("line {}", i)).collect();
        let mut core = editor(&content.join("\n"));
        for _ in 0..29 {
            core.apply_key(Key::Char('j'));
        }
        let grid = draw(&core);

        assert_eq!(grid.row_text(0).unwrap(), "   8 line 8");
        assert!(grid.row_text(22).unwrap().starts_with("  30 "));
    }

    #[test]
    fn test_long_line_fills_row() {
        let long = "x".repeat(75);
        let grid = draw(&editor(&long));
        assert_eq!(grid.row_text(0).unwrap().len(), 80);
        assert_eq!(grid.row_text(1).unwrap(), "~");
    }
}
