//! Interactive shell
//!
//! Collects key presses into a line, runs it on Enter and keeps the output
//! in a scrollback. The prompt is `<hostname>:<cwd>$ `.

use console_vga::{DisplaySink, Style, VgaScrollback, VGA_HEIGHT, VGA_WIDTH};
use fs_tree::Filesystem;
use input_types::KeyEvent;
use tracing::{debug, info};

use crate::commands::{CommandHandler, OutputLine, ShellAction};
use crate::tokenizer::CommandLine;

/// Longest input line; further keys are ignored
pub const MAX_INPUT_LEN: usize = 255;

/// Output lines kept for redraw
pub const SCROLLBACK_LINES: usize = 200;

/// The interactive command line
#[derive(Debug, Clone)]
pub struct Shell {
    hostname: String,
    input: String,
    scrollback: VgaScrollback,
}

impl Shell {
    /// Creates a shell and prints the banner
    pub fn new(hostname: impl Into<String>) -> Self {
        let mut shell = Self {
            hostname: hostname.into(),
            input: String::new(),
            // the last row is reserved for the prompt
            scrollback: VgaScrollback::new(VGA_WIDTH, VGA_HEIGHT - 1, SCROLLBACK_LINES),
        };
        shell.print(OutputLine::styled(
            format!("Pebble v{}", env!("CARGO_PKG_VERSION")),
            Style::Banner,
        ));
        shell.print(OutputLine::styled(
            "Type 'help' for a list of commands.",
            Style::Info,
        ));
        shell
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The line typed so far
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn scrollback(&self) -> &VgaScrollback {
        &self.scrollback
    }

    /// Output history as plain text, oldest first
    pub fn output_text(&self) -> Vec<String> {
        self.scrollback
            .lines()
            .iter()
            .map(|line| line.as_str().to_string())
            .collect()
    }

    /// Appends a line to the output
    pub fn print(&mut self, line: OutputLine) {
        let segments: Vec<(&str, u8)> = line
            .segments
            .iter()
            .map(|(text, style)| (text.as_str(), style.to_vga_attr()))
            .collect();
        self.scrollback.push_segments(&segments);
    }

    /// Handles one key press
    ///
    /// Enter runs the current line, Backspace edits it and Escape discards
    /// it. Printable characters are appended while the line has room.
    pub fn process_key(&mut self, fs: &mut Filesystem, event: KeyEvent) -> ShellAction {
        if event.is_enter() {
            let line = std::mem::take(&mut self.input);
            return self.execute_line(fs, &line);
        }
        if event.is_backspace() {
            self.input.pop();
        } else if event.is_escape() {
            self.input.clear();
        } else if let Some(ch) = event.printable() {
            if self.input.len() < MAX_INPUT_LEN {
                self.input.push(ch);
            }
        }
        ShellAction::Continue
    }

    /// Echoes `line` after the prompt, then runs it
    ///
    /// `Clear` is handled here; every other action is for the host.
    pub fn execute_line(&mut self, fs: &mut Filesystem, line: &str) -> ShellAction {
        let mut echo = self.prompt(fs);
        echo.segments.push((line.to_string(), Style::Normal));
        self.print(echo);

        let Some(command) = CommandLine::parse(line) else {
            return ShellAction::Continue;
        };

        match CommandHandler::new(fs).execute(&command) {
            Ok(output) => {
                for line in output.lines {
                    self.print(line);
                }
                match output.action {
                    ShellAction::Clear => {
                        self.scrollback.clear();
                        ShellAction::Continue
                    }
                    ShellAction::OpenEditor(path) => {
                        info!(path = %path, "opening editor");
                        ShellAction::OpenEditor(path)
                    }
                    action => action,
                }
            }
            Err(err) => {
                debug!(command = %command.command, error = %err, "command failed");
                self.print(OutputLine::styled(err.render(&command.command), Style::Error));
                ShellAction::Continue
            }
        }
    }

    /// `<hostname>:<cwd>$ ` with its colours
    pub fn prompt(&self, fs: &Filesystem) -> OutputLine {
        OutputLine::styled(self.hostname.as_str(), Style::Bold)
            .with(":", Style::Normal)
            .with(fs.current_path(), Style::Directory)
            .with("$ ", Style::Normal)
    }

    /// Draws the recent output with the prompt line below it
    pub fn render<S: DisplaySink>(&self, fs: &Filesystem, sink: &mut S) {
        let (cols, rows) = sink.dims();
        let row = sink.render_scrollback(&self.scrollback).min(rows.saturating_sub(1));

        let prompt = self.prompt(fs);
        let mut col = 0;
        for (text, style) in &prompt.segments {
            col += sink.write_str_at(col, row, text, style.to_vga_attr());
        }

        // keep the end of a long line in view
        let room = cols.saturating_sub(col + 1);
        let start = self.input.len().saturating_sub(room);
        let shown = &self.input[start..];
        col += sink.write_str_at(col, row, shown, Style::Normal.to_vga_attr());
        sink.draw_cursor(col, row, Style::Normal.to_vga_attr());
    }
}
