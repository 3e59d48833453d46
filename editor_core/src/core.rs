//! EditorCore state machine
//!
//! Translates keys into buffer mutations and IO requests. The core never
//! touches storage: saving is a [`CoreIoRequest`] that the host performs and
//! reports back through [`EditorCore::complete_save`].

use alloc::string::{String, ToString};

use crate::{
    buffer::{Position, TextBuffer},
    command::{parse_command, Command},
    key::Key,
    limits::EditorLimits,
    mode::EditorMode,
    snapshot::EditorSnapshot,
};

pub const MSG_SAVED: &str = "File saved";
pub const MSG_SAVE_FAILED: &str = "Error saving file";
pub const MSG_UNSAVED: &str = "No write since last change (add ! to override)";

/// Outcome from applying a key to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Continue editing (no state change)
    Continue,
    /// State changed (buffer modified, mode changed, etc)
    Changed,
    /// The editor entered `Exit`
    RequestExit { forced: bool },
    /// Status line changed
    StatusMessage(String),
    /// Request IO operation from host
    RequestIo(CoreIoRequest),
}

/// IO request from editor core to host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreIoRequest {
    /// Save to current file
    Save,
    /// Save to current file, then exit if that cleared the dirty flag
    SaveAndQuit,
}

/// Editor core state machine
#[derive(Debug, Clone)]
pub struct EditorCore {
    mode: EditorMode,
    buffer: TextBuffer,
    command_buffer: String,
    status_message: String,
}

impl EditorCore {
    /// Create a new empty editor
    pub fn new(limits: EditorLimits) -> Self {
        Self::with_buffer(TextBuffer::new(limits))
    }

    /// Create an editor over an already loaded buffer
    pub fn with_buffer(buffer: TextBuffer) -> Self {
        Self {
            mode: EditorMode::Normal,
            buffer,
            command_buffer: String::new(),
            status_message: EditorMode::Normal.label().to_string(),
        }
    }

    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        match self.mode {
            EditorMode::Normal => self.handle_normal_mode(key),
            EditorMode::Insert => self.handle_insert_mode(key),
            EditorMode::Command => self.handle_command_mode(key),
            EditorMode::Exit => CoreOutcome::Continue,
        }
    }

    /// Report the result of a [`CoreIoRequest`] carried out by the host
    pub fn complete_save(&mut self, request: CoreIoRequest, saved: bool) -> CoreOutcome {
        if saved {
            self.buffer.mark_clean();
            self.set_status(MSG_SAVED);
        } else {
            self.set_status(MSG_SAVE_FAILED);
        }

        if request == CoreIoRequest::SaveAndQuit && !self.buffer.is_dirty() {
            self.mode = EditorMode::Exit;
            return CoreOutcome::RequestExit { forced: false };
        }
        CoreOutcome::StatusMessage(self.status_message.clone())
    }

    /// Get a complete snapshot of editor state (for parity testing)
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            mode: self.mode,
            cursor: self.buffer.cursor(),
            view_offset: self.buffer.view_offset(),
            buffer_lines: self.buffer.lines().to_vec(),
            dirty: self.buffer.is_dirty(),
            command_buffer: self.command_buffer.clone(),
            status_message: self.status_message.clone(),
        }
    }

    // Public accessors for rendering/testing
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.buffer.cursor()
    }

    pub fn dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    fn changed(applied: bool) -> CoreOutcome {
        if applied {
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    fn enter_insert(&mut self) -> CoreOutcome {
        self.mode = EditorMode::Insert;
        self.set_status(EditorMode::Insert.label());
        CoreOutcome::Changed
    }

    fn handle_normal_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Char('i') => self.enter_insert(),
            Key::Char('a') => {
                self.buffer.move_cursor(1, 0);
                self.enter_insert()
            }
            Key::Char('o') => {
                if self.buffer.open_line_below() {
                    self.enter_insert()
                } else {
                    CoreOutcome::Continue
                }
            }

            // Navigation
            Key::Char('h') | Key::Left => self.move_cursor(-1, 0),
            Key::Char('j') | Key::Down => self.move_cursor(0, 1),
            Key::Char('k') | Key::Up => self.move_cursor(0, -1),
            Key::Char('l') | Key::Right => self.move_cursor(1, 0),

            // Editing
            Key::Char('x') => Self::changed(self.buffer.delete_char_under_cursor()),
            Key::Char('d') => Self::changed(self.buffer.delete_line()),

            Key::Char(':') => {
                self.mode = EditorMode::Command;
                self.command_buffer.clear();
                CoreOutcome::Changed
            }

            _ => CoreOutcome::Continue,
        }
    }

    fn handle_insert_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Escape => {
                self.mode = EditorMode::Normal;
                self.set_status(EditorMode::Normal.label());
                // cursor rests on a character in Normal mode
                self.buffer.move_cursor(-1, 0);
                CoreOutcome::Changed
            }
            Key::Enter => Self::changed(self.buffer.insert_char('\n')),
            Key::Backspace => Self::changed(self.buffer.delete_char_before_cursor()),
            Key::Left => self.move_cursor(-1, 0),
            Key::Down => self.move_cursor(0, 1),
            Key::Up => self.move_cursor(0, -1),
            Key::Right => self.move_cursor(1, 0),
            other => match other.printable() {
                Some(ch) => Self::changed(self.buffer.insert_char(ch)),
                None => CoreOutcome::Continue,
            },
        }
    }

    fn handle_command_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Escape => {
                self.mode = EditorMode::Normal;
                self.command_buffer.clear();
                self.set_status(EditorMode::Normal.label());
                CoreOutcome::Changed
            }
            Key::Enter => {
                let outcome = self.execute_command();
                self.command_buffer.clear();
                if !self.mode.is_exit() {
                    self.mode = EditorMode::Normal;
                }
                outcome
            }
            Key::Backspace => {
                self.command_buffer.pop();
                CoreOutcome::Changed
            }
            other => match other.printable() {
                Some(ch) if self.command_buffer.len() < self.buffer.limits().max_command_len => {
                    self.command_buffer.push(ch);
                    CoreOutcome::Changed
                }
                _ => CoreOutcome::Continue,
            },
        }
    }

    fn execute_command(&mut self) -> CoreOutcome {
        match parse_command(&self.command_buffer) {
            Ok(Command::Quit { force }) => {
                if self.buffer.is_dirty() && !force {
                    self.set_status(MSG_UNSAVED);
                    CoreOutcome::StatusMessage(self.status_message.clone())
                } else {
                    self.mode = EditorMode::Exit;
                    CoreOutcome::RequestExit { forced: force }
                }
            }
            Ok(Command::Write) => CoreOutcome::RequestIo(CoreIoRequest::Save),
            Ok(Command::WriteQuit) => CoreOutcome::RequestIo(CoreIoRequest::SaveAndQuit),
            Err(err) => {
                self.set_status(err.to_string());
                CoreOutcome::StatusMessage(self.status_message.clone())
            }
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) -> CoreOutcome {
        let before = self.buffer.cursor();
        self.buffer.move_cursor(dx, dy);
        Self::changed(self.buffer.cursor() != before)
    }
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(EditorLimits::default())
    }
}
