//! Editor session: one open file, driven key by key

use editor_core::{CoreIoRequest, CoreOutcome, EditorCore, EditorLimits, Key, TextBuffer};
use input_types::{scancode, KeyEvent};
use tracing::{debug, info, warn};

use crate::io::{EditorError, EditorIo, OpenResult};
use crate::render::{EditorView, MAX_TEXT_ROWS};

/// File name used when `edit` is given no argument
pub const DEFAULT_FILENAME: &str = "untitled.txt";

/// What the host should do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Continue editing
    Continue,
    /// The session reached `Exit`; drop it and return to the shell
    Quit,
    /// The buffer was written
    Saved { bytes: usize },
}

/// Translates a key press into an editor key
///
/// Special scancodes win over the decoded character, so Enter typed as
/// `'\n'` and Enter reported only by scancode behave the same.
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    match event.scancode {
        scancode::ESCAPE => return Some(Key::Escape),
        scancode::BACKSPACE => return Some(Key::Backspace),
        scancode::ENTER => return Some(Key::Enter),
        scancode::UP => return Some(Key::Up),
        scancode::DOWN => return Some(Key::Down),
        scancode::LEFT => return Some(Key::Left),
        scancode::RIGHT => return Some(Key::Right),
        _ => {}
    }

    match event.text {
        Some('\n') | Some('\r') => Some(Key::Enter),
        _ => event.printable().map(Key::Char),
    }
}

/// The vi-like editor bound to a path
#[derive(Debug, Clone)]
pub struct EditorSession {
    core: EditorCore,
    view: EditorView,
}

impl EditorSession {
    /// Opens `path`
    ///
    /// Never fails: a missing file gives an empty buffer that the first
    /// save creates, and any other problem is shown on the status line.
    /// `viewport_rows` is capped at the rows the screen can draw so the
    /// cursor never scrolls out of sight.
    pub fn open<I: EditorIo>(io: &I, path: &str, limits: EditorLimits) -> Self {
        let limits = EditorLimits {
            viewport_rows: limits.viewport_rows.min(MAX_TEXT_ROWS),
            ..limits
        };
        let path = path.trim();
        let path = if path.is_empty() { DEFAULT_FILENAME } else { path };

        let (mut buffer, status) = match io.open(path) {
            Ok(OpenResult::Existing(bytes)) => (TextBuffer::from_bytes(&bytes, limits), None),
            Ok(OpenResult::NewFile) => (TextBuffer::new(limits), Some("[New File]".to_string())),
            Err(EditorError::IsDirectory(_)) => {
                (TextBuffer::new(limits), Some("is a directory".to_string()))
            }
            Err(err) => {
                warn!(path, error = %err, "editor open failed");
                (TextBuffer::new(limits), Some(err.to_string()))
            }
        };
        buffer.set_path(path);
        info!(path, lines = buffer.line_count(), "editor opened");

        let mut core = EditorCore::with_buffer(buffer);
        if let Some(status) = status {
            core.set_status(status);
        }
        Self {
            core,
            view: EditorView::new(),
        }
    }

    /// Feeds one key press through the state machine
    ///
    /// Keys with no editor meaning are ignored.
    pub fn handle_key<I: EditorIo>(&mut self, io: &mut I, event: KeyEvent) -> EditorAction {
        let Some(key) = map_key(&event) else {
            return EditorAction::Continue;
        };
        self.apply_key(io, key)
    }

    pub fn apply_key<I: EditorIo>(&mut self, io: &mut I, key: Key) -> EditorAction {
        let outcome = self.core.apply_key(key);
        debug!(?key, mode = self.core.mode().as_str(), "editor key");

        match outcome {
            CoreOutcome::RequestIo(request) => self.perform_io(io, request),
            CoreOutcome::RequestExit { forced } => {
                info!(path = self.path(), forced, "editor closed");
                EditorAction::Quit
            }
            CoreOutcome::Continue | CoreOutcome::Changed | CoreOutcome::StatusMessage(_) => {
                EditorAction::Continue
            }
        }
    }

    /// Writes the buffer to its path
    pub fn save<I: EditorIo>(&mut self, io: &mut I) -> EditorAction {
        self.perform_io(io, CoreIoRequest::Save)
    }

    fn perform_io<I: EditorIo>(&mut self, io: &mut I, request: CoreIoRequest) -> EditorAction {
        let path = self.core.buffer().path().to_string();
        let content = self.core.buffer().as_content();

        let saved = match io.save(&path, content.as_bytes()) {
            Ok(bytes) => {
                info!(path = %path, bytes, "file saved");
                Some(bytes)
            }
            Err(err) => {
                warn!(path = %path, error = %err, "save failed");
                None
            }
        };

        match (self.core.complete_save(request, saved.is_some()), saved) {
            (CoreOutcome::RequestExit { .. }, _) => {
                info!(path = %path, "editor closed");
                EditorAction::Quit
            }
            (_, Some(bytes)) => EditorAction::Saved { bytes },
            (_, None) => EditorAction::Continue,
        }
    }

    /// True once the session reached `Exit`
    pub fn is_finished(&self) -> bool {
        self.core.mode().is_exit()
    }

    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    pub fn path(&self) -> &str {
        self.core.buffer().path()
    }

    pub fn view(&self) -> &EditorView {
        &self.view
    }

    /// Draws the session into `sink`
    pub fn render<S: console_vga::DisplaySink>(&self, sink: &mut S) {
        self.view.render(&self.core, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editor_core::EditorMode;
    use fs_tree::{Filesystem, FsError, FsLimits, NodeKind};

    fn fs() -> Filesystem {
        Filesystem::new(FsLimits::default()).unwrap()
    }

    fn type_str<I: EditorIo>(session: &mut EditorSession, io: &mut I, text: &str) -> EditorAction {
        let mut last = EditorAction::Continue;
        for ch in text.chars() {
            last = session.handle_key(io, KeyEvent::char(ch));
        }
        last
    }

    /// Storage that refuses every save
    struct FullDisk;

    impl EditorIo for FullDisk {
        fn open(&self, _path: &str) -> Result<OpenResult, EditorError> {
            Ok(OpenResult::NewFile)
        }

        fn save(&mut self, _path: &str, _content: &[u8]) -> Result<usize, EditorError> {
            Err(EditorError::Fs(FsError::OutOfMemory {
                requested: 128,
                available: 0,
            }))
        }
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(&KeyEvent::char('h')), Some(Key::Char('h')));
        assert_eq!(map_key(&KeyEvent::char(':')), Some(Key::Char(':')));
        assert_eq!(map_key(&KeyEvent::enter()), Some(Key::Enter));
        assert_eq!(map_key(&KeyEvent::escape()), Some(Key::Escape));
        assert_eq!(map_key(&KeyEvent::backspace()), Some(Key::Backspace));
        assert_eq!(map_key(&KeyEvent::special(scancode::UP)), Some(Key::Up));
        assert_eq!(map_key(&KeyEvent::special(scancode::TAB)), None);
        assert_eq!(map_key(&KeyEvent::new(Some('\r'), 0)), Some(Key::Enter));
    }

    #[test]
    fn test_scancode_wins_over_text() {
        let event = KeyEvent::new(Some('x'), scancode::LEFT);
        assert_eq!(map_key(&event), Some(Key::Left));
    }

    #[test]
    fn test_open_new_file() {
        let fs = fs();
        let session = EditorSession::open(&fs, "new.txt", EditorLimits::default());

        assert_eq!(session.path(), "new.txt");
        assert_eq!(session.core().status_message(), "[New File]");
        assert!(session.core().buffer().is_empty());
        assert_eq!(session.core().mode(), EditorMode::Normal);
    }

    #[test]
    fn test_open_clamps_viewport_to_screen() {
        let mut fs = fs();
        let limits = EditorLimits {
            viewport_rows: 100,
            ..EditorLimits::default()
        };
        let mut session = EditorSession::open(&fs, "tall.txt", limits);
        assert_eq!(session.core().buffer().limits().viewport_rows, MAX_TEXT_ROWS);

        session.handle_key(&mut fs, KeyEvent::char('i'));
        type_str(&mut session, &mut fs, &"x\n".repeat(29));
        type_str(&mut session, &mut fs, "y");
        assert_eq!(session.core().cursor().row, 29);
        assert_eq!(session.core().buffer().view_offset(), 7);

        let mut grid = console_vga::TextGrid::vga();
        session.render(&mut grid);
        assert_eq!(grid.row_text(0).unwrap(), "   8 x");
        assert!(grid.row_text(22).unwrap().starts_with("  30 y"));
    }

    #[test]
    fn test_open_default_name() {
        let fs = fs();
        let session = EditorSession::open(&fs, "  ", EditorLimits::default());
        assert_eq!(session.path(), DEFAULT_FILENAME);
    }

    #[test]
    fn test_open_existing_file() {
        let mut fs = fs();
        let id = fs.create_path("a.txt", NodeKind::Regular).unwrap();
        fs.write(id, b"first\nsecond\n").unwrap();

        let session = EditorSession::open(&fs, "a.txt", EditorLimits::default());
        assert_eq!(session.core().buffer().lines(), &["first", "second"]);
        assert_eq!(session.core().status_message(), "-- NORMAL --");
        assert!(!session.core().dirty());
    }

    #[test]
    fn test_open_directory() {
        let mut fs = fs();
        fs.create_path("docs", NodeKind::Directory).unwrap();

        let session = EditorSession::open(&fs, "docs", EditorLimits::default());
        assert_eq!(session.core().status_message(), "is a directory");
        assert!(session.core().buffer().is_empty());
    }

    #[test]
    fn test_write_command_saves() {
        let mut fs = fs();
        let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());

        type_str(&mut session, &mut fs, "iab\ncd");
        session.handle_key(&mut fs, KeyEvent::escape());
        let action = type_str(&mut session, &mut fs, ":w\n");

        assert_eq!(action, EditorAction::Saved { bytes: 5 });
        assert!(!session.core().dirty());
        assert_eq!(session.core().status_message(), "File saved");
        assert_eq!(session.core().mode(), EditorMode::Normal);

        let id = fs.resolve("a.txt").unwrap();
        assert_eq!(fs.read(id).unwrap(), b"ab\ncd");
    }

    #[test]
    fn test_write_quit() {
        let mut fs = fs();
        let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());

        type_str(&mut session, &mut fs, "ihi");
        session.handle_key(&mut fs, KeyEvent::escape());
        let action = type_str(&mut session, &mut fs, ":wq\n");

        assert_eq!(action, EditorAction::Quit);
        assert!(session.is_finished());
    }

    #[test]
    fn test_save_failure_keeps_dirty() {
        let mut io = FullDisk;
        let mut session = EditorSession::open(&io, "a.txt", EditorLimits::default());

        type_str(&mut session, &mut io, "ihi");
        session.handle_key(&mut io, KeyEvent::escape());
        let action = type_str(&mut session, &mut io, ":wq\n");

        assert_eq!(action, EditorAction::Continue);
        assert!(!session.is_finished());
        assert!(session.core().dirty());
        assert_eq!(session.core().status_message(), "Error saving file");
    }

    #[test]
    fn test_quit_blocked_when_dirty() {
        let mut fs = fs();
        let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());

        type_str(&mut session, &mut fs, "ix");
        session.handle_key(&mut fs, KeyEvent::escape());
        let action = type_str(&mut session, &mut fs, ":q\n");
        assert_eq!(action, EditorAction::Continue);
        assert_eq!(
            session.core().status_message(),
            "No write since last change (add ! to override)"
        );

        let action = type_str(&mut session, &mut fs, ":q!\n");
        assert_eq!(action, EditorAction::Quit);
        assert!(fs.resolve("a.txt").is_err());
    }

    #[test]
    fn test_keys_after_exit_are_ignored() {
        let mut fs = fs();
        let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());
        type_str(&mut session, &mut fs, ":q\n");
        assert!(session.is_finished());

        assert_eq!(type_str(&mut session, &mut fs, "ihello"), EditorAction::Continue);
        assert!(session.core().buffer().is_empty());
    }
}
