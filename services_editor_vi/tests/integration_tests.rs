//! Integration tests for the vi editor
//!
//! These tests drive complete editing sessions against a real filesystem
//! using key press events.

use console_vga::TextGrid;
use editor_core::{EditorLimits, EditorMode};
use fs_tree::{Filesystem, FsLimits, NodeKind};
use input_types::{scancode, KeyEvent};
use services_editor_vi::{EditorAction, EditorSession};
use sha2::{Digest, Sha256};

fn fs() -> Filesystem {
    Filesystem::new(FsLimits::default()).unwrap()
}

fn press(session: &mut EditorSession, fs: &mut Filesystem, keys: &[KeyEvent]) -> Vec<EditorAction> {
    keys.iter().map(|key| session.handle_key(fs, *key)).collect()
}

fn chars(text: &str) -> Vec<KeyEvent> {
    text.chars().map(KeyEvent::char).collect()
}

fn screen_hash(session: &EditorSession) -> [u8; 32] {
    let mut grid = TextGrid::vga();
    session.render(&mut grid);
    let mut hasher = Sha256::new();
    for row in grid.screen_text() {
        hasher.update(row.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().into()
}

#[test]
fn test_hi_write_quit_creates_file() {
    let mut fs = fs();
    let mut session = EditorSession::open(&fs, "hi.txt", EditorLimits::default());

    let mut keys = chars("ihi");
    keys.push(KeyEvent::escape());
    keys.extend(chars(":wq"));
    keys.push(KeyEvent::enter());
    let actions = press(&mut session, &mut fs, &keys);

    assert_eq!(actions.last(), Some(&EditorAction::Quit));
    assert_eq!(session.core().mode(), EditorMode::Exit);

    let id = fs.resolve("/hi.txt").unwrap();
    assert_eq!(fs.read(id).unwrap(), b"hi");
}

#[test]
fn test_edit_existing_file_in_subdirectory() {
    let mut fs = fs();
    fs.create_path("docs", NodeKind::Directory).unwrap();
    let id = fs.create_path("docs/todo", NodeKind::Regular).unwrap();
    fs.write(id, b"alpha\nbeta\ngamma").unwrap();

    let mut session = EditorSession::open(&fs, "docs/todo", EditorLimits::default());
    // delete "beta", then append "!" to "gamma"
    let mut keys = chars("jdlllla!");
    keys.push(KeyEvent::escape());
    keys.extend(chars(":w\n"));
    press(&mut session, &mut fs, &keys);

    assert_eq!(fs.read(id).unwrap(), b"alpha\ngamma!");
    assert!(!session.core().dirty());
}

#[test]
fn test_arrow_keys_in_insert_mode() {
    let mut fs = fs();
    let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());

    let mut keys = chars("iac");
    keys.push(KeyEvent::special(scancode::LEFT));
    keys.extend(chars("b"));
    keys.push(KeyEvent::enter());
    keys.extend(chars("d"));
    keys.push(KeyEvent::special(scancode::UP));
    keys.extend(chars("X"));
    press(&mut session, &mut fs, &keys);

    assert_eq!(session.core().mode(), EditorMode::Insert);
    assert_eq!(session.core().buffer().lines(), &["aXb", "dc"]);
}

#[test]
fn test_quit_blocked_then_forced() {
    let mut fs = fs();
    let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());

    let mut keys = chars("ohello");
    keys.push(KeyEvent::escape());
    keys.extend(chars(":q\n"));
    let actions = press(&mut session, &mut fs, &keys);
    assert_eq!(actions.last(), Some(&EditorAction::Continue));
    assert!(!session.is_finished());

    let actions = press(&mut session, &mut fs, &chars(":q!\n"));
    assert_eq!(actions.last(), Some(&EditorAction::Quit));
    assert!(fs.resolve("a.txt").is_err());
}

#[test]
fn test_unknown_command_reported() {
    let mut fs = fs();
    let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());

    press(&mut session, &mut fs, &chars(":set nu\n"));
    assert_eq!(session.core().status_message(), "Unknown command: set nu");
    assert_eq!(session.core().mode(), EditorMode::Normal);
}

#[test]
fn test_command_escape_discards() {
    let mut fs = fs();
    let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());

    let mut keys = chars(":wq");
    keys.push(KeyEvent::backspace());
    keys.push(KeyEvent::escape());
    press(&mut session, &mut fs, &keys);

    assert_eq!(session.core().mode(), EditorMode::Normal);
    assert_eq!(session.core().command_buffer(), "");
    assert!(fs.resolve("a.txt").is_err());
}

#[test]
fn test_file_limits_applied_on_open() {
    let mut fs = fs();
    let id = fs.create_path("big", NodeKind::Regular).unwrap();
    let long_line = "y".repeat(100);
    let content: Vec<&str> = std::iter::repeat(long_line.as_str()).take(60).collect();
    fs.write(id, content.join("\n").as_bytes()).unwrap();

    let session = EditorSession::open(&fs, "big", EditorLimits::default());
    let buffer = session.core().buffer();
    // 4096-byte content cap cuts the file first
    assert!(buffer.line_count() <= 50);
    assert!(buffer.lines().iter().all(|line| line.len() <= 75));
}

#[test]
fn test_same_keys_same_screen() {
    let keys = {
        let mut keys = chars("ifirst line");
        keys.push(KeyEvent::enter());
        keys.extend(chars("second"));
        keys.push(KeyEvent::escape());
        keys.extend(chars("kx:"));
        keys
    };

    let run = || {
        let mut fs = fs();
        let mut session = EditorSession::open(&fs, "a.txt", EditorLimits::default());
        press(&mut session, &mut fs, &keys);
        screen_hash(&session)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_render_after_save() {
    let mut fs = fs();
    let mut session = EditorSession::open(&fs, "notes", EditorLimits::default());

    let mut keys = chars("ihello");
    keys.push(KeyEvent::escape());
    keys.extend(chars(":w\n"));
    press(&mut session, &mut fs, &keys);

    let mut grid = TextGrid::vga();
    session.render(&mut grid);
    assert_eq!(grid.row_text(0).unwrap(), "   1 hello");
    let status = grid.row_text(23).unwrap();
    assert!(status.starts_with("notes"));
    assert!(status.ends_with("-- NORMAL --"));
    assert_eq!(grid.row_text(24).unwrap(), "File saved");
}
