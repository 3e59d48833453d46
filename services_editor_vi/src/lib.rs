//! # VI-like Editor Service
//!
//! Binds the `editor_core` state machine to a filesystem and a display.
//!
//! ## Philosophy
//!
//! - **Modal editing**: Normal, Insert and Command modes live in `editor_core`;
//!   this crate only feeds keys in and carries out the IO the core asks for
//! - **Explicit context**: The filesystem is passed into every call that
//!   touches it. A session never holds on to it
//! - **Failures become status lines**: A failed open or save is reported on
//!   the command row and the session keeps running
//! - **Testable**: Sessions are driven by plain `KeyEvent` values and render
//!   into any `DisplaySink`
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A port of real vi/vim
//! - A full-featured editor with syntax highlighting
//! - Scriptable or pluggable
//!
//! ## Design
//!
//! - `EditorIo` is the storage seam; `fs_tree::Filesystem` implements it
//! - Input arrives as `input_types::KeyEvent` and is mapped to `editor_core::Key`
//! - A session that reaches `Exit` reports `EditorAction::Quit` and must be
//!   dropped by its host

pub mod editor;
pub mod io;
pub mod render;

pub use editor::{map_key, EditorAction, EditorSession, DEFAULT_FILENAME};
pub use io::{EditorError, EditorIo, EditorResult, OpenResult};
pub use render::{render, EditorView};
