#![no_std]

//! # Editor Core
//!
//! The modal line editor as a pure state machine.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same input trace => same editor state
//! - **Modal editing**: Normal, Insert and Command modes, plus a terminal Exit
//! - **Bounded**: line count, line length and command length are capped, and a
//!   keystroke that would exceed a cap is swallowed
//! - **No ambient authority**: IO requests are explicit, never automatic
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: lines, cursor, viewport and dirty flag
//! - EditorCore: State machine for modal editing
//! - CoreOutcome: Structured results from operations
//! - EditorSnapshot: Deterministic state for parity testing

extern crate alloc;

pub mod buffer;
pub mod command;
pub mod core;
pub mod key;
pub mod limits;
pub mod mode;
pub mod snapshot;

pub use buffer::{Position, TextBuffer};
pub use command::{parse_command, Command, CommandError};
pub use self::core::{CoreIoRequest, CoreOutcome, EditorCore};
pub use key::Key;
pub use limits::EditorLimits;
pub use mode::EditorMode;
pub use snapshot::EditorSnapshot;
