//! # Pebble Host Runtime
//!
//! This crate provides the host that runs the Pebble shell and editor.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The shell and the editor draw into a grid; only the
//!   host prints
//! - **Input is explicit events**: Key presses come from a script or from
//!   typed lines, one at a time
//! - **One focus at a time**: A key goes to the editor session if one is
//!   open, otherwise to the shell. Never both
//! - **Deterministic mode is first-class**: Scripted runs produce the same
//!   screen every time
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Creates the filesystem from configured limits
//! - Runs the event loop (input → route → render)
//! - Opens and tears down editor sessions on behalf of the shell
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Provide terminal emulation (ANSI/VT codes)
//! - Persist the filesystem between runs
//! - Run anything in the background

pub mod config;
pub mod input_script;
pub mod runtime;

pub use config::{ConfigError, HostRuntimeConfig, Limits};
pub use input_script::{InputScript, InputScriptError};
pub use runtime::{Focus, HostRuntime, HostRuntimeError};
