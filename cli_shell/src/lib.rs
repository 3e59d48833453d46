//! # CLI Shell
//!
//! The command line that sits on top of the filesystem tree.
//!
//! ## Philosophy
//!
//! - **Thin parser**: a command word and its arguments, split on spaces.
//!   No pipes, no quoting, no variables
//! - **One line per failure**: every error is printed as `<cmd>: <message>`
//!   and leaves the filesystem as it was
//! - **Explicit context**: the filesystem is borrowed for each command, never
//!   owned or reached through a global
//! - **Testable**: the shell renders into any `DisplaySink` and keeps its
//!   output in a scrollback that tests can read back

pub mod commands;
pub mod error;
pub mod interactive;
pub mod tokenizer;

pub use commands::{CommandHandler, CommandOutput, OutputLine, ShellAction};
pub use error::{ShellError, ShellResult};
pub use interactive::{Shell, MAX_INPUT_LEN, SCROLLBACK_LINES};
pub use tokenizer::{CommandLine, MAX_WORD_LEN};
