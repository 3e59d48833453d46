//! # Host Runtime
//!
//! The event loop that ties the filesystem, the shell and the editor together.

use std::fs;
use std::io::BufRead;

use cli_shell::{Shell, ShellAction};
use console_vga::TextGrid;
use fs_tree::{Filesystem, FsError};
use input_types::KeyEvent;
use services_editor_vi::{EditorAction, EditorSession};
use thiserror::Error;
use tracing::{info, trace};

use crate::config::{ConfigError, HostRuntimeConfig};
use crate::input_script::{InputScript, InputScriptError};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] FsError),
}

/// Which surface receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Shell,
    Editor,
}

/// Host runtime
pub struct HostRuntime {
    config: HostRuntimeConfig,
    fs: Filesystem,
    shell: Shell,
    /// The open editor session; `Some` means the editor has focus
    editor: Option<EditorSession>,
    screen: TextGrid,
    steps: usize,
    halted: bool,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let fs = Filesystem::new(config.limits.fs)?;
        let shell = Shell::new(config.hostname.as_str());

        let mut runtime = Self {
            config,
            fs,
            shell,
            editor: None,
            screen: TextGrid::vga(),
            steps: 0,
            halted: false,
        };
        runtime.render();
        Ok(runtime)
    }

    pub fn config(&self) -> &HostRuntimeConfig {
        &self.config
    }

    pub fn filesystem(&self) -> &Filesystem {
        &self.fs
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn focus(&self) -> Focus {
        if self.editor.is_some() {
            Focus::Editor
        } else {
            Focus::Shell
        }
    }

    /// Keys processed so far
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// True after `exit` or when the step limit was reached
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn screen(&self) -> &TextGrid {
        &self.screen
    }

    /// The current screen as 25 rows, trailing spaces removed
    pub fn screen_text(&self) -> Vec<String> {
        self.screen.screen_text()
    }

    /// Processes one key to completion, then redraws
    ///
    /// Returns false once the host has halted; further keys are ignored.
    pub fn step(&mut self, event: KeyEvent) -> bool {
        if self.halted {
            return false;
        }
        trace!(key = %event, focus = ?self.focus(), "routing key");

        match self.editor.as_mut() {
            Some(editor) => {
                if editor.handle_key(&mut self.fs, event) == EditorAction::Quit {
                    info!(path = editor.path(), "editor session ended");
                    self.editor = None;
                }
            }
            None => match self.shell.process_key(&mut self.fs, event) {
                ShellAction::OpenEditor(path) => {
                    let session =
                        EditorSession::open(&self.fs, &path, self.config.limits.editor);
                    self.editor = Some(session);
                }
                ShellAction::Exit => {
                    info!("shell requested exit");
                    self.halted = true;
                }
                ShellAction::Continue | ShellAction::Clear => {}
            },
        }

        self.steps += 1;
        if self.config.max_steps > 0 && self.steps >= self.config.max_steps {
            info!(steps = self.steps, "step limit reached");
            self.halted = true;
        }
        self.render();
        !self.halted
    }

    /// Feeds every key of `script` until it runs out or the host halts
    pub fn run_script(&mut self, script: InputScript) {
        for event in script {
            if !self.step(event) {
                break;
            }
        }
    }

    /// Types each line from `reader` followed by Enter
    pub fn run_lines<R: BufRead>(&mut self, reader: R) -> Result<(), HostRuntimeError> {
        for line in reader.lines() {
            let mut script = InputScript::new();
            script.push_line(&line?);
            self.run_script(script);
            if self.halted {
                break;
            }
        }
        Ok(())
    }

    /// Runs the configured script, or stdin lines when there is none
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        match self.config.script.clone() {
            Some(path) => {
                let text = fs::read_to_string(&path)?;
                let script = InputScript::from_text(&text)?;
                info!(path = %path.display(), keys = script.remaining(), "running script");
                self.run_script(script);
            }
            None => {
                let stdin = std::io::stdin();
                self.run_lines(stdin.lock())?;
            }
        }
        Ok(())
    }

    fn render(&mut self) {
        match &self.editor {
            Some(editor) => editor.render(&mut self.screen),
            None => self.shell.render(&self.fs, &mut self.screen),
        }
    }
}
