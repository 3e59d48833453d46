//! Shell commands over the filesystem tree
//!
//! [`CommandHandler`] borrows the filesystem for one command at a time. Each
//! command either produces output lines or a [`ShellError`]; the filesystem
//! is left unchanged whenever an error is returned.

use console_vga::Style;
use fs_tree::{Filesystem, FsError, NodeId, NodeKind};
use tracing::debug;

use crate::error::{ShellError, ShellResult};
use crate::tokenizer::CommandLine;

/// File name used by `edit` and `vi` without an argument
pub const DEFAULT_EDIT_FILE: &str = "untitled.txt";

const HELP: &[&str] = &[
    "Commands:",
    "  help                 show this list",
    "  clear                clear the screen",
    "  echo [a] [b]         print arguments",
    "  version              show version",
    "  pwd                  print working directory",
    "  ls [dir]             list directory",
    "  cd [dir]             change directory",
    "  mkdir <dir>          create directory",
    "  rmdir <dir>          remove empty directory",
    "  touch <file>         create empty file",
    "  rm <file>            remove file",
    "  cp <src> <dst>       copy file",
    "  mv <src> <dst>       move file",
    "  cat <file>           print file",
    "  write <file> <text>  replace file content",
    "  stat <path>          show node details",
    "  tree [dir]           show directory tree",
    "  edit|vi [file]       open the editor",
    "  exit                 halt",
];

/// What the shell's host should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Continue,
    /// Open an editor session on the path
    OpenEditor(String),
    /// Wipe the output scrollback
    Clear,
    /// Stop the host
    Exit,
}

/// One output line made of styled pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub segments: Vec<(String, Style)>,
}

impl OutputLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::Normal)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            segments: vec![(text.into(), style)],
        }
    }

    pub fn with(mut self, text: impl Into<String>, style: Style) -> Self {
        self.segments.push((text.into(), style));
        self
    }

    /// The line without styling
    pub fn text(&self) -> String {
        self.segments.iter().map(|(text, _)| text.as_str()).collect()
    }
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<OutputLine>,
    pub action: ShellAction,
}

impl CommandOutput {
    fn lines(lines: Vec<OutputLine>) -> Self {
        Self {
            lines,
            action: ShellAction::Continue,
        }
    }

    fn empty() -> Self {
        Self::lines(Vec::new())
    }

    fn action(action: ShellAction) -> Self {
        Self {
            lines: Vec::new(),
            action,
        }
    }
}

/// Runs shell commands against a borrowed filesystem
pub struct CommandHandler<'a> {
    fs: &'a mut Filesystem,
}

impl<'a> CommandHandler<'a> {
    pub fn new(fs: &'a mut Filesystem) -> Self {
        Self { fs }
    }

    /// Dispatches a tokenized line
    pub fn execute(&mut self, line: &CommandLine) -> ShellResult<CommandOutput> {
        let cmd = line.command.as_str();
        debug!(command = cmd, args = line.args.len(), "shell command");

        match cmd {
            "help" => Ok(CommandOutput::lines(
                HELP.iter().map(|text| OutputLine::plain(*text)).collect(),
            )),
            "clear" => Ok(CommandOutput::action(ShellAction::Clear)),
            "echo" => Ok(CommandOutput::lines(vec![OutputLine::plain(
                Self::echo(line),
            )])),
            "version" => Ok(CommandOutput::lines(vec![OutputLine::styled(
                format!("Pebble shell v{}", env!("CARGO_PKG_VERSION")),
                Style::Info,
            )])),
            "exit" => Ok(CommandOutput::action(ShellAction::Exit)),
            "pwd" => Ok(CommandOutput::lines(vec![OutputLine::plain(self.pwd())])),
            "ls" => self.ls(line.arg(0)).map(CommandOutput::lines),
            "cd" => self.cd(line.arg(0)).map(|_| CommandOutput::empty()),
            "mkdir" => {
                let dir = Self::operand(line, "mkdir", 0)?;
                self.mkdir(dir).map(|_| CommandOutput::empty())
            }
            "rmdir" => {
                let dir = Self::operand(line, "rmdir", 0)?;
                self.rmdir(dir).map(|_| CommandOutput::empty())
            }
            "touch" => {
                let file = Self::operand(line, "touch", 0)?;
                self.touch(file).map(|_| CommandOutput::empty())
            }
            "rm" => {
                let file = Self::operand(line, "rm", 0)?;
                self.rm(file).map(|_| CommandOutput::empty())
            }
            "cp" => {
                let src = Self::operand(line, "cp", 0)?;
                let dst = Self::operand(line, "cp", 1)?;
                self.cp(src, dst).map(|_| CommandOutput::empty())
            }
            "mv" => {
                let src = Self::operand(line, "mv", 0)?;
                let dst = Self::operand(line, "mv", 1)?;
                self.mv(src, dst).map(|_| CommandOutput::empty())
            }
            "cat" => {
                let file = Self::operand(line, "cat", 0)?;
                self.cat(file).map(CommandOutput::lines)
            }
            "write" => {
                let file = Self::operand(line, "write", 0)?;
                let text = line
                    .rest(1)
                    .ok_or_else(|| ShellError::MissingOperand("write".to_string()))?;
                self.write(file, &text).map(|_| CommandOutput::empty())
            }
            "stat" => {
                let path = Self::operand(line, "stat", 0)?;
                self.stat(path).map(CommandOutput::lines)
            }
            "tree" => self.tree(line.arg(0)).map(CommandOutput::lines),
            "edit" | "vi" => {
                let path = line.arg(0).unwrap_or(DEFAULT_EDIT_FILE);
                Ok(CommandOutput::action(ShellAction::OpenEditor(
                    path.to_string(),
                )))
            }
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }

    fn operand<'l>(line: &'l CommandLine, command: &str, n: usize) -> ShellResult<&'l str> {
        line.arg(n)
            .ok_or_else(|| ShellError::MissingOperand(command.to_string()))
    }

    fn echo(line: &CommandLine) -> String {
        match (line.arg(0), line.arg(1)) {
            (Some(a), Some(b)) => format!("{} {}", a, b),
            (Some(a), None) => a.to_string(),
            _ => String::new(),
        }
    }

    /// Resolves `path`, reporting a missing node as `<path>: <missing>`
    fn lookup(&self, command: &'static str, path: &str, missing: &str) -> ShellResult<NodeId> {
        match self.fs.resolve(path) {
            Ok(id) => Ok(id),
            Err(FsError::PathNotFound(_)) => {
                Err(ShellError::failed(command, format!("{}: {}", path, missing)))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn is_dir(&self, id: NodeId) -> ShellResult<bool> {
        Ok(self.fs.node(id)?.is_dir())
    }

    pub fn pwd(&self) -> String {
        self.fs.current_path()
    }

    /// Child names in insertion order, directories highlighted
    pub fn ls(&self, path: Option<&str>) -> ShellResult<Vec<OutputLine>> {
        let dir = match path {
            Some(path) => {
                let id = self.lookup("ls", path, "no such directory")?;
                if !self.is_dir(id)? {
                    return Err(ShellError::failed("ls", format!("{}: not a directory", path)));
                }
                id
            }
            None => self.fs.cwd(),
        };

        self.fs
            .children(dir)?
            .iter()
            .map(|child| -> ShellResult<OutputLine> {
                let node = self.fs.node(*child)?;
                let style = if node.is_dir() {
                    Style::Directory
                } else {
                    Style::Normal
                };
                Ok(OutputLine::styled(node.name(), style))
            })
            .collect()
    }

    /// Without a path, returns to the root
    pub fn cd(&mut self, path: Option<&str>) -> ShellResult<()> {
        let Some(path) = path else {
            self.fs.change_directory("/")?;
            return Ok(());
        };
        self.lookup("cd", path, "no such directory")?;
        match self.fs.change_directory(path) {
            Ok(()) => Ok(()),
            Err(FsError::NotADirectory(_)) => {
                Err(ShellError::failed("cd", format!("{}: not a directory", path)))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn mkdir(&mut self, path: &str) -> ShellResult<()> {
        match self.fs.create_path(path, NodeKind::Directory) {
            Ok(_) => Ok(()),
            Err(FsError::NameCollision(_)) => {
                Err(ShellError::failed("mkdir", format!("{}: exists", path)))
            }
            Err(err) => Err(ShellError::failed(
                "mkdir",
                format!("cannot create {}: {}", path, err),
            )),
        }
    }

    pub fn rmdir(&mut self, path: &str) -> ShellResult<()> {
        let id = self.lookup("rmdir", path, "no such directory")?;
        if !self.is_dir(id)? {
            return Err(ShellError::failed("rmdir", format!("{}: not a directory", path)));
        }
        match self.fs.delete(id) {
            Ok(()) => Ok(()),
            Err(FsError::DirectoryNotEmpty(_)) => Err(ShellError::failed(
                "rmdir",
                format!("{}: directory not empty", path),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Creates an empty file; an existing node is left alone
    pub fn touch(&mut self, path: &str) -> ShellResult<()> {
        match self.fs.resolve(path) {
            Ok(_) => Ok(()),
            Err(FsError::PathNotFound(_)) => {
                self.fs.create_path(path, NodeKind::Regular)?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn rm(&mut self, path: &str) -> ShellResult<()> {
        let id = self.lookup("rm", path, "no such file")?;
        if self.is_dir(id)? {
            return Err(ShellError::failed("rm", format!("{}: is a directory", path)));
        }
        self.fs.delete(id)?;
        Ok(())
    }

    pub fn cp(&mut self, src: &str, dst: &str) -> ShellResult<()> {
        self.fs.copy(src, dst)?;
        Ok(())
    }

    pub fn mv(&mut self, src: &str, dst: &str) -> ShellResult<()> {
        self.fs.move_file(src, dst)?;
        Ok(())
    }

    /// File content, one output line per stored line
    pub fn cat(&self, path: &str) -> ShellResult<Vec<OutputLine>> {
        let id = self.lookup("cat", path, "no such file")?;
        if self.is_dir(id)? {
            return Err(ShellError::failed("cat", format!("{}: is a directory", path)));
        }
        let content = String::from_utf8_lossy(self.fs.read(id)?).into_owned();
        Ok(content.lines().map(OutputLine::plain).collect())
    }

    /// Replaces a file's content, creating the file if needed
    pub fn write(&mut self, path: &str, text: &str) -> ShellResult<usize> {
        let id = match self.fs.resolve(path) {
            Ok(id) => id,
            Err(FsError::PathNotFound(_)) => self.fs.create_path(path, NodeKind::Regular)?,
            Err(err) => return Err(err.into()),
        };
        if self.is_dir(id)? {
            return Err(ShellError::failed("write", format!("{}: is a directory", path)));
        }
        Ok(self.fs.write(id, text.as_bytes())?)
    }

    pub fn stat(&self, path: &str) -> ShellResult<Vec<OutputLine>> {
        let id = self.lookup("stat", path, "no such file or directory")?;
        let stat = self.fs.stat(id)?;

        let size = match stat.kind {
            NodeKind::Directory => format!("Entries: {}", stat.child_count),
            NodeKind::Regular => format!("Size: {} bytes", stat.size),
        };
        Ok(vec![
            OutputLine::plain(format!("File: {}", stat.name)),
            OutputLine::plain(format!("Type: {}", stat.kind)),
            OutputLine::plain(size),
            OutputLine::plain(format!("Created: {}", stat.created_at)),
            OutputLine::plain(format!("Modified: {}", stat.modified_at)),
        ])
    }

    /// Depth-first drawing of a directory with `|--` and `` `-- `` branches
    pub fn tree(&self, path: Option<&str>) -> ShellResult<Vec<OutputLine>> {
        let dir = match path {
            Some(path) => self.lookup("tree", path, "no such directory")?,
            None => self.fs.cwd(),
        };
        if !self.is_dir(dir)? {
            let name = path.unwrap_or_default();
            return Err(ShellError::failed("tree", format!("{}: not a directory", name)));
        }

        let mut lines = vec![OutputLine::styled(self.fs.node(dir)?.name(), Style::Directory)];
        // is_last of the open ancestor at each depth
        let mut open: Vec<bool> = Vec::new();
        for entry in self.fs.walk(dir)? {
            open.truncate(entry.depth);
            let mut prefix = String::new();
            for &ancestor_last in &open {
                prefix.push_str(if ancestor_last { "    " } else { "|   " });
            }
            prefix.push_str(if entry.is_last { "`-- " } else { "|-- " });

            let line = match entry.kind {
                NodeKind::Directory => OutputLine::plain(prefix)
                    .with(format!("{}/", entry.name), Style::Directory),
                NodeKind::Regular => OutputLine::plain(prefix).with(entry.name, Style::Normal),
            };
            lines.push(line);
            open.push(entry.is_last);
        }
        Ok(lines)
    }
}
