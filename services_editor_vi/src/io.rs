//! Document I/O operations

use fs_tree::{Filesystem, FsError, NodeKind};
use thiserror::Error;
use tracing::debug;

/// Editor error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("{0}")]
    Fs(#[from] FsError),

    #[error("{0}: is a directory")]
    IsDirectory(String),
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;

/// What opening a path found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenResult {
    /// An existing regular file and its bytes
    Existing(Vec<u8>),
    /// Nothing at the path yet; the first save creates it
    NewFile,
}

/// Storage as seen by an editor session
pub trait EditorIo {
    /// Looks up `path` without creating anything
    fn open(&self, path: &str) -> EditorResult<OpenResult>;

    /// Writes `content` to `path`, creating a regular file if nothing is
    /// there. Returns the number of bytes stored.
    fn save(&mut self, path: &str, content: &[u8]) -> EditorResult<usize>;
}

impl EditorIo for Filesystem {
    fn open(&self, path: &str) -> EditorResult<OpenResult> {
        let id = match self.resolve(path) {
            Ok(id) => id,
            Err(FsError::PathNotFound(_)) => return Ok(OpenResult::NewFile),
            Err(err) => return Err(err.into()),
        };
        if self.node(id)?.is_dir() {
            return Err(EditorError::IsDirectory(path.to_string()));
        }
        Ok(OpenResult::Existing(self.read(id)?.to_vec()))
    }

    fn save(&mut self, path: &str, content: &[u8]) -> EditorResult<usize> {
        let id = match self.resolve(path) {
            Ok(id) => id,
            Err(FsError::PathNotFound(_)) => {
                let id = self.create_path(path, NodeKind::Regular)?;
                debug!(node = %id, path, "created file for save");
                id
            }
            Err(err) => return Err(err.into()),
        };
        if self.node(id)?.is_dir() {
            return Err(EditorError::IsDirectory(path.to_string()));
        }
        Ok(self.write(id, content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fs_tree::FsLimits;

    fn fs() -> Filesystem {
        Filesystem::new(FsLimits::default()).unwrap()
    }

    #[test]
    fn test_open_missing_is_new_file() {
        let fs = fs();
        assert_eq!(fs.open("notes.txt"), Ok(OpenResult::NewFile));
    }

    #[test]
    fn test_open_existing() {
        let mut fs = fs();
        let id = fs.create_path("a.txt", NodeKind::Regular).unwrap();
        fs.write(id, b"one\ntwo").unwrap();

        assert_eq!(
            fs.open("a.txt"),
            Ok(OpenResult::Existing(b"one\ntwo".to_vec()))
        );
    }

    #[test]
    fn test_open_directory() {
        let mut fs = fs();
        fs.create_path("docs", NodeKind::Directory).unwrap();

        assert_eq!(
            fs.open("docs"),
            Err(EditorError::IsDirectory("docs".to_string()))
        );
    }

    #[test]
    fn test_save_creates_in_cwd() {
        let mut fs = fs();
        fs.create_path("docs", NodeKind::Directory).unwrap();
        fs.change_directory("docs").unwrap();

        assert_eq!(fs.save("a.txt", b"hi"), Ok(2));
        let id = fs.resolve("/docs/a.txt").unwrap();
        assert_eq!(fs.read(id).unwrap(), b"hi");
    }

    #[test]
    fn test_save_overwrites() {
        let mut fs = fs();
        fs.save("a.txt", b"first version").unwrap();
        fs.save("a.txt", b"second").unwrap();

        let id = fs.resolve("a.txt").unwrap();
        assert_eq!(fs.read(id).unwrap(), b"second");
        assert_eq!(fs.node_count(), 2);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let mut fs = fs();
        let err = fs.save("nope/a.txt", b"x").unwrap_err();
        assert!(matches!(err, EditorError::Fs(FsError::PathNotFound(_))));
        assert_eq!(fs.node_count(), 1);
    }

    #[test]
    fn test_save_onto_directory_fails() {
        let mut fs = fs();
        fs.create_path("docs", NodeKind::Directory).unwrap();
        assert_eq!(
            fs.save("docs", b"x"),
            Err(EditorError::IsDirectory("docs".to_string()))
        );
    }
}
