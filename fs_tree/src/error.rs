//! Filesystem error types

use crate::arena::ArenaError;
use crate::node::NodeId;
use std::fmt;
use thiserror::Error;

/// A bounded resource that ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Total live node count
    Nodes,
    /// Length of a single name
    NameLength,
    /// Length of a path string
    PathLength,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Nodes => write!(f, "too many nodes"),
            Capacity::NameLength => write!(f, "name too long"),
            Capacity::PathLength => write!(f, "path too long"),
        }
    }
}

/// Errors that can occur during filesystem operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("no such file or directory: {0}")]
    PathNotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("not a regular file: {0}")]
    NotAFile(String),

    #[error("already exists: {0}")]
    NameCollision(String),

    #[error("directory full: {0}")]
    DirectoryFull(String),

    #[error("directory not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("cannot delete the root directory")]
    CannotDeleteRoot,

    #[error("capacity exceeded: {0}")]
    CapacityExceeded(Capacity),

    #[error("out of memory: requested {requested} bytes, {available} available")]
    OutOfMemory { requested: usize, available: usize },

    #[error("invalid limits: {0}")]
    InvalidLimits(String),

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("node is already attached: {0}")]
    AlreadyAttached(String),

    #[error("cannot place a directory inside itself: {0}")]
    WouldCreateCycle(String),

    #[error("stale node reference: {0}")]
    StaleNode(NodeId),
}

impl From<ArenaError> for FsError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::OutOfMemory {
                requested,
                available,
            } => FsError::OutOfMemory {
                requested,
                available,
            },
        }
    }
}

/// Filesystem result
pub type FsResult<T> = Result<T, FsError>;
