//! # In-Memory Filesystem Tree
//!
//! This crate provides the hierarchical file store used by the shell and the editor.
//!
//! ## Philosophy
//!
//! - **Explicit context**: A `Filesystem` is a value created at startup and passed by
//!   reference to every caller. There is no global instance.
//! - **Indices, not pointers**: Nodes live in a single registry and refer to each other
//!   by generation-tagged `NodeId`s. The root is its own parent.
//! - **Fixed capacities**: Name length, path length, children per directory, content
//!   size and total node count are all bounded by `FsLimits`.
//! - **Failures are values**: Every operation reports problems through `FsError` and
//!   leaves the tree unchanged on failure.
//!
//! ## Resource model
//!
//! Node records and file contents are carved out of a monotonic `BumpArena`. Deleting a
//! node releases its registry slot but never its arena bytes. This is a known leak: a
//! session that keeps creating and deleting files eventually fails with
//! `FsError::OutOfMemory` even though the node count is low.

pub mod arena;
pub mod error;
pub mod limits;
pub mod node;
pub mod path;
pub mod tree;

pub use arena::{ArenaError, BumpArena};
pub use error::{Capacity, FsError, FsResult};
pub use limits::FsLimits;
pub use node::{Node, NodeId, NodeKind, NodeStore, NODE_RECORD_BYTES};
pub use path::{Component, ParsedPath, PathResolver};
pub use tree::{Filesystem, NodeStat, TreeEntry};
