//! Filesystem capacities
//!
//! All limits are observable: exceeding one produces a distinct error (or, for
//! file content, the documented truncation).

use serde::{Deserialize, Serialize};

use crate::error::{FsError, FsResult};
use crate::node::NODE_RECORD_BYTES;

/// Default maximum file or directory name length, in bytes
pub const MAX_NAME_LEN: usize = 64;
/// Default maximum length of a path string, in bytes
pub const MAX_PATH_LEN: usize = 256;
/// Default maximum number of entries in one directory
pub const MAX_CHILDREN: usize = 32;
/// Default maximum file content size, in bytes
pub const MAX_CONTENT: usize = 4096;
/// Default maximum number of live nodes, root included
pub const MAX_NODES: usize = 128;
/// Default arena pool size, in bytes
pub const ARENA_BYTES: usize = 1024 * 1024;

/// Capacity limits for a filesystem instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsLimits {
    pub max_name_len: usize,
    pub max_path_len: usize,
    pub max_children: usize,
    pub max_content: usize,
    pub max_nodes: usize,
    pub arena_bytes: usize,
}

impl Default for FsLimits {
    fn default() -> Self {
        Self {
            max_name_len: MAX_NAME_LEN,
            max_path_len: MAX_PATH_LEN,
            max_children: MAX_CHILDREN,
            max_content: MAX_CONTENT,
            max_nodes: MAX_NODES,
            arena_bytes: ARENA_BYTES,
        }
    }
}

impl FsLimits {
    /// Checks that the root and one full-size file fit in the arena
    pub fn validate(&self) -> FsResult<()> {
        let file = NODE_RECORD_BYTES.checked_add(self.max_content);
        let needed = file.and_then(|file| file.checked_add(NODE_RECORD_BYTES));
        match needed {
            Some(needed) if needed <= self.arena_bytes => Ok(()),
            _ => Err(FsError::InvalidLimits(format!(
                "max_content {} does not fit in arena_bytes {}",
                self.max_content, self.arena_bytes
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = FsLimits::default();
        assert_eq!(limits.max_children, 32);
        assert_eq!(limits.max_content, 4096);
        assert_eq!(limits.max_nodes, 128);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let limits: FsLimits = serde_json::from_str(r#"{ "max_children": 4 }"#).unwrap();
        assert_eq!(limits.max_children, 4);
        assert_eq!(limits.max_content, MAX_CONTENT);
        assert_eq!(limits.arena_bytes, ARENA_BYTES);
    }

    #[test]
    fn test_validate() {
        assert!(FsLimits::default().validate().is_ok());

        let huge = FsLimits {
            max_content: usize::MAX,
            ..FsLimits::default()
        };
        assert!(matches!(huge.validate(), Err(FsError::InvalidLimits(_))));

        let tight = FsLimits {
            max_content: 64,
            arena_bytes: 2 * NODE_RECORD_BYTES + 64,
            ..FsLimits::default()
        };
        assert!(tight.validate().is_ok());
        let too_tight = FsLimits {
            arena_bytes: tight.arena_bytes - 1,
            ..tight
        };
        assert!(too_tight.validate().is_err());
    }
}
