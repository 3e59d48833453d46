//! Host configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "hostname": "box", "limits": { "fs": { "max_children": 8 } } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use editor_core::EditorLimits;
use fs_tree::FsLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Capacities for the filesystem and the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub fs: FsLimits,
    pub editor: EditorLimits,
}

/// Host runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRuntimeConfig {
    /// Key script to run instead of reading stdin
    pub script: Option<PathBuf>,
    /// Maximum keys to process (0 = unlimited)
    pub max_steps: usize,
    pub limits: Limits,
    /// Shown in the shell prompt
    pub hostname: String,
    /// Print the final screen to stdout on exit
    pub print_screen: bool,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            script: None,
            max_steps: 0,
            limits: Limits::default(),
            hostname: "pebble".to_string(),
            print_screen: true,
        }
    }
}

impl HostRuntimeConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostRuntimeConfig::default();
        assert_eq!(config.hostname, "pebble");
        assert_eq!(config.max_steps, 0);
        assert!(config.print_screen);
        assert_eq!(config.limits.fs.max_children, 32);
        assert_eq!(config.limits.editor.max_lines, 50);
    }

    #[test]
    fn test_partial_json() {
        let config = HostRuntimeConfig::from_json(
            r#"{ "hostname": "box", "limits": { "fs": { "max_children": 8 }, "editor": { "max_lines": 10 } } }"#,
        )
        .unwrap();

        assert_eq!(config.hostname, "box");
        assert_eq!(config.limits.fs.max_children, 8);
        assert_eq!(config.limits.fs.max_nodes, 128);
        assert_eq!(config.limits.editor.max_lines, 10);
        assert_eq!(config.limits.editor.max_line_len, 75);
        assert!(config.script.is_none());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(
            HostRuntimeConfig::from_json("{}").unwrap(),
            HostRuntimeConfig::default()
        );
    }

    #[test]
    fn test_bad_json() {
        let err = HostRuntimeConfig::from_json("{ hostname: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config"));
    }

    #[test]
    fn test_missing_file() {
        let err = HostRuntimeConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
