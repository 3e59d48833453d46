//! Path parsing
//!
//! This module turns path strings into components. It never touches the
//! tree; [`crate::Filesystem::resolve`] walks the components.

/// One step of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component<'a> {
    /// `.`
    Current,
    /// `..`
    Parent,
    /// Exact, case-sensitive child name
    Name(&'a str),
}

/// A path split into components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath<'a> {
    /// Path started with `/`
    pub absolute: bool,
    pub components: Vec<Component<'a>>,
}

/// Path resolver
///
/// Handles splitting paths into components and validating names.
pub struct PathResolver;

impl PathResolver {
    /// Splits a path into components
    ///
    /// Empty components from repeated separators are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_tree::{Component, PathResolver};
    ///
    /// let parsed = PathResolver::parse("/docs//../notes");
    /// assert!(parsed.absolute);
    /// assert_eq!(
    ///     parsed.components,
    ///     vec![Component::Name("docs"), Component::Parent, Component::Name("notes")]
    /// );
    /// ```
    pub fn parse(path: &str) -> ParsedPath<'_> {
        let path = path.trim();
        let absolute = path.starts_with('/');
        let components = path
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| match part {
                "." => Component::Current,
                ".." => Component::Parent,
                name => Component::Name(name),
            })
            .collect();

        ParsedPath {
            absolute,
            components,
        }
    }

    /// Splits a path into its parent path and leaf name
    ///
    /// A path without `/` has the empty parent, which resolves to the
    /// current directory. Trailing slashes are ignored.
    ///
    /// ```
    /// use fs_tree::PathResolver;
    ///
    /// assert_eq!(PathResolver::split_parent("a.txt"), ("", "a.txt"));
    /// assert_eq!(PathResolver::split_parent("/a.txt"), ("/", "a.txt"));
    /// assert_eq!(PathResolver::split_parent("docs/a.txt"), ("docs", "a.txt"));
    /// ```
    pub fn split_parent(path: &str) -> (&str, &str) {
        let path = path.trim();
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() && !path.is_empty() {
            "/"
        } else {
            trimmed
        };

        match path.rfind('/') {
            None => ("", path),
            Some(0) => ("/", &path[1..]),
            Some(pos) => (&path[..pos], &path[pos + 1..]),
        }
    }

    /// Validates a single directory entry name
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\0')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative() {
        let parsed = PathResolver::parse("docs/notes.txt");
        assert!(!parsed.absolute);
        assert_eq!(
            parsed.components,
            vec![Component::Name("docs"), Component::Name("notes.txt")]
        );
    }

    #[test]
    fn test_parse_root() {
        let parsed = PathResolver::parse("/");
        assert!(parsed.absolute);
        assert!(parsed.components.is_empty());
    }

    #[test]
    fn test_parse_empty() {
        let parsed = PathResolver::parse("   ");
        assert!(!parsed.absolute);
        assert!(parsed.components.is_empty());
    }

    #[test]
    fn test_parse_dots() {
        let parsed = PathResolver::parse("./a/..");
        assert_eq!(
            parsed.components,
            vec![Component::Current, Component::Name("a"), Component::Parent]
        );
    }

    #[test]
    fn test_split_parent() {
        assert_eq!(PathResolver::split_parent("a/b/c"), ("a/b", "c"));
        assert_eq!(PathResolver::split_parent("/a/b/"), ("/a", "b"));
        assert_eq!(PathResolver::split_parent("/"), ("/", ""));
        assert_eq!(PathResolver::split_parent(""), ("", ""));
    }

    #[test]
    fn test_valid_names() {
        assert!(PathResolver::is_valid_name("todo.txt"));
        assert!(PathResolver::is_valid_name(".hidden"));
        assert!(!PathResolver::is_valid_name(""));
        assert!(!PathResolver::is_valid_name("."));
        assert!(!PathResolver::is_valid_name(".."));
        assert!(!PathResolver::is_valid_name("a/b"));
        assert!(!PathResolver::is_valid_name("a\0b"));
    }
}
