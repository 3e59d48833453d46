//! Filesystem tree
//!
//! [`Filesystem`] is the single owner of the node graph. Nodes are created
//! detached and only become reachable after [`Filesystem::attach`]. The
//! current directory is part of the context value, not a global.

use crate::error::{Capacity, FsError, FsResult};
use crate::limits::FsLimits;
use crate::node::{Node, NodeBody, NodeId, NodeKind, NodeStore};
use crate::path::{Component, PathResolver};
use tracing::{debug, info, warn};

/// Metadata reported by [`Filesystem::stat`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStat {
    pub name: String,
    pub kind: NodeKind,
    pub size: usize,
    pub child_count: usize,
    pub created_at: u64,
    pub modified_at: u64,
}

/// One line of a depth-first listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// 0 for direct children of the walked directory
    pub depth: usize,
    pub name: String,
    pub kind: NodeKind,
    /// Last entry among its siblings
    pub is_last: bool,
}

/// In-memory hierarchical filesystem
#[derive(Debug, Clone)]
pub struct Filesystem {
    store: NodeStore,
    root: NodeId,
    cwd: NodeId,
    limits: FsLimits,
}

impl Filesystem {
    /// Creates a filesystem holding only the root directory
    ///
    /// Fails with `InvalidLimits` when a single file could never fit in the
    /// arena.
    pub fn new(limits: FsLimits) -> FsResult<Self> {
        limits.validate()?;
        let mut store = NodeStore::new(limits.max_nodes, limits.max_content, limits.arena_bytes);
        let root = store.create("/", NodeKind::Directory)?;
        // root is its own parent
        store.get_mut(root)?.parent = Some(root);

        info!(
            max_nodes = limits.max_nodes,
            arena_bytes = limits.arena_bytes,
            "filesystem initialised"
        );

        Ok(Self {
            store,
            root,
            cwd: root,
            limits,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current working directory
    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn limits(&self) -> &FsLimits {
        &self.limits
    }

    pub fn node(&self, id: NodeId) -> FsResult<&Node> {
        self.store.get(id)
    }

    /// Live node count, root included
    pub fn node_count(&self) -> usize {
        self.store.live_count()
    }

    /// Arena bytes consumed so far; never decreases
    pub fn arena_used(&self) -> usize {
        self.store.arena().used()
    }

    pub fn arena_capacity(&self) -> usize {
        self.store.arena().capacity()
    }

    /// Creates a detached node
    ///
    /// Name collisions are not checked here; they only matter on attach.
    pub fn create(&mut self, name: &str, kind: NodeKind) -> FsResult<NodeId> {
        if !PathResolver::is_valid_name(name) {
            return Err(FsError::InvalidName(name.to_string()));
        }
        if name.len() > self.limits.max_name_len {
            return Err(FsError::CapacityExceeded(Capacity::NameLength));
        }

        let id = self.store.create(name, kind)?;
        debug!(node = %id, name = %name, kind = %kind, "node created");
        Ok(id)
    }

    /// Links a detached `child` into directory `parent`
    ///
    /// On failure the child stays detached. It still holds its registry slot
    /// and arena bytes until the caller deletes it.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> FsResult<()> {
        let parent_node = self.store.get(parent)?;
        if !parent_node.is_dir() {
            return Err(FsError::NotADirectory(parent_node.name.clone()));
        }
        let child_node = self.store.get(child)?;
        let child_name = child_node.name.clone();
        if child_node.parent.is_some() {
            return Err(FsError::AlreadyAttached(child_name));
        }
        if self.is_ancestor(child, parent)? {
            return Err(FsError::WouldCreateCycle(child_name));
        }
        if parent_node.children().len() >= self.limits.max_children {
            warn!(
                parent = %parent,
                limit = self.limits.max_children,
                "directory full"
            );
            return Err(FsError::DirectoryFull(parent_node.name.clone()));
        }
        if self.find_child(parent, &child_name).is_some() {
            return Err(FsError::NameCollision(child_name));
        }

        let now = self.store.tick();
        self.store.get_mut(child)?.parent = Some(parent);
        let parent_node = self.store.get_mut(parent)?;
        if let NodeBody::Directory { children } = &mut parent_node.body {
            children.push(child);
        }
        parent_node.modified_at = now;

        debug!(parent = %parent, node = %child, name = %child_name, "node attached");
        Ok(())
    }

    /// Unlinks the child called `name`, keeping sibling order
    pub fn detach(&mut self, parent: NodeId, name: &str) -> FsResult<NodeId> {
        let child = self
            .find_child(parent, name)
            .ok_or_else(|| FsError::PathNotFound(name.to_string()))?;
        self.unlink(parent, child)?;
        debug!(parent = %parent, node = %child, name = %name, "node detached");
        Ok(child)
    }

    /// Looks up a direct child by exact name
    pub fn find_child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        let node = self.store.get(dir).ok()?;
        node.children().iter().copied().find(|child| {
            self.store
                .get(*child)
                .map(|n| n.name == name)
                .unwrap_or(false)
        })
    }

    /// Resolves a path to a node
    ///
    /// Absolute paths start at root, everything else at the current
    /// directory. An empty path is the starting node itself.
    pub fn resolve(&self, path: &str) -> FsResult<NodeId> {
        if path.trim().len() > self.limits.max_path_len {
            return Err(FsError::CapacityExceeded(Capacity::PathLength));
        }

        let parsed = PathResolver::parse(path);
        let mut current = if parsed.absolute { self.root } else { self.cwd };

        for component in parsed.components {
            current = match component {
                Component::Current => current,
                Component::Parent => self.store.get(current)?.parent.unwrap_or(current),
                Component::Name(name) => self
                    .find_child(current, name)
                    .ok_or_else(|| FsError::PathNotFound(path.trim().to_string()))?,
            };
        }

        Ok(current)
    }

    pub fn change_directory(&mut self, path: &str) -> FsResult<()> {
        let target = self.resolve(path)?;
        if !self.store.get(target)?.is_dir() {
            return Err(FsError::NotADirectory(path.trim().to_string()));
        }
        self.cwd = target;
        Ok(())
    }

    /// Absolute path of any attached node
    pub fn path_of(&self, id: NodeId) -> FsResult<String> {
        let mut names = Vec::new();
        let mut current = id;
        while current != self.root {
            let node = self.store.get(current)?;
            names.push(node.name.as_str());
            match node.parent {
                Some(parent) => current = parent,
                // detached nodes have no path beyond their own name
                None => return Ok(node.name.clone()),
            }
        }

        if names.is_empty() {
            return Ok("/".to_string());
        }
        let mut path = String::new();
        for name in names.iter().rev() {
            path.push('/');
            path.push_str(name);
        }
        Ok(path)
    }

    pub fn current_path(&self) -> String {
        self.path_of(self.cwd).unwrap_or_else(|_| "/".to_string())
    }

    pub fn children(&self, dir: NodeId) -> FsResult<&[NodeId]> {
        let node = self.store.get(dir)?;
        if !node.is_dir() {
            return Err(FsError::NotADirectory(node.name.clone()));
        }
        Ok(node.children())
    }

    /// Child names in insertion order
    pub fn list(&self, dir: NodeId) -> FsResult<Vec<String>> {
        self.children(dir)?
            .iter()
            .map(|child| self.store.get(*child).map(|n| n.name.clone()))
            .collect()
    }

    pub fn stat(&self, id: NodeId) -> FsResult<NodeStat> {
        let node = self.store.get(id)?;
        Ok(NodeStat {
            name: node.name.clone(),
            kind: node.kind(),
            size: node.size(),
            child_count: node.children().len(),
            created_at: node.created_at,
            modified_at: node.modified_at,
        })
    }

    /// Depth-first listing below `dir`, children in insertion order
    pub fn walk(&self, dir: NodeId) -> FsResult<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        self.walk_into(dir, 0, &mut entries)?;
        Ok(entries)
    }

    fn walk_into(&self, dir: NodeId, depth: usize, out: &mut Vec<TreeEntry>) -> FsResult<()> {
        let children = self.children(dir)?;
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let node = self.store.get(*child)?;
            out.push(TreeEntry {
                depth,
                name: node.name.clone(),
                kind: node.kind(),
                is_last: i + 1 == count,
            });
            if node.is_dir() {
                self.walk_into(*child, depth + 1, out)?;
            }
        }
        Ok(())
    }

    pub fn read(&self, id: NodeId) -> FsResult<&[u8]> {
        let node = self.store.get(id)?;
        node.content()
            .ok_or_else(|| FsError::NotAFile(node.name.clone()))
    }

    /// Replaces a file's content
    ///
    /// Input longer than `max_content` is truncated without error; the
    /// returned count is what was actually stored.
    pub fn write(&mut self, id: NodeId, data: &[u8]) -> FsResult<usize> {
        let now = self.store.tick();
        let node = self.store.get_mut(id)?;
        let NodeBody::File { content, capacity } = &mut node.body else {
            return Err(FsError::NotAFile(node.name.clone()));
        };

        let written = data.len().min(*capacity);
        content.clear();
        content.extend_from_slice(&data[..written]);
        node.modified_at = now;

        debug!(
            node = %id,
            bytes = written,
            truncated = written < data.len(),
            "file written"
        );
        Ok(written)
    }

    /// Detaches a node from its parent and releases its registry slot
    ///
    /// Arena bytes are not reclaimed. Deleting the current directory moves
    /// the current directory to its parent.
    pub fn delete(&mut self, id: NodeId) -> FsResult<()> {
        if id == self.root {
            return Err(FsError::CannotDeleteRoot);
        }
        let node = self.store.get(id)?;
        if !node.children().is_empty() {
            return Err(FsError::DirectoryNotEmpty(node.name.clone()));
        }
        let parent = node.parent;

        if let Some(parent) = parent {
            self.unlink(parent, id)?;
        }
        if self.cwd == id {
            self.cwd = parent.unwrap_or(self.root);
        }
        let node = self.store.release(id)?;
        debug!(node = %id, name = %node.name, "node deleted");
        Ok(())
    }

    /// Creates a node at `path`, relative paths landing in the current directory
    ///
    /// A node that cannot be attached is deleted again before returning.
    pub fn create_path(&mut self, path: &str, kind: NodeKind) -> FsResult<NodeId> {
        let (parent_path, leaf) = PathResolver::split_parent(path);
        let parent = self.resolve_directory(parent_path)?;
        if self.find_child(parent, leaf).is_some() {
            return Err(FsError::NameCollision(leaf.to_string()));
        }

        let id = self.create(leaf, kind)?;
        self.attach_or_discard(parent, id)?;
        Ok(id)
    }

    /// Copies a regular file
    ///
    /// `dst` is split into a parent directory and a new leaf name, so an
    /// existing node at `dst` (a directory included) is a name collision.
    pub fn copy(&mut self, src: &str, dst: &str) -> FsResult<NodeId> {
        let source = self.resolve(src)?;
        let data = self
            .store
            .get(source)?
            .content()
            .ok_or_else(|| FsError::NotAFile(src.trim().to_string()))?
            .to_vec();

        let (parent_path, leaf) = PathResolver::split_parent(dst);
        let parent = self.resolve_directory(parent_path)?;
        if self.find_child(parent, leaf).is_some() {
            return Err(FsError::NameCollision(leaf.to_string()));
        }

        let copy = self.create(leaf, NodeKind::Regular)?;
        if let Err(err) = self.write(copy, &data) {
            self.discard(copy);
            return Err(err);
        }
        self.attach_or_discard(parent, copy)?;
        Ok(copy)
    }

    /// Moves a regular file as a copy followed by deleting the source
    ///
    /// If the source cannot be deleted the copy is removed and the source
    /// is left untouched.
    pub fn move_file(&mut self, src: &str, dst: &str) -> FsResult<NodeId> {
        let source = self.resolve(src)?;
        let copy = self.copy(src, dst)?;
        if let Err(err) = self.delete(source) {
            warn!(node = %copy, error = %err, "move failed, removing copy");
            self.discard(copy);
            return Err(err);
        }
        Ok(copy)
    }

    fn resolve_directory(&self, path: &str) -> FsResult<NodeId> {
        let dir = self.resolve(path)?;
        if !self.store.get(dir)?.is_dir() {
            return Err(FsError::NotADirectory(path.trim().to_string()));
        }
        Ok(dir)
    }

    fn attach_or_discard(&mut self, parent: NodeId, child: NodeId) -> FsResult<()> {
        if let Err(err) = self.attach(parent, child) {
            debug!(node = %child, error = %err, "attach failed, discarding node");
            self.discard(child);
            return Err(err);
        }
        Ok(())
    }

    fn discard(&mut self, id: NodeId) {
        if let Err(err) = self.delete(id) {
            warn!(node = %id, error = %err, "node left orphaned");
        }
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) -> FsResult<()> {
        let now = self.store.tick();
        let parent_node = self.store.get_mut(parent)?;
        let NodeBody::Directory { children } = &mut parent_node.body else {
            return Err(FsError::NotADirectory(parent_node.name.clone()));
        };
        let pos = children
            .iter()
            .position(|c| *c == child)
            .ok_or(FsError::StaleNode(child))?;
        children.remove(pos);
        parent_node.modified_at = now;
        self.store.get_mut(child)?.parent = None;
        Ok(())
    }

    /// True if `ancestor` is `node` or lies on its parent chain
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> FsResult<bool> {
        let mut current = node;
        loop {
            if current == ancestor {
                return Ok(true);
            }
            match self.store.get(current)?.parent {
                Some(parent) if parent != current => current = parent,
                _ => return Ok(false),
            }
        }
    }
}
