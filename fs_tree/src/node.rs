//! Node model and node store
//!
//! Nodes live in a single slot table and refer to each other by [`NodeId`].
//! A `NodeId` carries the generation of the slot it was issued from, so an
//! id kept past a `release` is detected instead of aliasing whatever node
//! reuses the slot.

use crate::arena::BumpArena;
use crate::error::{Capacity, FsError, FsResult};
use std::fmt;
use tracing::warn;

/// Arena bytes charged for every node record, on top of any content buffer
pub const NODE_RECORD_BYTES: usize = 128;

/// Generation-tagged index into the node table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}.{}", self.index, self.generation)
    }
}

/// Kind of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Regular,
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Regular => write!(f, "regular file"),
            NodeKind::Directory => write!(f, "directory"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeBody {
    /// `content` grows on write but never past the `capacity` charged to the arena
    File { content: Vec<u8>, capacity: usize },
    Directory { children: Vec<NodeId> },
}

/// A file or directory
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) created_at: u64,
    pub(crate) modified_at: u64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) body: NodeBody,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::File { .. } => NodeKind::Regular,
            NodeBody::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind() == NodeKind::Regular
    }

    /// Content length for files, 0 for directories
    pub fn size(&self) -> usize {
        match &self.body {
            NodeBody::File { content, .. } => content.len(),
            NodeBody::Directory { .. } => 0,
        }
    }

    /// Containing directory, `None` while detached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn modified_at(&self) -> u64 {
        self.modified_at
    }

    /// Child ids in insertion order; empty for files
    pub fn children(&self) -> &[NodeId] {
        match &self.body {
            NodeBody::Directory { children } => children,
            NodeBody::File { .. } => &[],
        }
    }

    /// Meaningful content bytes; `None` for directories
    pub fn content(&self) -> Option<&[u8]> {
        match &self.body {
            NodeBody::File { content, .. } => Some(content),
            NodeBody::Directory { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owner of every node, plus the arena that backs them
#[derive(Debug, Clone)]
pub struct NodeStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    max_nodes: usize,
    max_content: usize,
    clock: u64,
    arena: BumpArena,
}

impl NodeStore {
    pub fn new(max_nodes: usize, max_content: usize, arena_bytes: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            max_nodes,
            max_content,
            clock: 0,
            arena: BumpArena::new(arena_bytes),
        }
    }

    /// Advances and returns the logical clock
    pub fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Creates a detached node
    ///
    /// Regular files are charged `max_content` bytes on top of the node
    /// record. The charge is accounting only; content is stored as written.
    pub fn create(&mut self, name: &str, kind: NodeKind) -> FsResult<NodeId> {
        if self.live >= self.max_nodes {
            warn!(name = %name, limit = self.max_nodes, "node table full");
            return Err(FsError::CapacityExceeded(Capacity::Nodes));
        }

        let content_len = match kind {
            NodeKind::Regular => self.max_content,
            NodeKind::Directory => 0,
        };
        let charge = NODE_RECORD_BYTES
            .checked_add(content_len)
            .ok_or(FsError::OutOfMemory {
                requested: usize::MAX,
                available: self.arena.available(),
            })
            .and_then(|charge| self.arena.allocate(charge).map_err(FsError::from));
        if let Err(err) = charge {
            warn!(name = %name, error = %err, "arena exhausted");
            return Err(err);
        }

        let body = match kind {
            NodeKind::Regular => NodeBody::File {
                content: Vec::new(),
                capacity: content_len,
            },
            NodeKind::Directory => NodeBody::Directory {
                children: Vec::new(),
            },
        };

        let now = self.tick();
        let node = Node {
            name: name.to_string(),
            created_at: now,
            modified_at: now,
            parent: None,
            body,
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        };
        self.live += 1;
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> FsResult<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(FsError::StaleNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> FsResult<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(FsError::StaleNode(id))
    }

    /// Frees the registry slot; arena bytes stay consumed
    pub fn release(&mut self, id: NodeId) -> FsResult<Node> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .ok_or(FsError::StaleNode(id))?;
        let node = slot.node.take().ok_or(FsError::StaleNode(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Ok(node)
    }

    /// Live node count
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn arena(&self) -> &BumpArena {
        &self.arena
    }
}
