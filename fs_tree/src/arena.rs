//! Bump arena
//!
//! A fixed-capacity pool that hands out byte ranges in order. There is no
//! free operation: bytes taken by a node stay consumed after the node is
//! deleted, so `used()` only ever grows. Slot reuse in the node store keeps
//! the node count bounded, but the arena itself leaks until the filesystem
//! is dropped.

use thiserror::Error;

/// Allocation failure
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena exhausted: requested {requested} bytes, {available} available")]
    OutOfMemory { requested: usize, available: usize },
}

/// Monotonic allocator over a fixed byte budget
#[derive(Debug, Clone)]
pub struct BumpArena {
    capacity: usize,
    next: usize,
}

impl BumpArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            next: 0,
        }
    }

    /// Reserves `len` bytes, failing if fewer remain
    ///
    /// Only the accounting lives here; callers keep their own storage and
    /// grow it on demand up to what they reserved.
    pub fn allocate(&mut self, len: usize) -> Result<(), ArenaError> {
        let available = self.available();
        if len > available {
            return Err(ArenaError::OutOfMemory {
                requested: len,
                available,
            });
        }

        self.next += len;
        Ok(())
    }

    pub fn used(&self) -> usize {
        self.next
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.capacity - self.next
    }
}
