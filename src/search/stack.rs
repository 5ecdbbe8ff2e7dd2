//! Preallocated stack of path snapshots for depth-first search

use crate::search::path::Path;

/// Upper bound on the number of paths pending in one depth-first search.
pub fn max_pending_paths(node_count: usize) -> usize {
    (node_count * node_count.saturating_sub(1) / 2).max(1)
}

/// Arena of path buffers used as a LIFO stack.
///
/// Pushing copies into an existing slot and popping copies out of one, so
/// the stack never allocates after construction.
#[derive(Debug)]
pub struct WorkStack {
    items: Vec<Path>,
    len: usize,
}

impl WorkStack {
    /// Stack sized for a graph with `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self::with_capacity(node_count, max_pending_paths(node_count))
    }

    pub fn with_capacity(node_count: usize, capacity: usize) -> Self {
        Self {
            items: (0..capacity).map(|_| Path::new(node_count)).collect(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn push(&mut self, path: &Path) {
        assert!(
            self.len < self.items.len(),
            "work stack overflow: capacity {} exhausted",
            self.items.len()
        );
        self.items[self.len].copy_from(path);
        self.len += 1;
    }

    /// Copy the top path into `out` and drop it. Returns false if empty.
    pub fn pop_into(&mut self, out: &mut Path) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        out.copy_from(&self.items[self.len]);
        true
    }
}
