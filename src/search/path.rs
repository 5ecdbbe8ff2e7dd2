//! Fixed-capacity tour representation mutated in place
//!
//! A `Path` is allocated once with room for every node of the graph and is
//! then only ever changed through [`Path::extend`], [`Path::retract`] and
//! [`Path::copy_from`]. None of these allocate, so the search can keep every
//! buffer preallocated for the whole solve.
//!
//! `order_len` counts placements including the final closing step back to
//! the start node. That step adds the closing edge to `length` and bumps
//! `order_len` to `node_count + 1` without writing a new `order` slot and
//! without touching `visited`.

use crate::graph::{Graph, Weight};
use std::fmt;

/// Partial or complete tour
#[derive(Debug, Clone)]
pub struct Path {
    length: Weight,
    visited: Vec<bool>,
    order: Vec<usize>,
    order_len: usize,
}

impl Path {
    /// Create an empty path with room for `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            length: 0,
            visited: vec![false; node_count],
            order: vec![0; node_count],
            order_len: 0,
        }
    }

    /// Create a path holding only `start`.
    pub fn starting_at(node_count: usize, start: usize) -> Self {
        let mut path = Self::new(node_count);
        path.visited[start] = true;
        path.order[0] = start;
        path.order_len = 1;
        path
    }

    /// Accumulated weight of all recorded edges.
    pub fn len(&self) -> Weight {
        self.length
    }

    /// Number of placements performed, `node_count + 1` once closed.
    pub fn order_len(&self) -> usize {
        self.order_len
    }

    pub fn capacity(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_len == 0
    }

    /// Every node has been placed but the cycle is not closed yet.
    pub fn is_full(&self) -> bool {
        self.order_len == self.capacity()
    }

    /// The cycle has been closed back to the start node.
    pub fn is_complete(&self) -> bool {
        self.order_len == self.capacity() + 1
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.visited[node]
    }

    pub fn start(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.order[0])
    }

    /// Most recently placed node; the start node once the cycle is closed.
    pub fn last(&self) -> Option<usize> {
        match self.order_len {
            0 => None,
            n if n > self.capacity() => Some(self.order[0]),
            n => Some(self.order[n - 1]),
        }
    }

    /// The placed nodes in visiting order, without the closing revisit.
    pub fn nodes(&self) -> &[usize] {
        &self.order[..self.order_len.min(self.capacity())]
    }

    /// Whether `node` may be appended to this path.
    ///
    /// A visited node is only accepted when it closes a full path back to
    /// its start node.
    pub fn can_extend(&self, graph: &Graph, node: usize) -> bool {
        let Some(last) = self.last() else {
            return true;
        };
        if self.is_complete() || graph.weight(last, node) == 0 {
            return false;
        }
        if self.visited[node] {
            return self.is_full() && self.order[0] == node;
        }
        true
    }

    /// Append `node`. Callers check [`Path::can_extend`] first.
    pub fn extend(&mut self, graph: &Graph, node: usize) {
        let Some(last) = self.last() else {
            self.visited[node] = true;
            self.order[0] = node;
            self.order_len = 1;
            return;
        };
        assert!(
            !self.is_complete(),
            "cannot extend a closed cycle with node {}",
            node
        );

        self.length += graph.weight(last, node);
        if !self.visited[node] {
            self.visited[node] = true;
            self.order[self.order_len] = node;
        }
        self.order_len += 1;
    }

    /// Undo the most recent [`Path::extend`].
    pub fn retract(&mut self, graph: &Graph) {
        assert!(self.order_len > 0, "cannot retract from an empty path");

        if self.order_len == 1 {
            self.visited[self.order[0]] = false;
            self.order_len = 0;
            return;
        }

        let n = self.capacity();
        if self.order_len > n {
            // Closing step: start stays visited, no order slot to clear.
            self.length -= graph.weight(self.order[n - 1], self.order[0]);
            self.order_len = n;
            return;
        }

        let node = self.order[self.order_len - 1];
        let previous = self.order[self.order_len - 2];
        self.visited[node] = false;
        self.length -= graph.weight(previous, node);
        self.order_len -= 1;
    }

    /// Overwrite this path with `source` without reallocating.
    #[inline]
    pub fn copy_from(&mut self, source: &Path) {
        self.length = source.length;
        self.visited.copy_from_slice(&source.visited);
        self.order.copy_from_slice(&source.order);
        self.order_len = source.order_len;
    }
}

// Slots past `order_len` keep stale nodes after a retract.
impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.order_len == other.order_len
            && self.visited == other.visited
            && self.nodes() == other.nodes()
    }
}

impl Eq for Path {}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.length)?;
        let nodes = self
            .nodes()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("->");
        write!(f, "{}", nodes)?;
        if self.is_complete() {
            write!(f, "->{}", self.order[0])?;
        }
        Ok(())
    }
}
