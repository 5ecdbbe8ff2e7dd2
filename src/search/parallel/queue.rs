//! Fixed-capacity work queue for the fan-out phase.
//!
//! The queue starts with the single-node root path. A worker asking for work
//! either takes a path while others remain, which gives it an exclusive
//! subtree, or drains the last path and has to expand it in place to
//! produce more subtrees. The whole protocol runs under the queue lock.
//!
//! Expansion only happens on an empty queue and adds at most
//! `node_count - 1` children, so at most `node_count - 1` paths are ever
//! live and a capacity of `node_count` is enough.

use crate::graph::{Graph, Weight};
use crate::search::expand::{Frontier, expand};
use crate::search::parallel::incumbent::IncumbentHandle;
use crate::search::path::Path;
use crate::search::result::SearchStatistics;

/// Circular buffer of path snapshots.
#[derive(Debug)]
pub struct WorkQueue {
    items: Vec<Path>,
    /// Oldest live entry, `None` while empty.
    head: Option<usize>,
    /// Next free slot.
    tail: usize,
}

impl WorkQueue {
    /// Queue sized for a graph with `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self::with_capacity(node_count, node_count)
    }

    pub fn with_capacity(node_count: usize, capacity: usize) -> Self {
        Self {
            items: (0..capacity).map(|_| Path::new(node_count)).collect(),
            head: None,
            tail: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        match self.head {
            None => 0,
            Some(head) if self.tail > head => self.tail - head,
            Some(head) => self.capacity() - head + self.tail,
        }
    }

    /// Copy `path` into the next free slot.
    pub fn enqueue(&mut self, path: &Path) {
        assert!(
            self.head != Some(self.tail),
            "work queue overflow: capacity {} exhausted",
            self.capacity()
        );
        self.items[self.tail].copy_from(path);
        if self.head.is_none() {
            self.head = Some(self.tail);
        }
        self.tail = (self.tail + 1) % self.capacity();
    }

    /// Copy the oldest path into `out` and drop it from the queue.
    pub fn dequeue(&mut self, out: &mut Path) {
        let head = self.head.expect("dequeue from an empty work queue");
        out.copy_from(&self.items[head]);

        let next = (head + 1) % self.capacity();
        if next == self.tail {
            self.head = None;
            self.tail = 0;
        } else {
            self.head = Some(next);
        }
    }

    /// Hand the calling worker an exclusive subtree in `out`.
    ///
    /// Returns false once the queue is exhausted for good. When the worker
    /// drains the last entry it expands that path one level, re-queueing the
    /// children under the bound, and retries.
    pub fn try_hand_off(
        &mut self,
        graph: &Graph,
        incumbent: &IncumbentHandle<'_>,
        out: &mut Path,
        statistics: &mut SearchStatistics,
    ) -> bool {
        loop {
            if self.is_empty() {
                return false;
            }
            self.dequeue(out);
            if !self.is_empty() {
                statistics.subtrees_claimed += 1;
                return true;
            }

            statistics.fan_out_expansions += 1;
            let mut frontier = FanOut {
                queue: self,
                incumbent,
            };
            expand(graph, out, &mut frontier, statistics);
            if self.is_empty() {
                log::debug!(
                    "Fan-out queue drained after {} expansions",
                    statistics.fan_out_expansions
                );
            }
        }
    }
}

/// Routes the children of a fan-out expansion back into the queue.
struct FanOut<'q, 'g> {
    queue: &'q mut WorkQueue,
    incumbent: &'q IncumbentHandle<'g>,
}

impl Frontier for FanOut<'_, '_> {
    fn bound(&self) -> Weight {
        self.incumbent.bound()
    }

    fn keep(&mut self, child: &Path) {
        self.queue.enqueue(child);
    }

    fn complete(&mut self, cycle: &Path, statistics: &mut SearchStatistics) {
        self.incumbent.offer(cycle, statistics);
    }
}
