//! Single-threaded reference search
//!
//! Runs the same depth-first branch-and-bound as the parallel workers with
//! a purely local incumbent. Used as the correctness and speed baseline for
//! the parallel search.

use crate::graph::{Graph, Weight};
use crate::search::config::{Algorithm, START_NODE};
use crate::search::expand::{Frontier, NO_BOUND, expand};
use crate::search::path::Path;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::stack::WorkStack;
use crate::search::TourSearch;
use std::time::Instant;

/// Depth-first branch-and-bound on the calling thread
pub struct SequentialSearch {
    statistics: SearchStatistics,
}

impl SequentialSearch {
    pub fn new() -> Self {
        Self {
            statistics: SearchStatistics::new(Algorithm::Sequential),
        }
    }
}

impl Default for SequentialSearch {
    fn default() -> Self {
        Self::new()
    }
}

struct LocalFrontier<'a> {
    stack: &'a mut WorkStack,
    winner: &'a mut Path,
}

impl Frontier for LocalFrontier<'_> {
    fn bound(&self) -> Weight {
        if self.winner.len() == 0 {
            NO_BOUND
        } else {
            self.winner.len()
        }
    }

    fn keep(&mut self, child: &Path) {
        self.stack.push(child);
    }

    fn complete(&mut self, cycle: &Path, statistics: &mut SearchStatistics) {
        if cycle.len() < self.bound() {
            self.winner.copy_from(cycle);
            statistics.improvements_found += 1;
            log::trace!("New best cycle {}", cycle);
        }
    }
}

impl TourSearch for SequentialSearch {
    fn search(&mut self, graph: &Graph) -> SearchResult {
        self.reset();
        let start_time = Instant::now();
        let node_count = graph.node_count();

        let mut stack = WorkStack::new(node_count);
        let mut winner = Path::new(node_count);
        let mut path = Path::starting_at(node_count, START_NODE);
        stack.push(&path);

        while stack.pop_into(&mut path) {
            let mut frontier = LocalFrontier {
                stack: &mut stack,
                winner: &mut winner,
            };
            expand(graph, &mut path, &mut frontier, &mut self.statistics);
            self.statistics.max_stack_depth = self.statistics.max_stack_depth.max(stack.len());
        }

        self.statistics.elapsed_time = start_time.elapsed();
        let best = (winner.len() != 0).then_some(winner);
        log::debug!(
            "Sequential search finished in {:.2?}: {:?}",
            self.statistics.elapsed_time,
            best.as_ref().map(Path::len)
        );
        SearchResult::new(best, self.statistics.clone())
    }

    fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }

    fn reset(&mut self) {
        self.statistics = SearchStatistics::new(Algorithm::Sequential);
    }
}
