//! Search result types and statistics

use crate::graph::Weight;
use crate::search::config::Algorithm;
use crate::search::path::Path;
use std::time::Duration;

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The shortest complete cycle, if the graph has one
    pub best: Option<Path>,
    /// Statistics from the search
    pub statistics: SearchStatistics,
}

impl SearchResult {
    pub fn new(best: Option<Path>, statistics: SearchStatistics) -> Self {
        Self { best, statistics }
    }

    pub fn found_cycle(&self) -> bool {
        self.best.is_some()
    }

    /// Length of the best cycle, if any
    pub fn best_length(&self) -> Option<Weight> {
        self.best.as_ref().map(Path::len)
    }
}

/// Statistics from a search operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Algorithm used for the search
    pub algorithm: Algorithm,
    /// Total time spent searching
    pub elapsed_time: Duration,
    /// Paths popped from a stack or queue and expanded one level
    pub paths_expanded: u64,
    /// Extended paths dropped because they already reach the bound
    pub paths_pruned: u64,
    /// Cycles closed back to the start node
    pub cycles_completed: u64,
    /// Times the incumbent was replaced by a shorter cycle
    pub improvements_found: u64,
    /// Subtrees handed off from the shared queue (parallel only)
    pub subtrees_claimed: u64,
    /// Expansions run under the queue lock during fan-out (parallel only)
    pub fan_out_expansions: u64,
    /// Deepest the local stack grew
    pub max_stack_depth: usize,
}

impl SearchStatistics {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Add the counters of `other` into `self`.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.paths_expanded += other.paths_expanded;
        self.paths_pruned += other.paths_pruned;
        self.cycles_completed += other.cycles_completed;
        self.improvements_found += other.improvements_found;
        self.subtrees_claimed += other.subtrees_claimed;
        self.fan_out_expansions += other.fan_out_expansions;
        self.max_stack_depth = self.max_stack_depth.max(other.max_stack_depth);
    }

    /// Expanded paths per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.paths_expanded as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Algorithm: {}\n", self.algorithm));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Paths expanded: {}\n", self.paths_expanded));
        s.push_str(&format!("Throughput: {:.0} paths/sec\n", self.throughput()));
        s.push_str(&format!("Paths pruned: {}\n", self.paths_pruned));
        s.push_str(&format!("Cycles completed: {}\n", self.cycles_completed));
        s.push_str(&format!(
            "Improvements found: {}\n",
            self.improvements_found
        ));
        if self.algorithm == Algorithm::Parallel {
            s.push_str(&format!("Subtrees claimed: {}\n", self.subtrees_claimed));
            s.push_str(&format!(
                "Fan-out expansions: {}\n",
                self.fan_out_expansions
            ));
        }
        s.push_str(&format!("Max stack depth: {}\n", self.max_stack_depth));
        s
    }
}
