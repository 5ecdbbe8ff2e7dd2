//! Branch-and-bound search for the shortest Hamiltonian cycle
//!
//! This module provides two searches over the same path model:
//! - Sequential: single-threaded depth-first reference search
//! - Parallel: breadth-first fan-out through a shared queue, then one
//!   depth-first worker per thread sharing the best cycle for pruning

pub mod config;
pub mod expand;
pub mod parallel;
pub mod path;
pub mod result;
pub mod sequential;
pub mod stack;

pub use config::Algorithm;
pub use parallel::{ParallelConfig, ParallelResult, ParallelSearch, run_parallel_search, solve};
pub use path::Path;
pub use result::{SearchResult, SearchStatistics};
pub use sequential::SequentialSearch;

use crate::graph::Graph;

/// Trait for searches that find the shortest cycle through every node
pub trait TourSearch {
    /// Search `graph` exhaustively for its shortest Hamiltonian cycle
    ///
    /// # Returns
    /// A SearchResult containing the best cycle (if any) and statistics
    fn search(&mut self, graph: &Graph) -> SearchResult;

    /// Get statistics from the most recent search
    fn statistics(&self) -> SearchStatistics;

    /// Reset the search state for a new search
    fn reset(&mut self);
}

/// Build the search selected by `algorithm`.
pub fn searcher(algorithm: Algorithm, parallel: ParallelConfig) -> Box<dyn TourSearch> {
    match algorithm {
        Algorithm::Sequential => Box::new(SequentialSearch::new()),
        Algorithm::Parallel => Box::new(ParallelSearch::new(parallel)),
    }
}
