//! Shortest Hamiltonian cycle search on weighted directed graphs.
//!
//! The core is a parallel branch-and-bound search ([`search::parallel`])
//! over an in-place path model ([`search::path`]). Around it sit the graph
//! file format ([`graph`]), a random graph generator ([`generate`]), a
//! single-threaded reference search ([`search::sequential`]) and the
//! benchmark statistics aggregator ([`benchstat`]).

pub mod benchstat;
pub mod generate;
pub mod graph;
pub mod search;

pub use graph::{Graph, GraphError, Weight};
pub use search::{Path, solve};
