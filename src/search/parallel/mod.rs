//! Parallel branch-and-bound over a shared fan-out queue.
//!
//! # Architecture
//!
//! The parallel search consists of:
//! - A **work queue** seeded with the single-node root path. Workers take
//!   subtrees from it; whoever drains its last entry expands that entry one
//!   level under the queue lock until there is enough work to share
//! - **Workers**, one per thread, that search each claimed subtree
//!   depth-first on a private preallocated stack without taking the queue
//!   lock again
//! - A **shared incumbent** holding the shortest cycle so far behind its own
//!   lock, with a lock-free bound for pruning
//! - A **coordinator** that seeds the queue, runs the workers on scoped
//!   threads, collects their messages and returns the incumbent
//!
//! # Example
//!
//! ```
//! use tsp_bnb::graph::Graph;
//! use tsp_bnb::search::parallel::{ParallelConfig, run_parallel_search};
//!
//! let graph = Graph::parse("3\n0 1 9\n9 0 1\n1 9 0\n").unwrap();
//! let config = ParallelConfig::default().with_workers(2);
//!
//! let result = run_parallel_search(&graph, &config);
//! assert_eq!(result.best.map(|p| p.len()), Some(3));
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod incumbent;
pub mod queue;
pub mod worker;

pub use config::ParallelConfig;
pub use coordinator::{Improvement, ParallelResult, ParallelSearch, run_parallel_search, solve};
pub use incumbent::SharedIncumbent;
pub use queue::WorkQueue;
