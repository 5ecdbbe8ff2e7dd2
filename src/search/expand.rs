//! One branch-and-bound expansion step
//!
//! Every search in the crate grows paths the same way: try each node in
//! ascending order as the next step, close the cycle once every node is
//! placed, and keep incomplete children only while they stay under the
//! current bound. Where kept children go (a local stack, the shared queue)
//! and how closed cycles are recorded is up to the [`Frontier`].

use crate::graph::{Graph, Weight};
use crate::search::path::Path;
use crate::search::result::SearchStatistics;

/// Bound used while no complete cycle is known
pub const NO_BOUND: Weight = Weight::MAX;

/// Destination for the children produced by [`expand`].
pub trait Frontier {
    /// Length a child must stay strictly below to be kept.
    fn bound(&self) -> Weight;

    /// Store an incomplete child for later expansion.
    fn keep(&mut self, child: &Path);

    /// Offer a closed cycle as a new incumbent.
    fn complete(&mut self, cycle: &Path, statistics: &mut SearchStatistics);
}

/// Expand `path` by one level, leaving it unchanged on return.
pub fn expand<F: Frontier>(
    graph: &Graph,
    path: &mut Path,
    frontier: &mut F,
    statistics: &mut SearchStatistics,
) {
    statistics.paths_expanded += 1;

    for node in 0..graph.node_count() {
        if !path.can_extend(graph, node) {
            continue;
        }
        path.extend(graph, node);

        if path.is_full() {
            // Only one node was left, so this is the single child and the
            // closing edge is a dead end either way.
            if let Some(start) = path.start() {
                if path.can_extend(graph, start) {
                    path.extend(graph, start);
                    statistics.cycles_completed += 1;
                    frontier.complete(path, statistics);
                    path.retract(graph);
                }
            }
            path.retract(graph);
            break;
        }

        if path.len() < frontier.bound() {
            frontier.keep(path);
        } else {
            statistics.paths_pruned += 1;
        }
        path.retract(graph);
    }
}
