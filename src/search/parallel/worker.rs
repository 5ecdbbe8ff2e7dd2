//! Search worker: claims subtrees from the queue and searches them locally.

use crate::graph::{Graph, Weight};
use crate::search::config::Algorithm;
use crate::search::expand::{Frontier, expand};
use crate::search::parallel::channel::WorkerMessage;
use crate::search::parallel::coordinator::SolveContext;
use crate::search::parallel::incumbent::IncumbentHandle;
use crate::search::parallel::queue::WorkQueue;
use crate::search::path::Path;
use crate::search::result::SearchStatistics;
use crate::search::stack::WorkStack;
use crossbeam_channel::Sender;
use std::sync::{Mutex, MutexGuard};

/// One search thread's private state, allocated before the thread starts.
pub struct Worker<'a> {
    id: usize,
    graph: &'a Graph,
    queue: &'a Mutex<WorkQueue>,
    incumbent: IncumbentHandle<'a>,
    events: Sender<WorkerMessage>,
    stack: WorkStack,
    path: Path,
    statistics: SearchStatistics,
}

impl<'a> Worker<'a> {
    pub fn new(id: usize, context: &'a SolveContext<'a>, events: Sender<WorkerMessage>) -> Self {
        let node_count = context.graph.node_count();
        Self {
            id,
            graph: context.graph,
            queue: &context.queue,
            incumbent: context.incumbent.handle(id, Some(events.clone())),
            events,
            stack: WorkStack::new(node_count),
            path: Path::new(node_count),
            statistics: SearchStatistics::new(Algorithm::Parallel),
        }
    }

    /// Work until the queue is exhausted, then report statistics.
    pub fn run(mut self) -> SearchStatistics {
        log::debug!("Worker {} started", self.id);

        while self.claim_subtree() {
            self.search_subtree();
        }

        log::debug!(
            "Worker {} finished: {} paths expanded, {} subtrees claimed",
            self.id,
            self.statistics.paths_expanded,
            self.statistics.subtrees_claimed
        );
        let _ = self.events.send(WorkerMessage::Finished {
            worker_id: self.id,
            statistics: self.statistics.clone(),
        });
        self.statistics
    }

    /// Run the fan-out protocol under the queue lock.
    fn claim_subtree(&mut self) -> bool {
        let mut queue = lock_queue(self.queue);
        queue.try_hand_off(
            self.graph,
            &self.incumbent,
            &mut self.path,
            &mut self.statistics,
        )
    }

    /// Depth-first branch-and-bound below the claimed path, without locks
    /// except for incumbent commits.
    fn search_subtree(&mut self) {
        self.stack.push(&self.path);

        while self.stack.pop_into(&mut self.path) {
            let mut frontier = StackFrontier {
                stack: &mut self.stack,
                incumbent: &self.incumbent,
            };
            expand(
                self.graph,
                &mut self.path,
                &mut frontier,
                &mut self.statistics,
            );
            self.statistics.max_stack_depth = self.statistics.max_stack_depth.max(self.stack.len());
        }
    }
}

fn lock_queue(queue: &Mutex<WorkQueue>) -> MutexGuard<'_, WorkQueue> {
    queue
        .lock()
        .expect("work queue lock poisoned by a panicked worker")
}

/// Pushes kept children onto the worker's private stack.
struct StackFrontier<'s, 'a> {
    stack: &'s mut WorkStack,
    incumbent: &'s IncumbentHandle<'a>,
}

impl Frontier for StackFrontier<'_, '_> {
    fn bound(&self) -> Weight {
        self.incumbent.bound()
    }

    fn keep(&mut self, child: &Path) {
        self.stack.push(child);
    }

    fn complete(&mut self, cycle: &Path, statistics: &mut SearchStatistics) {
        self.incumbent.offer(cycle, statistics);
    }
}
