//! Parallel search coordinator that manages worker threads.

use crate::graph::{Graph, Weight};
use crate::search::config::{Algorithm, START_NODE};
use crate::search::parallel::channel::{WorkerMessage, create_channel};
use crate::search::parallel::config::ParallelConfig;
use crate::search::parallel::incumbent::SharedIncumbent;
use crate::search::parallel::queue::WorkQueue;
use crate::search::parallel::worker::Worker;
use crate::search::path::Path;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::TourSearch;
use crossbeam_channel::Receiver;
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

/// Shared state for one solve: the read-only graph plus the two
/// independently locked pieces of mutable state.
///
/// A worker may take the incumbent lock while holding the queue lock, but
/// never takes the queue lock while holding the incumbent lock.
#[derive(Debug)]
pub struct SolveContext<'a> {
    pub graph: &'a Graph,
    pub queue: Mutex<WorkQueue>,
    pub incumbent: SharedIncumbent,
}

impl<'a> SolveContext<'a> {
    /// Fresh context with the queue seeded by the single-node root path.
    pub fn new(graph: &'a Graph) -> Self {
        let node_count = graph.node_count();
        let mut queue = WorkQueue::new(node_count);
        queue.enqueue(&Path::starting_at(node_count, START_NODE));
        Self {
            graph,
            queue: Mutex::new(queue),
            incumbent: SharedIncumbent::new(node_count),
        }
    }
}

/// A commit to the shared incumbent, in commit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    pub worker_id: usize,
    pub length: Weight,
}

/// Result from parallel search execution.
#[derive(Debug)]
pub struct ParallelResult {
    /// The shortest cycle, if the graph has one.
    pub best: Option<Path>,
    /// Statistics aggregated from all workers.
    pub total_statistics: SearchStatistics,
    /// Per-worker statistics, ordered by worker id.
    pub worker_statistics: Vec<(usize, SearchStatistics)>,
    /// Every incumbent commit in the order it happened.
    pub improvements: Vec<Improvement>,
}

/// Find the shortest Hamiltonian cycle using all available hardware threads.
pub fn solve(graph: &Graph) -> Option<Path> {
    run_parallel_search(graph, &ParallelConfig::default()).best
}

/// Run parallel search with the given configuration.
pub fn run_parallel_search(graph: &Graph, config: &ParallelConfig) -> ParallelResult {
    let start_time = Instant::now();
    let num_workers = config.num_workers.max(1);
    log::debug!(
        "Starting parallel search on {} nodes with {} workers",
        graph.node_count(),
        num_workers
    );

    let context = SolveContext::new(graph);
    let (events, from_workers) = create_channel();

    // Preallocate every worker's buffers before any thread starts.
    let workers: Vec<Worker<'_>> = (0..num_workers)
        .map(|worker_id| Worker::new(worker_id, &context, events.clone()))
        .collect();
    drop(events);

    let (improvements, mut worker_statistics) = thread::scope(|s| {
        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| s.spawn(move || worker.run()))
            .collect();

        let collected = collect_messages(&from_workers);

        for handle in handles {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
        collected
    });
    worker_statistics.sort_by_key(|(worker_id, _)| *worker_id);

    let mut total_statistics = SearchStatistics::new(Algorithm::Parallel);
    for (_, statistics) in &worker_statistics {
        total_statistics.merge(statistics);
    }
    total_statistics.elapsed_time = start_time.elapsed();

    let best = context.incumbent.into_best();
    log::debug!(
        "Parallel search finished in {:.2?} after {} improvements: {:?}",
        total_statistics.elapsed_time,
        improvements.len(),
        best.as_ref().map(Path::len)
    );

    ParallelResult {
        best,
        total_statistics,
        worker_statistics,
        improvements,
    }
}

/// Drain worker messages until every worker has dropped its sender.
fn collect_messages(
    from_workers: &Receiver<WorkerMessage>,
) -> (Vec<Improvement>, Vec<(usize, SearchStatistics)>) {
    let mut improvements = Vec::new();
    let mut worker_statistics = Vec::new();

    for message in from_workers.iter() {
        match message {
            WorkerMessage::Improvement { worker_id, length } => {
                improvements.push(Improvement { worker_id, length });
            }
            WorkerMessage::Finished {
                worker_id,
                statistics,
            } => {
                worker_statistics.push((worker_id, statistics));
            }
        }
    }

    (improvements, worker_statistics)
}

/// [`TourSearch`] front end for the parallel search.
pub struct ParallelSearch {
    config: ParallelConfig,
    statistics: SearchStatistics,
}

impl ParallelSearch {
    pub fn new(config: ParallelConfig) -> Self {
        Self {
            config,
            statistics: SearchStatistics::new(Algorithm::Parallel),
        }
    }
}

impl Default for ParallelSearch {
    fn default() -> Self {
        Self::new(ParallelConfig::default())
    }
}

impl TourSearch for ParallelSearch {
    fn search(&mut self, graph: &Graph) -> SearchResult {
        self.reset();
        let result = run_parallel_search(graph, &self.config);
        self.statistics = result.total_statistics.clone();
        SearchResult::new(result.best, result.total_statistics)
    }

    fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }

    fn reset(&mut self) {
        self.statistics = SearchStatistics::new(Algorithm::Parallel);
    }
}
