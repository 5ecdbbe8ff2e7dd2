//! Best complete cycle shared by all workers.
//!
//! The committed path lives behind its own lock. Its length is mirrored in
//! an atomic bound that workers read without locking, both for pruning and
//! as the cheap pre-check before contending for the lock. The bound is only
//! written while the lock is held, so it never runs ahead of the path.

use crate::graph::Weight;
use crate::search::expand::NO_BOUND;
use crate::search::parallel::channel::WorkerMessage;
use crate::search::path::Path;
use crate::search::result::SearchStatistics;
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Shortest cycle found so far. A zero length means no winner yet.
#[derive(Debug)]
pub struct SharedIncumbent {
    best: Mutex<Path>,
    bound: AtomicU64,
}

impl SharedIncumbent {
    pub fn new(node_count: usize) -> Self {
        Self {
            best: Mutex::new(Path::new(node_count)),
            bound: AtomicU64::new(NO_BOUND),
        }
    }

    /// Current pruning bound, [`NO_BOUND`] while no cycle is known.
    #[inline]
    pub fn bound(&self) -> Weight {
        self.bound.load(Ordering::Acquire)
    }

    /// Commit `candidate` if it is strictly shorter than the incumbent.
    pub fn try_update(&self, candidate: &Path) -> bool {
        self.try_update_with(candidate, |_| {})
    }

    /// Like [`SharedIncumbent::try_update`], running `on_commit` inside the
    /// critical section after a successful commit.
    ///
    /// Observers therefore see commits in the order they happened.
    pub fn try_update_with(&self, candidate: &Path, on_commit: impl FnOnce(&Path)) -> bool {
        debug_assert!(candidate.is_complete());
        if candidate.len() >= self.bound() {
            return false;
        }

        let mut best = self.lock();
        // Another worker may have committed while we waited.
        if best.len() != 0 && candidate.len() >= best.len() {
            return false;
        }
        best.copy_from(candidate);
        self.bound.store(candidate.len(), Ordering::Release);
        on_commit(&best);
        true
    }

    /// Snapshot of the best cycle, `None` if no cycle has been found.
    pub fn best(&self) -> Option<Path> {
        let best = self.lock();
        (best.len() != 0).then(|| best.clone())
    }

    pub fn into_best(self) -> Option<Path> {
        let best = self
            .best
            .into_inner()
            .expect("incumbent lock poisoned by a panicked worker");
        (best.len() != 0).then_some(best)
    }

    /// Per-worker view that reports commits over `events`.
    pub fn handle(
        &self,
        worker_id: usize,
        events: Option<Sender<WorkerMessage>>,
    ) -> IncumbentHandle<'_> {
        IncumbentHandle {
            shared: self,
            worker_id,
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Path> {
        self.best
            .lock()
            .expect("incumbent lock poisoned by a panicked worker")
    }
}

/// A worker's access to the shared incumbent.
#[derive(Debug)]
pub struct IncumbentHandle<'a> {
    shared: &'a SharedIncumbent,
    worker_id: usize,
    events: Option<Sender<WorkerMessage>>,
}

impl IncumbentHandle<'_> {
    #[inline]
    pub fn bound(&self) -> Weight {
        self.shared.bound()
    }

    /// Offer a closed cycle, counting and reporting it if it wins.
    pub fn offer(&self, cycle: &Path, statistics: &mut SearchStatistics) -> bool {
        let worker_id = self.worker_id;
        let committed = self.shared.try_update_with(cycle, |best| {
            log::trace!("Worker {} improved the incumbent to {}", worker_id, best);
            if let Some(events) = &self.events {
                // The coordinator outlives every worker; a failed send only
                // means it stopped listening.
                let _ = events.send(WorkerMessage::Improvement {
                    worker_id,
                    length: best.len(),
                });
            }
        });
        if committed {
            statistics.improvements_found += 1;
        }
        committed
    }
}
