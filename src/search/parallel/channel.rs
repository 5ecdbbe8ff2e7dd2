//! Worker to coordinator messaging.

use crate::graph::Weight;
use crate::search::result::SearchStatistics;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Worker committed a shorter cycle to the incumbent.
    Improvement { worker_id: usize, length: Weight },
    /// Worker found no more work and is exiting.
    Finished {
        worker_id: usize,
        statistics: SearchStatistics,
    },
}

/// Create the shared worker-to-coordinator channel.
///
/// Unbounded so that sending never blocks a worker, which matters because
/// improvements are reported while the incumbent lock is held.
pub fn create_channel() -> (Sender<WorkerMessage>, Receiver<WorkerMessage>) {
    unbounded()
}
