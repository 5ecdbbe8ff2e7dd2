//! Configuration types for the tour search

/// Search algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Single-threaded reference search
    Sequential,
    /// Fan-out queue plus one depth-first worker per thread
    #[default]
    Parallel,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Sequential => write!(f, "sequential"),
            Algorithm::Parallel => write!(f, "parallel"),
        }
    }
}

/// Node every search starts its tours from
pub const START_NODE: usize = 0;
