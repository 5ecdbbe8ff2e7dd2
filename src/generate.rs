//! Random graph generation for benchmarks

use crate::graph::{Graph, GraphError, Weight};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Default upper bound for generated edge weights
pub const DEFAULT_MAX_WEIGHT: Weight = 100;

/// Errors from invalid generator settings.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Number of nodes must be greater than one, got {0}")]
    TooFewNodes(usize),

    #[error("Fraction must be a percentage between 0 and 100, got {0}")]
    InvalidFraction(u32),

    #[error("Maximum edge weight must be at least 1")]
    ZeroMaxWeight,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Configuration for random graph generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of nodes
    pub node_count: usize,
    /// Percentage of off-diagonal entries that get an edge
    pub fraction: u32,
    /// Edge weights are drawn uniformly from `1..=max_weight`
    pub max_weight: Weight,
    /// Seed for the random number generator (None = random seed)
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(node_count: usize, fraction: u32) -> Self {
        Self {
            node_count,
            fraction,
            max_weight: DEFAULT_MAX_WEIGHT,
            seed: None,
        }
    }

    pub fn with_max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = max_weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Number of edges a graph generated with this config will have.
    pub fn edge_count(&self) -> usize {
        (self.node_count * self.node_count - self.node_count) * self.fraction as usize / 100
    }

    fn validate(&self) -> Result<(), GenerateError> {
        if self.node_count < 2 {
            return Err(GenerateError::TooFewNodes(self.node_count));
        }
        crate::graph::matrix_len(self.node_count)?;
        if self.fraction > 100 {
            return Err(GenerateError::InvalidFraction(self.fraction));
        }
        if self.max_weight == 0 {
            return Err(GenerateError::ZeroMaxWeight);
        }
        Ok(())
    }
}

/// Generate a random directed graph without self-loops.
pub fn generate(config: &GeneratorConfig) -> Result<Graph, GenerateError> {
    config.validate()?;

    let mut rng: ChaCha8Rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    let n = config.node_count;
    let mut weights: Vec<Weight> = vec![0; n * n];

    for _ in 0..config.edge_count() {
        // Rejection-sample a free off-diagonal entry
        let index = loop {
            let candidate = rng.random_range(0..n * n);
            let (from, to) = (candidate / n, candidate % n);
            if from != to && weights[candidate] == 0 {
                break candidate;
            }
        };
        weights[index] = rng.random_range(1..=config.max_weight);
    }

    log::debug!(
        "Generated graph with {} nodes and {} edges",
        n,
        config.edge_count()
    );
    Ok(Graph::new(n, weights)?)
}
