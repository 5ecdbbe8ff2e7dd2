//! Reading and writing the flat graph text format
//!
//! The format is the node count followed by the N×N weight matrix, all as
//! non-negative integers separated by any whitespace. Written graphs put the
//! count on its own line and one tab-separated row per line.

use super::{Graph, Weight};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Failed to read graph file: {0}")]
    Io(#[from] io::Error),

    #[error("Graph input is empty, expected a node count")]
    MissingNodeCount,

    #[error("Invalid number '{token}' at token {position}")]
    InvalidNumber { token: String, position: usize },

    #[error("Graph must have at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    #[error("Graph with {0} nodes is too large to store as a matrix")]
    TooManyNodes(usize),

    #[error("Expected {expected} matrix weights, found {found}")]
    MissingWeights { expected: usize, found: usize },

    #[error("Unexpected trailing data after the matrix: '{0}'")]
    TrailingData(String),

    #[error("Row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Graph {
    /// Parse a graph from its text representation.
    pub fn parse(input: &str) -> Result<Self, GraphError> {
        let mut tokens = input.split_whitespace().enumerate();

        let node_count = match tokens.next() {
            Some((position, token)) => parse_number(token, position)? as usize,
            None => return Err(GraphError::MissingNodeCount),
        };
        if node_count < 2 {
            return Err(GraphError::TooFewNodes(node_count));
        }

        let expected = super::matrix_len(node_count)?;
        // The input bounds the real token count; the header may lie.
        let mut weights = Vec::with_capacity(expected.min(input.len()));
        for (position, token) in tokens.by_ref().take(expected) {
            weights.push(parse_number(token, position)?);
        }
        if weights.len() != expected {
            return Err(GraphError::MissingWeights {
                expected,
                found: weights.len(),
            });
        }
        if let Some((_, token)) = tokens.next() {
            return Err(GraphError::TrailingData(token.to_string()));
        }

        Graph::new(node_count, weights)
    }

    /// Load a graph from a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let graph = Self::parse(&contents)?;
        log::debug!(
            "Loaded graph with {} nodes and {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        Ok(graph)
    }

    /// Write the graph in the text format understood by [`Graph::parse`].
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.node_count)?;
        for from in 0..self.node_count {
            let row = self
                .row(from)
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn parse_number(token: &str, position: usize) -> Result<Weight, GraphError> {
    token.parse::<Weight>().map_err(|_| GraphError::InvalidNumber {
        token: token.to_string(),
        position,
    })
}
