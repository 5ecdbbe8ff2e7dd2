//! Weighted directed graph stored as a dense adjacency matrix
//!
//! A weight of zero means "no edge". The matrix is square, row-major and
//! immutable once built; the search shares it between worker threads by
//! plain reference.

pub mod io;

pub use io::GraphError;

/// Edge weight and accumulated path length
pub type Weight = u64;

/// Dense adjacency matrix with `node_count` rows and columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    weights: Vec<Weight>,
}

impl Graph {
    /// Build a graph from a row-major weight vector.
    ///
    /// Fails if there are fewer than two nodes or if `weights` does not hold
    /// exactly `node_count * node_count` entries.
    pub fn new(node_count: usize, weights: Vec<Weight>) -> Result<Self, GraphError> {
        if node_count < 2 {
            return Err(GraphError::TooFewNodes(node_count));
        }
        let expected = matrix_len(node_count)?;
        if weights.len() != expected {
            return Err(GraphError::MissingWeights {
                expected,
                found: weights.len(),
            });
        }
        Ok(Self {
            node_count,
            weights,
        })
    }

    /// Build a graph from one vector per matrix row.
    pub fn from_rows(rows: Vec<Vec<Weight>>) -> Result<Self, GraphError> {
        let node_count = rows.len();
        let mut weights = Vec::with_capacity(node_count * node_count);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != node_count {
                return Err(GraphError::RaggedRow {
                    row: row_index,
                    expected: node_count,
                    found: row.len(),
                });
            }
            weights.extend(row);
        }
        Self::new(node_count, weights)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Weight of the edge `from -> to`, zero if there is no edge.
    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> Weight {
        debug_assert!(from < self.node_count && to < self.node_count);
        self.weights[from * self.node_count + to]
    }

    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.weight(from, to) != 0
    }

    /// Row `from` of the matrix: the outgoing weights of one node.
    pub fn row(&self, from: usize) -> &[Weight] {
        let start = from * self.node_count;
        &self.weights[start..start + self.node_count]
    }

    /// Number of non-zero off-diagonal entries.
    pub fn edge_count(&self) -> usize {
        (0..self.node_count)
            .flat_map(|from| (0..self.node_count).map(move |to| (from, to)))
            .filter(|&(from, to)| from != to && self.has_edge(from, to))
            .count()
    }
}

/// Number of matrix entries for `node_count` nodes, if addressable.
pub(crate) fn matrix_len(node_count: usize) -> Result<usize, GraphError> {
    node_count
        .checked_mul(node_count)
        .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<Weight>())
        .ok_or(GraphError::TooManyNodes(node_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_single_node() {
        assert!(matches!(
            Graph::new(1, vec![0]),
            Err(GraphError::TooFewNodes(1))
        ));
    }

    #[test]
    fn test_new_rejects_wrong_weight_count() {
        let err = Graph::new(3, vec![0; 8]).unwrap_err();
        assert!(matches!(
            err,
            GraphError::MissingWeights {
                expected: 9,
                found: 8
            }
        ));
    }

    #[test]
    fn test_new_rejects_overflowing_node_count() {
        assert!(matches!(
            Graph::new(usize::MAX, Vec::new()),
            Err(GraphError::TooManyNodes(usize::MAX))
        ));
        assert!(matches!(
            Graph::new(1 << 33, Vec::new()),
            Err(GraphError::TooManyNodes(_))
        ));
    }

    #[test]
    fn test_from_rows_weight_lookup() {
        let graph = Graph::from_rows(vec![vec![0, 3, 0], vec![1, 0, 2], vec![4, 0, 0]]).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.weight(0, 1), 3);
        assert_eq!(graph.weight(1, 2), 2);
        assert_eq!(graph.weight(2, 0), 4);
        assert!(!graph.has_edge(2, 1));
        assert_eq!(graph.row(1), &[1, 0, 2]);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_from_rows_rejects_ragged_matrix() {
        let err = Graph::from_rows(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, GraphError::RaggedRow { row: 1, .. }));
    }
}
