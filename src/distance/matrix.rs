//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries may be asymmetric. NaN entries mark pairs the distance provider
/// could not resolve; [`ProblemInstance`](crate::models::ProblemInstance)
/// decides what to do with them.
///
/// # Examples
///
/// ```
/// use u_aco::models::Node;
/// use u_aco::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new("a", 3.0, 4.0, 10),
///     Node::new("b", 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from node coordinates.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Multiplies every entry by `factor` (e.g. meters to kilometers).
    pub fn scale(&mut self, factor: f64) {
        for d in &mut self.data {
            *d *= factor;
        }
    }

    /// Number of NaN entries.
    pub fn count_missing(&self) -> usize {
        self.data.iter().filter(|d| d.is_nan()).count()
    }

    /// Replaces NaN entries with zero, returning how many were replaced.
    pub fn normalize_missing(&mut self) -> usize {
        let mut replaced = 0;
        for d in &mut self.data {
            if d.is_nan() {
                *d = 0.0;
                replaced += 1;
            }
        }
        replaced
    }

    /// First entry that is negative or infinite, as `(from, to, value)`.
    pub fn find_invalid(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|&d| d < 0.0 || d.is_infinite())
            .map(|idx| (idx / self.size, idx % self.size, self.data[idx]))
    }
}
