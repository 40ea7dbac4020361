//! Pheromone field.

use crate::models::Route;

/// Per-edge desirability matrix τ, stored row-major like
/// [`DistanceMatrix`](crate::distance::DistanceMatrix).
///
/// Every entry starts at 1.0. Decay keeps entries non-negative; nothing
/// else bounds them, so heavily used edges can grow without limit.
///
/// # Examples
///
/// ```
/// use u_aco::aco::PheromoneField;
/// use u_aco::models::Route;
///
/// let mut tau = PheromoneField::new(3);
/// tau.reinforce(&Route::from_customers(&[1, 2]), 0.5);
/// tau.decay(0.5);
/// assert!((tau.get(0, 1) - 0.75).abs() < 1e-12);
/// assert!((tau.get(1, 0) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneField {
    /// Creates an n×n field with every entry at 1.0.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![1.0; size * size],
            size,
        }
    }

    /// Pheromone on the directed edge `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Evaporation: multiplies every entry by `1 - rho`.
    pub fn decay(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for tau in &mut self.data {
            *tau *= keep;
        }
    }

    /// Adds `amount` to every edge traversed by `route`, in travel direction only.
    pub fn reinforce(&mut self, route: &Route, amount: f64) {
        for (from, to) in route.edges() {
            self.data[from * self.size + to] += amount;
        }
    }
}
