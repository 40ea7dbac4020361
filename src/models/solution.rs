//! Scored solution and violation types.

use serde::{Deserialize, Serialize};

use super::RouteSet;

/// A constraint a route set breaks.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the route set.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Arrival after the node's due-time.
    TimeWindowViolated {
        /// Route index in the route set.
        route_index: usize,
        /// Node where the violation occurred.
        node: usize,
        /// Actual arrival time.
        arrival: f64,
        /// Due-time.
        due: f64,
    },
    /// Route does not start and end at the depot.
    NotAnchored {
        /// Route index in the route set.
        route_index: usize,
    },
    /// Customer visited more than once.
    DuplicateVisit {
        /// Customer index.
        node: usize,
    },
    /// Customer never visited.
    Unserved {
        /// Customer index.
        node: usize,
    },
}

/// Distance, travel time, and cost of a single route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Sum of traversed edge distances.
    pub distance: f64,
    /// Distance divided by the fleet's average speed.
    pub travel_time: f64,
    /// Weighted cost; zero when no cost coefficients are configured.
    pub cost: f64,
}

/// A route set with its aggregate objective and per-route breakdown.
///
/// `metrics[i]` always describes `routes().routes()[i]`.
///
/// # Examples
///
/// ```
/// use u_aco::models::ScoredSolution;
///
/// let empty = ScoredSolution::empty();
/// assert_eq!(empty.objective(), 0.0);
/// assert_eq!(empty.routes().num_routes(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSolution {
    routes: RouteSet,
    metrics: Vec<RouteMetrics>,
    objective: f64,
}

impl ScoredSolution {
    /// Creates a scored solution.
    pub fn new(routes: RouteSet, metrics: Vec<RouteMetrics>, objective: f64) -> Self {
        Self {
            routes,
            metrics,
            objective,
        }
    }

    /// An empty solution with objective zero.
    pub fn empty() -> Self {
        Self::new(RouteSet::new(), Vec::new(), 0.0)
    }

    /// The route set.
    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    /// Per-route metrics in route order.
    pub fn metrics(&self) -> &[RouteMetrics] {
        &self.metrics
    }

    /// Aggregate objective value (total distance or total cost).
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.metrics.iter().map(|m| m.distance).sum()
    }

    /// Total travel time across all routes.
    pub fn total_travel_time(&self) -> f64 {
        self.metrics.iter().map(|m| m.travel_time).sum()
    }

    /// Total cost across all routes.
    pub fn total_cost(&self) -> f64 {
        self.metrics.iter().map(|m| m.cost).sum()
    }

    /// Consumes the solution, returning its route set.
    pub fn into_routes(self) -> RouteSet {
        self.routes
    }
}
