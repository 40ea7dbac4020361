//! Probabilistic route construction (one ant).
//!
//! # Algorithm
//!
//! Routes are built one at a time from the depot. At each step the ant
//! collects the unassigned customers it can still serve (capacity, and
//! due-time when time windows are enforced) and draws the next stop with
//! probability proportional to
//!
//! ```text
//! τ[i][j]^α · (1 / max(d[i][j], ε))^β
//! ```
//!
//! When nothing fits, the route returns to the depot and a fresh one opens.
//! Construction ends once every customer is assigned.
//!
//! # Complexity
//!
//! O(n²) per construction where n = number of customers.
//!
//! # Reference
//!
//! Dorigo, M. & Stützle, T. (2004). *Ant Colony Optimization*, MIT Press, ch. 3.

use rand::Rng;
use tracing::error;

use super::{ConstraintMode, PheromoneField, EPSILON};
use crate::error::SolverError;
use crate::models::{ProblemInstance, Route, RouteSet, DEPOT};

/// Builds complete route sets biased by a pheromone field.
///
/// Creating the heuristic checks the instance against its constraint mode,
/// so every customer is reachable from a fresh route and construction
/// always terminates.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_aco::aco::{ConstraintMode, ConstructionHeuristic, PheromoneField};
/// use u_aco::distance::DistanceMatrix;
/// use u_aco::models::{Fleet, Node, ProblemInstance};
///
/// let depot = Node::depot(0.0, 0.0);
/// let customers = vec![Node::new("a", 1.0, 0.0, 5), Node::new("b", 2.0, 0.0, 5)];
/// let mut nodes = vec![depot.clone()];
/// nodes.extend(customers.iter().cloned());
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let instance = ProblemInstance::new(depot, customers, Fleet::new(5, 2), dm).unwrap();
///
/// let ant = ConstructionHeuristic::new(&instance, ConstraintMode::Capacity, 1.0, 2.0).unwrap();
/// let tau = PheromoneField::new(instance.dimension());
/// let routes = ant.construct(&tau, &mut StdRng::seed_from_u64(7));
/// assert_eq!(routes.num_routes(), 2);
/// assert_eq!(routes.num_served(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ConstructionHeuristic<'a> {
    instance: &'a ProblemInstance,
    constraints: ConstraintMode,
    alpha: f64,
    beta: f64,
}

/// Position of the ant within its current route.
#[derive(Debug, Clone, Copy)]
struct AntState {
    node: usize,
    load: i32,
    time: f64,
}

impl AntState {
    fn at_depot() -> Self {
        Self {
            node: DEPOT,
            load: 0,
            time: 0.0,
        }
    }
}

impl<'a> ConstructionHeuristic<'a> {
    /// Creates a heuristic for `instance`.
    ///
    /// Fails with [`SolverError::InfeasibleDemand`] or
    /// [`SolverError::InfeasibleTimeWindow`] if some customer can never be
    /// served under `constraints`.
    pub fn new(
        instance: &'a ProblemInstance,
        constraints: ConstraintMode,
        alpha: f64,
        beta: f64,
    ) -> Result<Self, SolverError> {
        instance.check_feasibility(constraints)?;
        Ok(Self {
            instance,
            constraints,
            alpha,
            beta,
        })
    }

    /// Builds one route set covering every customer exactly once.
    ///
    /// `rng` is the only source of randomness; the same generator state and
    /// pheromone field always produce the same routes.
    pub fn construct<R: Rng + ?Sized>(&self, pheromone: &PheromoneField, rng: &mut R) -> RouteSet {
        let n = self.instance.dimension();
        let mut routes = RouteSet::new();
        if n <= 1 {
            return routes;
        }

        let mut assigned = vec![false; n];
        assigned[DEPOT] = true;
        let mut remaining = n - 1;

        let mut candidates: Vec<usize> = Vec::with_capacity(n);
        let mut weights: Vec<f64> = Vec::with_capacity(n);

        let mut route = Route::new();
        let mut state = AntState::at_depot();

        while remaining > 0 {
            self.feasible_candidates(&state, &assigned, &mut candidates);

            if candidates.is_empty() {
                if route.is_empty() {
                    // Unreachable once check_feasibility has passed.
                    error!(remaining, "no customer fits an empty route");
                    break;
                }
                route.close();
                routes.push(std::mem::take(&mut route));
                state = AntState::at_depot();
                continue;
            }

            self.desirability(state.node, &candidates, pheromone, &mut weights);
            let next = candidates[select_index(&weights, rng)];

            self.advance(&mut state, next);
            assigned[next] = true;
            remaining -= 1;
            route.push(next);
        }

        if !route.is_empty() {
            route.close();
            routes.push(route);
        }
        routes
    }

    /// Collects the unassigned customers the ant may visit next.
    fn feasible_candidates(&self, state: &AntState, assigned: &[bool], out: &mut Vec<usize>) {
        out.clear();
        let capacity = self.instance.capacity();
        for (j, &done) in assigned.iter().enumerate() {
            if done {
                continue;
            }
            let node = self.instance.node(j);

            if self.constraints.limits_capacity() && state.load.saturating_add(node.demand()) > capacity {
                continue;
            }

            if self.constraints.limits_time() {
                let arrival = state.time + self.instance.travel_time(state.node, j);
                if node.time_window().is_violated(arrival) {
                    continue;
                }
            }

            out.push(j);
        }
    }

    /// Unnormalized selection weights for each candidate.
    fn desirability(
        &self,
        from: usize,
        candidates: &[usize],
        pheromone: &PheromoneField,
        out: &mut Vec<f64>,
    ) {
        out.clear();
        out.extend(candidates.iter().map(|&j| {
            let tau = pheromone.get(from, j).powf(self.alpha);
            let eta = (1.0 / self.instance.distance(from, j).max(EPSILON)).powf(self.beta);
            tau * eta
        }));
    }

    /// Moves the ant to `next`, waiting for the ready-time if early.
    fn advance(&self, state: &mut AntState, next: usize) {
        let node = self.instance.node(next);
        let arrival = state.time + self.instance.travel_time(state.node, next);
        let start = arrival + node.time_window().waiting_time(arrival);
        state.time = start + node.service_time();
        state.load = state.load.saturating_add(node.demand());
        state.node = next;
    }
}

/// Roulette-wheel draw over `weights`.
///
/// Falls back to a uniform draw when the weights sum to zero or overflow,
/// e.g. when every candidate edge has lost its pheromone.
fn select_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..weights.len());
    }

    let mut pick = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        pick -= w;
        if pick < 0.0 {
            return i;
        }
    }
    // Rounding can leave a sliver past the last bucket.
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(weights.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{Fleet, Node, TimeWindow};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_instance(demands: &[i32], capacity: i32) -> ProblemInstance {
        let depot = Node::depot(0.0, 0.0);
        let customers: Vec<Node> = demands
            .iter()
            .enumerate()
            .map(|(i, &d)| Node::new(format!("c{}", i + 1), (i + 1) as f64, 0.0, d))
            .collect();
        let mut nodes = vec![depot.clone()];
        nodes.extend(customers.iter().cloned());
        let dm = DistanceMatrix::from_nodes(&nodes);
        ProblemInstance::new(depot, customers, Fleet::new(capacity, 3), dm).expect("valid")
    }

    fn assert_partition(routes: &RouteSet, num_customers: usize) {
        let mut seen = vec![0usize; num_customers + 1];
        for route in routes.routes() {
            assert!(route.is_closed());
            for &c in route.customers() {
                assert_ne!(c, DEPOT);
                seen[c] += 1;
            }
        }
        assert!(seen[1..].iter().all(|&count| count == 1));
    }

    #[test]
    fn test_covers_every_customer() {
        let inst = line_instance(&[3, 4, 2, 5, 1, 3], 7);
        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::Capacity, 1.0, 2.0)
            .expect("feasible");
        let tau = PheromoneField::new(inst.dimension());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let routes = ant.construct(&tau, &mut rng);
            assert_partition(&routes, inst.num_customers());
        }
    }

    #[test]
    fn test_respects_capacity() {
        let inst = line_instance(&[3, 4, 2, 5, 1, 3], 7);
        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::Capacity, 1.0, 2.0)
            .expect("feasible");
        let tau = PheromoneField::new(inst.dimension());
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            let routes = ant.construct(&tau, &mut rng);
            for route in routes.routes() {
                let load: i32 = route.customers().iter().map(|&c| inst.node(c).demand()).sum();
                assert!(load <= 7);
            }
        }
    }

    #[test]
    fn test_unconstrained_uses_single_route() {
        let inst = line_instance(&[5, 5, 5, 5], 5);
        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::Unconstrained, 1.0, 2.0)
            .expect("feasible");
        let tau = PheromoneField::new(inst.dimension());
        let routes = ant.construct(&tau, &mut StdRng::seed_from_u64(3));
        assert_eq!(routes.num_routes(), 1);
        assert_eq!(routes.num_served(), 4);
    }

    #[test]
    fn test_unconstrained_accepts_oversized_demand() {
        let inst = line_instance(&[9, 1], 5);
        assert!(ConstructionHeuristic::new(&inst, ConstraintMode::Capacity, 1.0, 2.0).is_err());
        assert!(
            ConstructionHeuristic::new(&inst, ConstraintMode::Unconstrained, 1.0, 2.0).is_ok()
        );
    }

    #[test]
    fn test_time_windows_force_split() {
        // From c1 (arrive 1, service 5) c2 is reached at 8 > due 2.
        let depot = Node::depot(0.0, 0.0);
        let customers = vec![
            Node::new("c1", 1.0, 0.0, 1)
                .with_time_window(TimeWindow::new(0.0, 2.0).expect("valid"))
                .with_service_time(5.0),
            Node::new("c2", -1.0, 0.0, 1)
                .with_time_window(TimeWindow::new(0.0, 2.0).expect("valid"))
                .with_service_time(5.0),
        ];
        let mut nodes = vec![depot.clone()];
        nodes.extend(customers.iter().cloned());
        let dm = DistanceMatrix::from_nodes(&nodes);
        let inst =
            ProblemInstance::new(depot, customers, Fleet::new(100, 2), dm).expect("valid");

        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::CapacityTimeWindows, 1.0, 2.0)
            .expect("feasible");
        let tau = PheromoneField::new(inst.dimension());
        let routes = ant.construct(&tau, &mut StdRng::seed_from_u64(4));
        assert_eq!(routes.num_routes(), 2);

        let relaxed = ConstructionHeuristic::new(&inst, ConstraintMode::Capacity, 1.0, 2.0)
            .expect("feasible");
        let routes = relaxed.construct(&tau, &mut StdRng::seed_from_u64(4));
        assert_eq!(routes.num_routes(), 1);
    }

    #[test]
    fn test_waiting_for_ready_time() {
        let depot = Node::depot(0.0, 0.0);
        let customers = vec![Node::new("c1", 1.0, 0.0, 1)
            .with_time_window(TimeWindow::new(10.0, 20.0).expect("valid"))
            .with_service_time(5.0)];
        let mut nodes = vec![depot.clone()];
        nodes.extend(customers.iter().cloned());
        let dm = DistanceMatrix::from_nodes(&nodes);
        let inst = ProblemInstance::new(depot, customers, Fleet::new(10, 1), dm).expect("valid");
        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::CapacityTimeWindows, 1.0, 2.0)
            .expect("feasible");

        let mut state = AntState::at_depot();
        ant.advance(&mut state, 1);
        // arrive 1, wait until 10, serve 5
        assert!((state.time - 15.0).abs() < 1e-10);
        assert_eq!(state.load, 1);
        assert_eq!(state.node, 1);
    }

    #[test]
    fn test_same_seed_same_routes() {
        let inst = line_instance(&[3, 4, 2, 5, 1, 3], 7);
        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::Capacity, 1.0, 2.0)
            .expect("feasible");
        let tau = PheromoneField::new(inst.dimension());
        let a = ant.construct(&tau, &mut StdRng::seed_from_u64(99));
        let b = ant.construct(&tau, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_coincident_nodes_do_not_divide_by_zero() {
        let depot = Node::depot(0.0, 0.0);
        let customers = vec![Node::new("a", 0.0, 0.0, 1), Node::new("b", 0.0, 0.0, 1)];
        let dm = DistanceMatrix::new(3);
        let inst = ProblemInstance::new(depot, customers, Fleet::new(5, 1), dm).expect("valid");
        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::Capacity, 1.0, 2.0)
            .expect("feasible");
        let tau = PheromoneField::new(3);
        let routes = ant.construct(&tau, &mut StdRng::seed_from_u64(5));
        assert_eq!(routes.num_served(), 2);
    }

    #[test]
    fn test_empty_instance() {
        let depot = Node::depot(0.0, 0.0);
        let inst = ProblemInstance::new(depot, vec![], Fleet::new(5, 1), DistanceMatrix::new(1))
            .expect("valid");
        let ant = ConstructionHeuristic::new(&inst, ConstraintMode::Capacity, 1.0, 2.0)
            .expect("feasible");
        let routes = ant.construct(&PheromoneField::new(1), &mut StdRng::seed_from_u64(0));
        assert!(routes.is_empty());
    }

    #[test]
    fn test_select_index_uniform_fallback() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut hits = [0usize; 3];
        for _ in 0..300 {
            hits[select_index(&[0.0, 0.0, 0.0], &mut rng)] += 1;
        }
        assert!(hits.iter().all(|&h| h > 0));

        let idx = select_index(&[f64::INFINITY, 1.0], &mut rng);
        assert!(idx < 2);
    }

    #[test]
    fn test_select_index_skips_zero_weight() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            assert_eq!(select_index(&[0.0, 2.0, 0.0], &mut rng), 1);
        }
    }
}
