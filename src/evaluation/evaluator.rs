//! Objective evaluation and feasibility checking.

use crate::aco::{ConstraintMode, ObjectiveMode};
use crate::models::{
    ProblemInstance, Route, RouteMetrics, RouteSet, ScoredSolution, Violation, DEPOT,
};

/// Scores route sets against a problem instance.
///
/// Per route: distance is the sum of traversed edges, travel time is the
/// distance at the fleet's average speed, and cost weights both with the
/// fleet's coefficients. The aggregate objective sums either distances or
/// costs, as chosen by the [`ObjectiveMode`].
///
/// # Examples
///
/// ```
/// use u_aco::aco::ObjectiveMode;
/// use u_aco::distance::DistanceMatrix;
/// use u_aco::evaluation::ObjectiveEvaluator;
/// use u_aco::models::{Fleet, Node, ProblemInstance, Route, RouteSet};
///
/// let depot = Node::depot(0.0, 0.0);
/// let customers = vec![Node::new("a", 3.0, 4.0, 1), Node::new("b", 6.0, 8.0, 1)];
/// let mut nodes = vec![depot.clone()];
/// nodes.extend(customers.iter().cloned());
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let instance = ProblemInstance::new(depot, customers, Fleet::new(10, 1), dm).unwrap();
///
/// let evaluator = ObjectiveEvaluator::new(&instance, ObjectiveMode::Distance);
/// let routes: RouteSet = vec![Route::from_customers(&[1, 2])].into_iter().collect();
/// let scored = evaluator.evaluate(routes);
/// // 5 + 5 + 10
/// assert!((scored.objective() - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveEvaluator<'a> {
    instance: &'a ProblemInstance,
    objective: ObjectiveMode,
}

impl<'a> ObjectiveEvaluator<'a> {
    /// Creates an evaluator for the given instance and objective.
    pub fn new(instance: &'a ProblemInstance, objective: ObjectiveMode) -> Self {
        Self {
            instance,
            objective,
        }
    }

    /// Computes distance, travel time, and cost of a single route.
    pub fn route_metrics(&self, route: &Route) -> RouteMetrics {
        let distance: f64 = route
            .edges()
            .map(|(from, to)| self.instance.distance(from, to))
            .sum();
        let fleet = self.instance.fleet();
        let travel_time = fleet.travel_time(distance);
        RouteMetrics {
            distance,
            travel_time,
            cost: fleet.cost(distance, travel_time),
        }
    }

    /// The objective contribution of one route.
    pub fn route_objective(&self, metrics: &RouteMetrics) -> f64 {
        match self.objective {
            ObjectiveMode::Distance => metrics.distance,
            ObjectiveMode::Cost => metrics.cost,
        }
    }

    /// Scores a route set, keeping the per-route breakdown.
    pub fn evaluate(&self, routes: RouteSet) -> ScoredSolution {
        let metrics: Vec<RouteMetrics> = routes
            .routes()
            .iter()
            .map(|r| self.route_metrics(r))
            .collect();
        let objective = metrics.iter().map(|m| self.route_objective(m)).sum();
        ScoredSolution::new(routes, metrics, objective)
    }

    /// Lists every constraint the route set breaks under `constraints`.
    ///
    /// Coverage (each customer exactly once) and depot anchoring are always
    /// checked; capacity and due-times only when the mode enforces them.
    pub fn violations(&self, routes: &RouteSet, constraints: ConstraintMode) -> Vec<Violation> {
        let mut violations = Vec::new();
        let n = self.instance.dimension();
        let mut visits = vec![0usize; n];

        for (route_index, route) in routes.routes().iter().enumerate() {
            if !route.is_closed() {
                violations.push(Violation::NotAnchored { route_index });
            }

            let mut load: i32 = 0;
            let mut time = 0.0;
            let mut prev = DEPOT;

            for &c in route.customers() {
                if c == DEPOT || c >= n {
                    violations.push(Violation::NotAnchored { route_index });
                    continue;
                }
                visits[c] += 1;

                let node = self.instance.node(c);
                let arrival = time + self.instance.travel_time(prev, c);
                let tw = node.time_window();
                if constraints.limits_time() && tw.is_violated(arrival) {
                    violations.push(Violation::TimeWindowViolated {
                        route_index,
                        node: c,
                        arrival,
                        due: tw.due(),
                    });
                }
                time = arrival + tw.waiting_time(arrival) + node.service_time();
                load = load.saturating_add(node.demand());
                prev = c;
            }

            let capacity = self.instance.capacity();
            if constraints.limits_capacity() && load > capacity {
                violations.push(Violation::CapacityExceeded {
                    route_index,
                    load,
                    capacity,
                });
            }
        }

        for (node, &count) in visits.iter().enumerate().skip(1) {
            match count {
                0 => violations.push(Violation::Unserved { node }),
                1 => {}
                _ => violations.push(Violation::DuplicateVisit { node }),
            }
        }

        violations
    }
}
