//! Flattened route plans for storage and display.
//!
//! A [`RoutePlan`] turns node indices back into the identifiers,
//! coordinates, and demands callers supplied, one numbered route at a time.
//! The depot appears as the first and last stop of every route. Storage
//! schemas are left to the caller; the plan is plain serde data.

use serde::Serialize;

use crate::models::{ProblemInstance, ScoredSolution};

/// Planar position of a stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StopCoordinates {
    pub x: f64,
    pub y: f64,
}

/// One visit in a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedStop {
    /// Position within the route, starting at 0 for the depot.
    pub route_order: usize,
    /// Node index in the problem instance (0 = depot).
    pub node_index: usize,
    pub name: String,
    pub coordinates: StopCoordinates,
    pub demand: i32,
}

/// A numbered route with its stops and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRoute {
    /// 1-based route number.
    pub route_number: usize,
    pub stops: Vec<PlannedStop>,
    pub distance: f64,
    pub cost: f64,
    pub load: i32,
}

/// All routes of a solution in storage-ready form.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{solve, AcoConfig};
/// use u_aco::distance::DistanceMatrix;
/// use u_aco::models::{Fleet, Node, ProblemInstance};
/// use u_aco::plan::RoutePlan;
///
/// let depot = Node::depot(0.0, 0.0);
/// let customers = vec![Node::new("Bakery", 1.0, 0.0, 3)];
/// let dm = DistanceMatrix::from_nodes(&[depot.clone(), customers[0].clone()]);
/// let instance = ProblemInstance::new(depot, customers, Fleet::new(5, 1), dm).unwrap();
/// let outcome = solve(&instance, &AcoConfig::default().with_iterations(5)).unwrap();
///
/// let plan = RoutePlan::from_solution(&instance, &outcome.best);
/// let names: Vec<&str> = plan.routes[0].stops.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["Depot", "Bakery", "Depot"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub routes: Vec<PlannedRoute>,
    pub total_distance: f64,
    pub objective: f64,
}

impl RoutePlan {
    /// Builds the plan for `solution`, which must come from `instance`.
    pub fn from_solution(instance: &ProblemInstance, solution: &ScoredSolution) -> Self {
        let routes = solution
            .routes()
            .routes()
            .iter()
            .zip(solution.metrics())
            .enumerate()
            .map(|(i, (route, metrics))| {
                let stops: Vec<PlannedStop> = route
                    .stops()
                    .iter()
                    .enumerate()
                    .map(|(order, &index)| {
                        let node = instance.node(index);
                        PlannedStop {
                            route_order: order,
                            node_index: index,
                            name: node.name().to_string(),
                            coordinates: StopCoordinates {
                                x: node.x(),
                                y: node.y(),
                            },
                            demand: node.demand(),
                        }
                    })
                    .collect();
                PlannedRoute {
                    route_number: i + 1,
                    load: stops.iter().fold(0_i32, |acc, s| acc.saturating_add(s.demand)),
                    stops,
                    distance: metrics.distance,
                    cost: metrics.cost,
                }
            })
            .collect();

        Self {
            routes,
            total_distance: solution.total_distance(),
            objective: solution.objective(),
        }
    }

    /// Node index lists, one per route, depot included.
    pub fn index_lists(&self) -> Vec<Vec<usize>> {
        self.routes
            .iter()
            .map(|r| r.stops.iter().map(|s| s.node_index).collect())
            .collect()
    }
}
