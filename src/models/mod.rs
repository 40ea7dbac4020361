//! Domain model types for ant colony vehicle routing.
//!
//! Provides the core abstractions: nodes with demands and time windows,
//! fleet capacity and cost parameters, routes as depot-anchored index
//! sequences, scored solutions, and the validated problem instance that
//! ties everything together.

mod fleet;
mod instance;
mod node;
mod route;
mod solution;

pub use fleet::Fleet;
pub use instance::{InstanceBuilder, MissingDistancePolicy, ProblemInstance};
pub use node::{Node, TimeWindow};
pub use route::{Route, RouteSet, DEPOT};
pub use solution::{RouteMetrics, ScoredSolution, Violation};
