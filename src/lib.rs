//! # u-aco
//!
//! Ant colony optimization for the capacitated vehicle routing problem,
//! optionally with time windows and cost-weighted objectives.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Node, Fleet, Route, RouteSet, ProblemInstance)
//! - [`distance`]: Distance matrix and distance providers
//! - [`evaluation`]: Objective evaluation and feasibility checking
//! - [`aco`]: Pheromone field, construction heuristic, and the solver loop
//! - [`plan`]: Flattened route plans for storage and display
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```
//! use u_aco::aco::{solve, AcoConfig};
//! use u_aco::distance::DistanceMatrix;
//! use u_aco::models::{Fleet, Node, ProblemInstance};
//!
//! let depot = Node::depot(0.0, 0.0);
//! let customers = vec![
//!     Node::new("a", 1.0, 0.0, 4),
//!     Node::new("b", 2.0, 0.0, 4),
//!     Node::new("c", 0.0, 3.0, 4),
//! ];
//! let mut nodes = vec![depot.clone()];
//! nodes.extend(customers.iter().cloned());
//! let dm = DistanceMatrix::from_nodes(&nodes);
//!
//! let instance = ProblemInstance::new(depot, customers, Fleet::new(8, 2), dm).unwrap();
//! let outcome = solve(&instance, &AcoConfig::default().with_iterations(50)).unwrap();
//! assert_eq!(outcome.best.routes().num_served(), 3);
//! ```

pub mod aco;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod plan;

pub use error::{DistanceProviderError, SolverError};
