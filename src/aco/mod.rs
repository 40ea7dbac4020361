//! Ant colony optimization for capacitated vehicle routing.
//!
//! - [`PheromoneField`]: Per-edge desirability with evaporation and deposit
//! - [`ConstructionHeuristic`]: One ant building a complete route set
//! - [`Solver`]: Iteration loop tracking the incumbent and updating pheromone
//! - [`AcoConfig`]: Exponents, evaporation, budget, seed, constraint and objective modes
//!
//! # Reference
//!
//! Bullnheimer, B., Hartl, R.F. & Strauss, C. (1999). "An improved Ant System
//! algorithm for the Vehicle Routing Problem", *Annals of Operations Research*
//! 89, 319-328.

mod config;
mod construction;
mod pheromone;
mod solver;

pub use config::{AcoConfig, ConstraintMode, ObjectiveMode};
pub use construction::ConstructionHeuristic;
pub use pheromone::PheromoneField;
pub use solver::{solve, SolveOutcome, Solver};

/// Floor applied to distances and route lengths before dividing.
pub const EPSILON: f64 = 1e-6;
