//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Which constraints the construction heuristic enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintMode {
    /// No capacity or time limits; all customers may share one route.
    Unconstrained,
    /// Vehicle capacity only.
    #[default]
    Capacity,
    /// Vehicle capacity and customer due-times.
    CapacityTimeWindows,
}

impl ConstraintMode {
    /// Returns `true` if loads are checked against capacity.
    pub fn limits_capacity(self) -> bool {
        !matches!(self, Self::Unconstrained)
    }

    /// Returns `true` if arrivals are checked against due-times.
    pub fn limits_time(self) -> bool {
        matches!(self, Self::CapacityTimeWindows)
    }
}

/// What the solver minimizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveMode {
    /// Sum of route distances.
    #[default]
    Distance,
    /// Sum of route costs from the fleet's cost coefficients.
    Cost,
}

/// Parameters of one ant colony run.
///
/// Defaults: `alpha = 1.0`, `beta = 2.0`, `evaporation = 0.5`,
/// `iterations = 100`, `seed = 42`, capacity constraints, distance
/// objective, no time limit.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{AcoConfig, ConstraintMode, ObjectiveMode};
///
/// let config = AcoConfig::default()
///     .with_iterations(250)
///     .with_evaporation(0.1)
///     .with_constraints(ConstraintMode::CapacityTimeWindows)
///     .with_objective(ObjectiveMode::Cost);
/// assert!(config.validate().is_ok());
/// assert!(AcoConfig::default().with_evaporation(1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Pheromone exponent (α).
    pub alpha: f64,
    /// Inverse-distance exponent (β).
    pub beta: f64,
    /// Evaporation rate (ρ), strictly between 0 and 1.
    pub evaporation: f64,
    /// Number of construct/evaluate/update cycles.
    pub iterations: usize,
    /// Random seed for the solve-owned generator.
    pub seed: u64,
    /// Constraint set enforced during construction.
    pub constraints: ConstraintMode,
    /// Objective being minimized.
    pub objective: ObjectiveMode,
    /// Wall-clock budget checked between iterations.
    pub time_limit: Option<Duration>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            evaporation: 0.5,
            iterations: 100,
            seed: 42,
            constraints: ConstraintMode::default(),
            objective: ObjectiveMode::default(),
            time_limit: None,
        }
    }
}

impl AcoConfig {
    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the inverse-distance exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation(mut self, rho: f64) -> Self {
        self.evaporation = rho;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the constraint mode.
    pub fn with_constraints(mut self, constraints: ConstraintMode) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the objective mode.
    pub fn with_objective(mut self, objective: ObjectiveMode) -> Self {
        self.objective = objective;
        self
    }

    /// Sets a wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(SolverError::InvalidParameter {
                name: "alpha",
                value: self.alpha,
                reason: "must be finite and non-negative",
            });
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(SolverError::InvalidParameter {
                name: "beta",
                value: self.beta,
                reason: "must be finite and non-negative",
            });
        }
        if !(self.evaporation > 0.0 && self.evaporation < 1.0) {
            return Err(SolverError::InvalidParameter {
                name: "evaporation",
                value: self.evaporation,
                reason: "must lie strictly between 0 and 1",
            });
        }
        if self.iterations == 0 {
            return Err(SolverError::InvalidParameter {
                name: "iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
