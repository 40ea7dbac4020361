//! Ant colony solver loop.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::{AcoConfig, ConstructionHeuristic, ObjectiveMode, PheromoneField, EPSILON};
use crate::error::SolverError;
use crate::evaluation::ObjectiveEvaluator;
use crate::models::{ProblemInstance, ScoredSolution};

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveOutcome {
    /// Best solution found.
    pub best: ScoredSolution,
    /// Iterations actually executed.
    pub iterations: usize,
    /// Iteration (0-based) at which `best` was first found.
    pub best_iteration: usize,
    /// `true` if the time limit stopped the run early.
    pub timed_out: bool,
    /// Best-so-far objective after each iteration.
    pub history: Vec<f64>,
}

impl SolveOutcome {
    fn empty() -> Self {
        Self {
            best: ScoredSolution::empty(),
            iterations: 0,
            best_iteration: 0,
            timed_out: false,
            history: Vec::new(),
        }
    }
}

/// Single-colony ant system for one problem instance.
///
/// Owns its pheromone field and random generator, so independent solvers
/// never share mutable state. Every [`run`](Self::run) starts from a fresh
/// field and a generator reseeded from the config, which makes repeated runs
/// reproducible.
///
/// Each iteration one ant builds a route set, the incumbent is replaced on
/// strict improvement only, the field evaporates, and then every route of
/// that iteration (not just the incumbent) deposits `1 / (distance + ε)` on
/// its edges.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{AcoConfig, Solver};
/// use u_aco::distance::DistanceMatrix;
/// use u_aco::models::{Fleet, Node, ProblemInstance};
///
/// let depot = Node::depot(0.0, 0.0);
/// let customers = vec![
///     Node::new("a", 1.0, 0.0, 4),
///     Node::new("b", 2.0, 0.0, 4),
///     Node::new("c", 3.0, 0.0, 4),
/// ];
/// let mut nodes = vec![depot.clone()];
/// nodes.extend(customers.iter().cloned());
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let instance = ProblemInstance::new(depot, customers, Fleet::new(8, 2), dm).unwrap();
///
/// let mut solver = Solver::new(&instance, AcoConfig::default().with_iterations(30)).unwrap();
/// let outcome = solver.run();
/// assert_eq!(outcome.iterations, 30);
/// assert_eq!(outcome.best.routes().num_served(), 3);
/// ```
#[derive(Debug)]
pub struct Solver<'a> {
    instance: &'a ProblemInstance,
    config: AcoConfig,
    ant: ConstructionHeuristic<'a>,
    evaluator: ObjectiveEvaluator<'a>,
    pheromone: PheromoneField,
    rng: StdRng,
}

impl<'a> Solver<'a> {
    /// Validates the config and the instance's feasibility, then prepares a run.
    ///
    /// A cost objective needs at least one cost coefficient on the fleet;
    /// otherwise every route set would score zero.
    pub fn new(instance: &'a ProblemInstance, config: AcoConfig) -> Result<Self, SolverError> {
        config.validate()?;
        if config.objective == ObjectiveMode::Cost && !instance.fleet().has_cost_coefficients() {
            return Err(SolverError::InvalidParameter {
                name: "objective",
                value: 0.0,
                reason: "cost objective requires a fleet cost coefficient",
            });
        }
        let ant =
            ConstructionHeuristic::new(instance, config.constraints, config.alpha, config.beta)?;
        let evaluator = ObjectiveEvaluator::new(instance, config.objective);
        Ok(Self {
            instance,
            ant,
            evaluator,
            pheromone: PheromoneField::new(instance.dimension()),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    /// The solver's configuration.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Pheromone field as left by the last run.
    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    /// Runs the colony until the iteration budget or time limit is exhausted.
    pub fn run(&mut self) -> SolveOutcome {
        self.pheromone = PheromoneField::new(self.instance.dimension());
        self.rng = StdRng::seed_from_u64(self.config.seed);

        if self.instance.num_customers() == 0 {
            debug!("no customers to route");
            return SolveOutcome::empty();
        }

        debug!(
            customers = self.instance.num_customers(),
            iterations = self.config.iterations,
            alpha = self.config.alpha,
            beta = self.config.beta,
            evaporation = self.config.evaporation,
            seed = self.config.seed,
            "starting ant colony"
        );

        let started = Instant::now();
        let mut best: Option<ScoredSolution> = None;
        let mut best_iteration = 0;
        let mut history = Vec::with_capacity(self.config.iterations);
        let mut timed_out = false;

        for iteration in 0..self.config.iterations {
            if iteration > 0 && self.deadline_passed(started) {
                timed_out = true;
                break;
            }

            let routes = self.ant.construct(&self.pheromone, &mut self.rng);
            let scored = self.evaluator.evaluate(routes);
            trace!(
                iteration,
                objective = scored.objective(),
                routes = scored.routes().num_routes(),
                "ant finished"
            );

            let improved = best
                .as_ref()
                .is_none_or(|b| scored.objective() < b.objective());
            if improved {
                debug!(
                    iteration,
                    objective = scored.objective(),
                    "new best solution"
                );
                debug_assert!(self
                    .evaluator
                    .violations(scored.routes(), self.config.constraints)
                    .is_empty());
                best_iteration = iteration;
            }

            self.pheromone.decay(self.config.evaporation);
            for (route, metrics) in scored.routes().routes().iter().zip(scored.metrics()) {
                self.pheromone
                    .reinforce(route, 1.0 / (metrics.distance + EPSILON));
            }

            if improved {
                best = Some(scored);
            }
            history.push(best.as_ref().map_or(f64::INFINITY, ScoredSolution::objective));
        }

        let best = best.unwrap_or_else(ScoredSolution::empty);
        let iterations = history.len();

        if best.routes().num_routes() > self.instance.fleet().size() {
            warn!(
                routes = best.routes().num_routes(),
                fleet_size = self.instance.fleet().size(),
                "best solution uses more routes than available vehicles"
            );
        }
        info!(
            objective = best.objective(),
            routes = best.routes().num_routes(),
            iterations,
            best_iteration,
            timed_out,
            "ant colony finished"
        );

        SolveOutcome {
            best,
            iterations,
            best_iteration,
            timed_out,
            history,
        }
    }

    fn deadline_passed(&self, started: Instant) -> bool {
        self.config
            .time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
    }
}

/// Validates, runs one colony, and returns the outcome.
pub fn solve(instance: &ProblemInstance, config: &AcoConfig) -> Result<SolveOutcome, SolverError> {
    Ok(Solver::new(instance, config.clone())?.run())
}
