//! Property-based tests for the ant colony solver.
//!
//! # Invariants tested
//!
//! - **Coverage:** every customer is served exactly once.
//! - **Anchoring:** every route starts and ends at the depot.
//! - **Capacity:** no route load exceeds capacity when capacity is enforced.
//! - **Time windows:** no arrival is later than its due-time when enforced.
//! - **Determinism:** equal seeds give equal outcomes.
//! - **Evaporation:** two decays compose multiplicatively.

use proptest::prelude::*;
use u_aco::aco::{solve, AcoConfig, ConstraintMode, ObjectiveMode, PheromoneField};
use u_aco::distance::DistanceMatrix;
use u_aco::evaluation::ObjectiveEvaluator;
use u_aco::models::{Fleet, Node, ProblemInstance, TimeWindow, DEPOT};

/// Customers as `(x, y, demand)` with demand never above `capacity`.
fn customers_strategy(max_len: usize) -> impl Strategy<Value = (i32, Vec<(f64, f64, i32)>)> {
    (5_i32..=30).prop_flat_map(move |capacity| {
        let customer = (-50.0..50.0_f64, -50.0..50.0_f64, 0..=capacity);
        (Just(capacity), prop::collection::vec(customer, 1..=max_len))
    })
}

fn build_instance(capacity: i32, raw: &[(f64, f64, i32)]) -> ProblemInstance {
    let depot = Node::depot(0.0, 0.0);
    let customers: Vec<Node> = raw
        .iter()
        .enumerate()
        .map(|(i, &(x, y, d))| Node::new(format!("c{i}"), x, y, d))
        .collect();
    let mut nodes = vec![depot.clone()];
    nodes.extend(customers.iter().cloned());
    let dm = DistanceMatrix::from_nodes(&nodes);
    ProblemInstance::new(depot, customers, Fleet::new(capacity, raw.len()), dm)
        .expect("generated instance is valid")
}

/// Like [`build_instance`], with each due-time at least the direct travel
/// time from the depot plus `slack[i]`.
fn build_tw_instance(
    capacity: i32,
    raw: &[(f64, f64, i32)],
    slack: &[(f64, f64)],
) -> ProblemInstance {
    let depot = Node::depot(0.0, 0.0);
    let customers: Vec<Node> = raw
        .iter()
        .zip(slack)
        .enumerate()
        .map(|(i, (&(x, y, d), &(extra, ready_frac)))| {
            let due = depot.distance_to(&Node::new("", x, y, 0)) + extra;
            let tw = TimeWindow::new(due * ready_frac, due).expect("ready <= due");
            Node::new(format!("c{i}"), x, y, d)
                .with_time_window(tw)
                .with_service_time(1.0)
        })
        .collect();
    let mut nodes = vec![depot.clone()];
    nodes.extend(customers.iter().cloned());
    let dm = DistanceMatrix::from_nodes(&nodes);
    ProblemInstance::new(depot, customers, Fleet::new(capacity, raw.len()), dm)
        .expect("generated instance is valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_customer_served_exactly_once(
        (capacity, raw) in customers_strategy(12),
        seed in any::<u64>(),
    ) {
        let instance = build_instance(capacity, &raw);
        let config = AcoConfig::default().with_iterations(5).with_seed(seed);
        let outcome = solve(&instance, &config).expect("solve");

        let mut seen = vec![0usize; instance.dimension()];
        for route in outcome.best.routes().routes() {
            for &c in route.customers() {
                seen[c] += 1;
            }
        }
        prop_assert!(seen.iter().skip(1).all(|&count| count == 1), "visits: {:?}", seen);
    }

    #[test]
    fn routes_anchored_at_depot(
        (capacity, raw) in customers_strategy(12),
        seed in any::<u64>(),
    ) {
        let instance = build_instance(capacity, &raw);
        let config = AcoConfig::default().with_iterations(5).with_seed(seed);
        let outcome = solve(&instance, &config).expect("solve");

        for route in outcome.best.routes().routes() {
            let stops = route.stops();
            prop_assert!(stops.len() >= 3);
            prop_assert_eq!(stops[0], DEPOT);
            prop_assert_eq!(stops[stops.len() - 1], DEPOT);
            prop_assert!(route.customers().iter().all(|&c| c != DEPOT));
        }
    }

    #[test]
    fn capacity_respected(
        (capacity, raw) in customers_strategy(15),
        seed in any::<u64>(),
    ) {
        let instance = build_instance(capacity, &raw);
        let config = AcoConfig::default().with_iterations(5).with_seed(seed);
        let outcome = solve(&instance, &config).expect("solve");

        for route in outcome.best.routes().routes() {
            let load: i32 = route.customers().iter().map(|&c| instance.node(c).demand()).sum();
            prop_assert!(load <= capacity, "load {} > capacity {}", load, capacity);
        }
    }

    #[test]
    fn time_windows_respected(
        (capacity, raw) in customers_strategy(10),
        slack in prop::collection::vec((0.0..40.0_f64, 0.0..1.0_f64), 10),
        seed in any::<u64>(),
    ) {
        let instance = build_tw_instance(capacity, &raw, &slack);
        let config = AcoConfig::default()
            .with_iterations(5)
            .with_seed(seed)
            .with_constraints(ConstraintMode::CapacityTimeWindows);
        let outcome = solve(&instance, &config).expect("solve");

        let evaluator = ObjectiveEvaluator::new(&instance, ObjectiveMode::Distance);
        let violations =
            evaluator.violations(outcome.best.routes(), ConstraintMode::CapacityTimeWindows);
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn same_seed_same_outcome(
        (capacity, raw) in customers_strategy(10),
        seed in any::<u64>(),
    ) {
        let instance = build_instance(capacity, &raw);
        let config = AcoConfig::default().with_iterations(8).with_seed(seed);
        let a = solve(&instance, &config).expect("solve");
        let b = solve(&instance, &config).expect("solve");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn history_never_worsens(
        (capacity, raw) in customers_strategy(10),
        seed in any::<u64>(),
    ) {
        let instance = build_instance(capacity, &raw);
        let config = AcoConfig::default().with_iterations(10).with_seed(seed);
        let outcome = solve(&instance, &config).expect("solve");

        prop_assert_eq!(outcome.history.len(), outcome.iterations);
        for pair in outcome.history.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
        let last = outcome.history.last().copied().unwrap_or(0.0);
        prop_assert!((last - outcome.best.objective()).abs() < 1e-9);
    }

    #[test]
    fn decay_composes(
        size in 1_usize..6,
        r1 in 0.0..1.0_f64,
        r2 in 0.0..1.0_f64,
    ) {
        let mut stepwise = PheromoneField::new(size);
        stepwise.decay(r1);
        stepwise.decay(r2);

        let mut once = PheromoneField::new(size);
        once.decay(1.0 - (1.0 - r1) * (1.0 - r2));

        for i in 0..size {
            for j in 0..size {
                prop_assert!((stepwise.get(i, j) - once.get(i, j)).abs() < 1e-12);
                prop_assert!(stepwise.get(i, j) >= 0.0);
            }
        }
    }
}
