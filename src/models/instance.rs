//! Validated problem instance.

use tracing::warn;

use super::{Fleet, Node, DEPOT};
use crate::aco::ConstraintMode;
use crate::distance::{Coordinate, DistanceMatrix, DistanceProvider};
use crate::error::SolverError;

/// What to do with NaN entries in the distance matrix.
///
/// Providers report unreachable pairs as missing. `Zero` treats such a pair
/// as a free edge, which can produce unrealistic moves; `Reject` refuses the
/// instance instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDistancePolicy {
    /// Replace NaN with 0.
    #[default]
    Zero,
    /// Fail with [`SolverError::InvalidInstance`].
    Reject,
}

/// An immutable snapshot of one routing problem.
///
/// Index 0 is the depot; indices `1..=num_customers()` are customers in the
/// order they were supplied.
///
/// # Examples
///
/// ```
/// use u_aco::distance::DistanceMatrix;
/// use u_aco::models::{Fleet, Node, ProblemInstance};
///
/// let depot = Node::depot(0.0, 0.0);
/// let customers = vec![Node::new("a", 3.0, 4.0, 5)];
/// let dm = DistanceMatrix::from_nodes(&[depot.clone(), customers[0].clone()]);
///
/// let instance = ProblemInstance::new(depot, customers, Fleet::new(10, 1), dm).unwrap();
/// assert_eq!(instance.num_customers(), 1);
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    nodes: Vec<Node>,
    fleet: Fleet,
    distances: DistanceMatrix,
}

impl ProblemInstance {
    /// Builds and validates an instance with the default missing-distance policy.
    pub fn new(
        depot: Node,
        customers: Vec<Node>,
        fleet: Fleet,
        distances: DistanceMatrix,
    ) -> Result<Self, SolverError> {
        Self::builder(depot, fleet, distances)
            .customers(customers)
            .build()
    }

    /// Starts building an instance.
    pub fn builder(depot: Node, fleet: Fleet, distances: DistanceMatrix) -> InstanceBuilder {
        InstanceBuilder {
            depot,
            customers: Vec::new(),
            fleet,
            distances,
            missing: MissingDistancePolicy::default(),
        }
    }

    /// Fetches the distance matrix from `provider`, then builds the instance.
    ///
    /// Provider failures surface as [`SolverError::DistanceProvider`].
    pub fn from_provider<P: DistanceProvider + ?Sized>(
        depot: Node,
        customers: Vec<Node>,
        fleet: Fleet,
        provider: &P,
        missing: MissingDistancePolicy,
    ) -> Result<Self, SolverError> {
        let coordinates: Vec<Coordinate> = std::iter::once(&depot)
            .chain(customers.iter())
            .map(Coordinate::from)
            .collect();
        let distances = provider.distance_matrix(&coordinates)?;
        Self::builder(depot, fleet, distances)
            .customers(customers)
            .missing_distances(missing)
            .build()
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// The depot node.
    pub fn depot(&self) -> &Node {
        &self.nodes[DEPOT]
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of nodes including the depot.
    pub fn dimension(&self) -> usize {
        self.nodes.len()
    }

    /// Fleet parameters.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.fleet.capacity()
    }

    /// The normalized distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance from node `from` to node `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Travel time from node `from` to node `to` at the fleet's average speed.
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.fleet.travel_time(self.distance(from, to))
    }

    /// Rejects customers that no route could ever serve under `constraints`.
    ///
    /// With capacity constrained, a customer whose demand exceeds capacity
    /// fails with [`SolverError::InfeasibleDemand`]. With time windows
    /// constrained, a customer whose due-time precedes the direct arrival
    /// from the depot fails with [`SolverError::InfeasibleTimeWindow`].
    pub fn check_feasibility(&self, constraints: ConstraintMode) -> Result<(), SolverError> {
        let capacity = self.capacity();
        for (index, node) in self.nodes.iter().enumerate().skip(1) {
            if constraints.limits_capacity() && node.demand() > capacity {
                return Err(SolverError::InfeasibleDemand {
                    customer: index,
                    demand: node.demand(),
                    capacity,
                });
            }
            if constraints.limits_time() {
                let earliest_arrival = self.travel_time(DEPOT, index);
                let due = node.time_window().due();
                if node.time_window().is_violated(earliest_arrival) {
                    return Err(SolverError::InfeasibleTimeWindow {
                        customer: index,
                        earliest_arrival,
                        due,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Builder for [`ProblemInstance`].
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    depot: Node,
    customers: Vec<Node>,
    fleet: Fleet,
    distances: DistanceMatrix,
    missing: MissingDistancePolicy,
}

impl InstanceBuilder {
    /// Appends customers after the depot.
    pub fn customers(mut self, customers: Vec<Node>) -> Self {
        self.customers.extend(customers);
        self
    }

    /// Appends a single customer.
    pub fn customer(mut self, customer: Node) -> Self {
        self.customers.push(customer);
        self
    }

    /// Sets the NaN handling policy.
    pub fn missing_distances(mut self, policy: MissingDistancePolicy) -> Self {
        self.missing = policy;
        self
    }

    /// Validates and freezes the instance.
    pub fn build(self) -> Result<ProblemInstance, SolverError> {
        let Self {
            depot,
            customers,
            fleet,
            mut distances,
            missing,
        } = self;

        validate_fleet(&fleet)?;

        if depot.demand() != 0 {
            return Err(SolverError::invalid_instance(format!(
                "depot demand must be 0, got {}",
                depot.demand()
            )));
        }

        let mut nodes = Vec::with_capacity(customers.len() + 1);
        nodes.push(depot);
        nodes.extend(customers);

        for (index, node) in nodes.iter().enumerate().skip(1) {
            validate_customer(index, node)?;
        }

        if distances.size() != nodes.len() {
            return Err(SolverError::invalid_instance(format!(
                "distance matrix is {0}x{0} but there are {1} nodes",
                distances.size(),
                nodes.len()
            )));
        }

        let missing_count = distances.count_missing();
        if missing_count > 0 {
            match missing {
                MissingDistancePolicy::Zero => {
                    distances.normalize_missing();
                    warn!(
                        count = missing_count,
                        "replaced missing distances with zero"
                    );
                }
                MissingDistancePolicy::Reject => {
                    return Err(SolverError::invalid_instance(format!(
                        "distance matrix has {} missing entries",
                        missing_count
                    )));
                }
            }
        }

        if let Some((from, to, value)) = distances.find_invalid() {
            return Err(SolverError::invalid_instance(format!(
                "distance from {} to {} is {}",
                from, to, value
            )));
        }

        Ok(ProblemInstance {
            nodes,
            fleet,
            distances,
        })
    }
}

fn validate_fleet(fleet: &Fleet) -> Result<(), SolverError> {
    if fleet.capacity() <= 0 {
        return Err(SolverError::invalid_instance(format!(
            "vehicle capacity must be positive, got {}",
            fleet.capacity()
        )));
    }
    if let Some(speed) = fleet.average_speed() {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SolverError::invalid_instance(format!(
                "average speed must be positive, got {}",
                speed
            )));
        }
    }
    for (name, coefficient) in [
        ("cost per distance", fleet.cost_per_distance()),
        ("cost per time", fleet.cost_per_time()),
    ] {
        if let Some(c) = coefficient {
            if !c.is_finite() || c < 0.0 {
                return Err(SolverError::invalid_instance(format!(
                    "{} must be non-negative, got {}",
                    name, c
                )));
            }
        }
    }
    Ok(())
}

fn validate_customer(index: usize, node: &Node) -> Result<(), SolverError> {
    if node.demand() < 0 {
        return Err(SolverError::invalid_instance(format!(
            "customer {} has negative demand {}",
            index,
            node.demand()
        )));
    }
    let tw = node.time_window();
    if !tw.ready().is_finite() || tw.due().is_nan() || tw.ready() > tw.due() {
        return Err(SolverError::invalid_instance(format!(
            "customer {} has an empty time window [{}, {}]",
            index,
            tw.ready(),
            tw.due()
        )));
    }
    if !node.service_time().is_finite() || node.service_time() < 0.0 {
        return Err(SolverError::invalid_instance(format!(
            "customer {} has invalid service time {}",
            index,
            node.service_time()
        )));
    }
    Ok(())
}
