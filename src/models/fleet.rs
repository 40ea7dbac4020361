//! Fleet parameters: capacity, size, and cost coefficients.

use serde::{Deserialize, Serialize};

/// A homogeneous fleet of vehicles starting and ending at the depot.
///
/// `size` is informational: construction opens as many routes as it needs,
/// and the solver only warns when the result uses more routes than vehicles.
///
/// # Examples
///
/// ```
/// use u_aco::models::Fleet;
///
/// let fleet = Fleet::new(200, 4)
///     .with_cost_per_distance(1.5)
///     .with_average_speed(50.0);
/// assert_eq!(fleet.capacity(), 200);
/// assert_eq!(fleet.size(), 4);
/// assert_eq!(fleet.travel_time(100.0), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    capacity: i32,
    size: usize,
    #[serde(default)]
    cost_per_distance: Option<f64>,
    #[serde(default)]
    cost_per_time: Option<f64>,
    #[serde(default)]
    average_speed: Option<f64>,
}

impl Fleet {
    /// Creates a fleet of `size` vehicles with the given capacity.
    ///
    /// Default: no cost coefficients, speed 1 (travel time == distance).
    pub fn new(capacity: i32, size: usize) -> Self {
        Self {
            capacity,
            size,
            cost_per_distance: None,
            cost_per_time: None,
            average_speed: None,
        }
    }

    /// Sets cost per unit distance traveled.
    pub fn with_cost_per_distance(mut self, cost: f64) -> Self {
        self.cost_per_distance = Some(cost);
        self
    }

    /// Sets cost per unit travel time.
    pub fn with_cost_per_time(mut self, cost: f64) -> Self {
        self.cost_per_time = Some(cost);
        self
    }

    /// Sets the constant average speed used to derive travel time.
    pub fn with_average_speed(mut self, speed: f64) -> Self {
        self.average_speed = Some(speed);
        self
    }

    /// Maximum load per vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Number of vehicles available.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost per unit distance, if configured.
    pub fn cost_per_distance(&self) -> Option<f64> {
        self.cost_per_distance
    }

    /// Cost per unit time, if configured.
    pub fn cost_per_time(&self) -> Option<f64> {
        self.cost_per_time
    }

    /// Average speed, if configured.
    pub fn average_speed(&self) -> Option<f64> {
        self.average_speed
    }

    /// Time needed to travel `distance` at the average speed.
    pub fn travel_time(&self, distance: f64) -> f64 {
        match self.average_speed {
            Some(speed) => distance / speed,
            None => distance,
        }
    }

    /// Returns `true` if at least one cost coefficient is configured.
    pub fn has_cost_coefficients(&self) -> bool {
        self.cost_per_distance.is_some() || self.cost_per_time.is_some()
    }

    /// Cost of a route with the given distance and travel time.
    ///
    /// Missing coefficients contribute nothing.
    pub fn cost(&self, distance: f64, time: f64) -> f64 {
        self.cost_per_distance.unwrap_or(0.0) * distance + self.cost_per_time.unwrap_or(0.0) * time
    }
}
