//! Node and time window types.

use serde::{Deserialize, Deserializer, Serialize};

/// A time window constraint for service at a node.
///
/// The vehicle must arrive no later than `due` and may arrive as early as
/// `ready` (waiting is allowed if early). `due` may be `+∞`, meaning the
/// node has no deadline.
///
/// # Examples
///
/// ```
/// use u_aco::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
///
/// let open = TimeWindow::unbounded();
/// assert!(!open.is_violated(1e12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default)]
    ready: f64,
    // serde_json writes an infinite due as `null`
    #[serde(default = "infinite", deserialize_with = "due_or_infinite")]
    due: f64,
}

fn infinite() -> f64 {
    f64::INFINITY
}

fn due_or_infinite<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due`, `ready` is non-finite, or `due` is NaN.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || due.is_nan() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// A window open from time zero with no deadline.
    pub fn unbounded() -> Self {
        Self {
            ready: 0.0,
            due: f64::INFINITY,
        }
    }

    /// Earliest allowable service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival time.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Returns the waiting time if arriving at the given time.
    ///
    /// Zero if the vehicle arrives within or after the window.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.ready {
            self.ready - arrival
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at the given time violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.due
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// A depot or customer location.
///
/// The depot always sits at index 0 of a [`ProblemInstance`](super::ProblemInstance)
/// and carries zero demand. Coordinates are only consumed by distance
/// providers; the solver itself works on the distance matrix.
///
/// # Examples
///
/// ```
/// use u_aco::models::{Node, TimeWindow};
///
/// let depot = Node::depot(35.0, 35.0);
/// assert_eq!(depot.name(), "Depot");
/// assert_eq!(depot.demand(), 0);
///
/// let c = Node::new("Bakery", 41.0, 49.0, 10)
///     .with_time_window(TimeWindow::new(0.0, 120.0).unwrap())
///     .with_service_time(5.0);
/// assert_eq!(c.demand(), 10);
/// assert_eq!(c.time_window().due(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    x: f64,
    y: f64,
    demand: i32,
    #[serde(default)]
    time_window: TimeWindow,
    #[serde(default)]
    service_time: f64,
}

impl Node {
    /// Creates a customer node with no time window and zero service time.
    pub fn new(name: impl Into<String>, x: f64, y: f64, demand: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            demand,
            time_window: TimeWindow::unbounded(),
            service_time: 0.0,
        }
    }

    /// Creates a depot at the given coordinates (demand 0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new("Depot", x, y, 0)
    }

    /// Sets a time window for this node.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// Sets the time spent servicing this node.
    pub fn with_service_time(mut self, service_time: f64) -> Self {
        self.service_time = service_time;
        self
    }

    /// Display identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand at this node (units to deliver).
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Time window; unbounded unless set.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    /// Service duration at this node.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
