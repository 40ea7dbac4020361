//! Route and route set types.

use serde::{Deserialize, Serialize};

/// Index of the depot in every [`ProblemInstance`](super::ProblemInstance).
pub const DEPOT: usize = 0;

/// An ordered sequence of node indices driven by a single vehicle.
///
/// A closed route starts and ends at the depot; the stops in between are
/// customer indices.
///
/// # Examples
///
/// ```
/// use u_aco::models::Route;
///
/// let route = Route::from_customers(&[3, 1]);
/// assert_eq!(route.stops(), &[0, 3, 1, 0]);
/// assert_eq!(route.customers(), &[3, 1]);
/// assert_eq!(route.edges().collect::<Vec<_>>(), vec![(0, 3), (3, 1), (1, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<usize>,
}

impl Route {
    /// Opens a route at the depot.
    pub fn new() -> Self {
        Self { stops: vec![DEPOT] }
    }

    /// Builds a closed route visiting the given customers in order.
    pub fn from_customers(customers: &[usize]) -> Self {
        let mut stops = Vec::with_capacity(customers.len() + 2);
        stops.push(DEPOT);
        stops.extend_from_slice(customers);
        stops.push(DEPOT);
        Self { stops }
    }

    /// Wraps an explicit stop sequence without checking depot anchoring.
    pub fn from_stops(stops: Vec<usize>) -> Self {
        Self { stops }
    }

    /// Appends a stop.
    pub fn push(&mut self, node: usize) {
        self.stops.push(node);
    }

    /// Appends the trailing depot visit.
    pub fn close(&mut self) {
        self.stops.push(DEPOT);
    }

    /// Every stop including the depot at both ends.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Customer stops only (depot endpoints excluded).
    pub fn customers(&self) -> &[usize] {
        match self.stops.len() {
            0 | 1 => &[],
            n if self.is_closed() => &self.stops[1..n - 1],
            _ => &self.stops[1..],
        }
    }

    /// Number of customer visits.
    pub fn len(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers().is_empty()
    }

    /// Returns `true` if the route starts and ends at the depot.
    pub fn is_closed(&self) -> bool {
        self.stops.len() >= 2
            && self.stops.first() == Some(&DEPOT)
            && self.stops.last() == Some(&DEPOT)
    }

    /// Consecutive `(from, to)` pairs in travel direction.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.stops.windows(2).map(|w| (w[0], w[1]))
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

/// A collection of routes produced by one construction pass.
///
/// After construction every customer appears in exactly one route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// Creates an empty route set.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Adds a route.
    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// The routes in construction order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if there are no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Total number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Node index sequences, depot included, one per route.
    pub fn to_index_lists(&self) -> Vec<Vec<usize>> {
        self.routes.iter().map(|r| r.stops().to_vec()).collect()
    }
}

impl FromIterator<Route> for RouteSet {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_new_is_open() {
        let r = Route::new();
        assert_eq!(r.stops(), &[0]);
        assert!(!r.is_closed());
        assert!(r.is_empty());
        assert_eq!(r.edges().count(), 0);
    }

    #[test]
    fn test_route_push_and_close() {
        let mut r = Route::new();
        r.push(5);
        r.push(3);
        assert_eq!(r.customers(), &[5, 3]);
        r.close();
        assert!(r.is_closed());
        assert_eq!(r.stops(), &[0, 5, 3, 0]);
        assert_eq!(r.customers(), &[5, 3]);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_route_edges_are_directional() {
        let r = Route::from_customers(&[1, 2]);
        let edges: Vec<_> = r.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
        assert!(!edges.contains(&(1, 0)));
    }

    #[test]
    fn test_route_from_stops_unanchored() {
        let r = Route::from_stops(vec![2, 1, 0]);
        assert!(!r.is_closed());
    }

    #[test]
    fn test_route_set() {
        let set: RouteSet = vec![Route::from_customers(&[1]), Route::from_customers(&[2, 3])]
            .into_iter()
            .collect();
        assert_eq!(set.num_routes(), 2);
        assert_eq!(set.num_served(), 3);
        assert_eq!(set.to_index_lists(), vec![vec![0, 1, 0], vec![0, 2, 3, 0]]);
    }

    #[test]
    fn test_route_set_empty() {
        let set = RouteSet::new();
        assert!(set.is_empty());
        assert_eq!(set.num_served(), 0);
    }
}
