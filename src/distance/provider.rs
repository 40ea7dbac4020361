//! Distance providers.
//!
//! The solver never computes road distances itself; a provider turns the
//! depot-first coordinate list into a [`DistanceMatrix`] once, before the
//! instance is built. Network clients live outside this crate and plug in
//! through [`DistanceProvider`], typically decoding their response body with
//! [`parse_table_response`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DistanceMatrix;
use crate::error::DistanceProviderError;
use crate::models::Node;

/// A planar coordinate, depot first in every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl From<&Node> for Coordinate {
    fn from(node: &Node) -> Self {
        Self {
            x: node.x(),
            y: node.y(),
        }
    }
}

/// Source of the N×N distance matrix for an ordered coordinate list.
pub trait DistanceProvider {
    /// Returns distances between every pair of `coordinates`.
    ///
    /// Failures are returned, never replaced by zero distances.
    fn distance_matrix(
        &self,
        coordinates: &[Coordinate],
    ) -> Result<DistanceMatrix, DistanceProviderError>;
}

/// Straight-line distances, multiplied by `scale`.
///
/// # Examples
///
/// ```
/// use u_aco::distance::{Coordinate, DistanceProvider, EuclideanProvider};
///
/// let coords = [Coordinate { x: 0.0, y: 0.0 }, Coordinate { x: 3.0, y: 4.0 }];
/// let dm = EuclideanProvider::default().distance_matrix(&coords).unwrap();
/// assert!((dm.get(1, 0) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuclideanProvider {
    scale: f64,
}

impl EuclideanProvider {
    /// Creates a provider that multiplies every distance by `scale`.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Default for EuclideanProvider {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl DistanceProvider for EuclideanProvider {
    fn distance_matrix(
        &self,
        coordinates: &[Coordinate],
    ) -> Result<DistanceMatrix, DistanceProviderError> {
        let n = coordinates.len();
        let mut dm = DistanceMatrix::new(n);
        for (i, a) in coordinates.iter().enumerate() {
            for (j, b) in coordinates.iter().enumerate().skip(i + 1) {
                let d = (a.x - b.x).hypot(a.y - b.y) * self.scale;
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        Ok(dm)
    }
}

#[derive(Deserialize)]
struct TableResponse {
    code: Option<String>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

/// Decodes an OSRM-style table response body into a distance matrix.
///
/// The body is expected to look like
/// `{"code": "Ok", "distances": [[0.0, 1200.5], [1180.0, null]]}`; every
/// entry is multiplied by `scale` (`1e-3` turns meters into kilometers).
/// `null` entries become NaN so the instance's missing-distance policy
/// decides their fate.
///
/// # Examples
///
/// ```
/// use u_aco::distance::parse_table_response;
///
/// let body = r#"{"code":"Ok","distances":[[0,1500],[1500,0]]}"#;
/// let dm = parse_table_response(body, 2, 1e-3).unwrap();
/// assert!((dm.get(0, 1) - 1.5).abs() < 1e-12);
/// ```
pub fn parse_table_response(
    body: &str,
    expected: usize,
    scale: f64,
) -> Result<DistanceMatrix, DistanceProviderError> {
    let response: TableResponse = serde_json::from_str(body)?;

    if let Some(code) = response.code {
        if code != "Ok" {
            return Err(DistanceProviderError::Status { code });
        }
    }

    let rows = response
        .distances
        .ok_or(DistanceProviderError::MissingDistances)?;

    if rows.len() != expected {
        return Err(DistanceProviderError::Shape {
            expected,
            found: format!("{} rows", rows.len()),
        });
    }

    let rows: Vec<Vec<f64>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|d| d.unwrap_or(f64::NAN)).collect())
        .collect();
    let mut dm = DistanceMatrix::from_rows(rows).ok_or_else(|| DistanceProviderError::Shape {
        expected,
        found: "rows of unequal length".to_string(),
    })?;
    dm.scale(scale);

    debug!(
        size = expected,
        missing = dm.count_missing(),
        "decoded distance table"
    );
    Ok(dm)
}
