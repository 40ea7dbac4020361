//! Distance matrices and the providers that produce them.
//!
//! Provides a dense distance matrix for routing problems, plus the
//! [`DistanceProvider`] seam through which external routing services
//! supply it.

mod matrix;
mod provider;

pub use matrix::DistanceMatrix;
pub use provider::{parse_table_response, Coordinate, DistanceProvider, EuclideanProvider};
