//! Error types.

use thiserror::Error;

/// Errors raised while building an instance or starting a solve.
///
/// Every variant is detected before the first iteration runs; the solve
/// loop itself cannot fail.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid instance: {reason}")]
    InvalidInstance { reason: String },

    #[error("customer {customer} demands {demand}, which exceeds vehicle capacity {capacity}")]
    InfeasibleDemand {
        customer: usize,
        demand: i32,
        capacity: i32,
    },

    #[error(
        "customer {customer} cannot be reached in time: earliest arrival {earliest_arrival}, due {due}"
    )]
    InfeasibleTimeWindow {
        customer: usize,
        earliest_arrival: f64,
        due: f64,
    },

    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("distance provider failed: {0}")]
    DistanceProvider(#[from] DistanceProviderError),
}

impl SolverError {
    pub(crate) fn invalid_instance(reason: impl Into<String>) -> Self {
        Self::InvalidInstance {
            reason: reason.into(),
        }
    }
}

/// Errors raised by a [`DistanceProvider`](crate::distance::DistanceProvider).
#[derive(Debug, Error)]
pub enum DistanceProviderError {
    #[error("response status: {code}")]
    Status { code: String },

    #[error("response has no `distances` field")]
    MissingDistances,

    #[error("expected a {expected}x{expected} matrix, found {found}")]
    Shape { expected: usize, found: String },

    #[error("deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}
