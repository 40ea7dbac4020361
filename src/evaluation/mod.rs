//! Objective evaluation and constraint checking for route sets.

mod evaluator;

pub use evaluator::ObjectiveEvaluator;
