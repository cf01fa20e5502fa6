//! Service quality checks over a finished run.

mod evaluator;

pub use evaluator::{DeadlineEvaluator, Violation, ViolationType};
