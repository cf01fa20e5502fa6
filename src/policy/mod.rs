//! Package loading eligibility.
//!
//! - [`LoadingPolicy`] — the decision seam consulted before every load
//! - [`StandardPolicy`] — the default first-failing-check rule chain
//! - [`LoadingDecision`] / [`ConstraintKind`] — the decision and its reason
//! - [`ConstraintViolation`] — a recorded rejection

mod decision;
mod standard;

pub use decision::{ConstraintKind, ConstraintViolation, LoadingDecision};
pub use standard::{evaluate, LoadingPolicy, StandardPolicy};
