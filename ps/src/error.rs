//! Plan error types

use thiserror::Error;

/// Errors from plan state operations
///
/// `AlreadyComplete` is an idempotency signal, not a hard failure: repeated
/// completion calls from a model are expected, and the tool surface reports
/// them as informational text. `StepNotFound` is a real caller error and
/// stays an error. Do not unify the two.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Cannot create an empty plan: at least one step is required")]
    EmptyPlan,

    #[error("Step {index} has an empty description")]
    EmptyStep { index: usize },

    #[error("No plan created yet")]
    NoPlan,

    #[error("Step {index} not found (the plan has steps 1 to {len})")]
    StepNotFound { index: usize, len: usize },

    #[error("Step {index} is already complete")]
    AlreadyComplete { index: usize },
}
