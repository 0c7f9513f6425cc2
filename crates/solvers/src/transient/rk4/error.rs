/// Errors that can occur during RK4 integration.
///
/// All variants are contract violations. Non-finite values produced by the
/// derivative are not errors; they propagate through the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("initial state must have at least one component")]
    EmptyState,

    #[error(
        "derivative returned {actual} values for a state of dimension {expected} (step {step})"
    )]
    ShapeMismatch {
        /// Index of the step being computed (0 advances row 0 to row 1).
        step: usize,
        expected: usize,
        actual: usize,
    },
}
