use thiserror::Error;

/// Errors produced by the counting, ranking and unranking operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CombinatoricsError {
    /// A malformed case or query: `k < 1`, `n < k`, a sub-case larger than
    /// the case a table was built for, or a rank outside the case's range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An arithmetic step would exceed the maximum value of the active
    /// numeric width. Recoverable by escalating to a wider width.
    #[error("arithmetic overflow for the active numeric width")]
    Overflow,
    /// The query needs Pascal's triangle, but the case was built without one
    /// (`k == 1` and `k == n` cases skip table construction).
    #[error("Pascal's triangle was not built for this case")]
    TableNotBuilt,
}
