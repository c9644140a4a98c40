use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReduceError>;

#[derive(Error, Debug)]
pub enum ReduceError {
    /// Bucket memberships failed to partition the input witness set.
    /// A programming error: the pipeline aborts rather than returning a
    /// corrupted result.
    #[error("Clustering invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
