//! Errors shared by all sampling routines.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// A caller-supplied parameter was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A construction that should be correct by design was not, e.g. a delta
    /// matrix that failed to invert mod 2.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// A random draw was malformed or the source could not produce one.
    #[error("random source error: {0}")]
    RandomSource(String),
}

pub type SampleResult<T> = Result<T, SampleError>;
