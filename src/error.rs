use std::collections::TryReserveError;
use std::fmt::Debug;

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum BoxTreeError {
    /// A nearest query was given neither a result count nor a distance limit.
    #[error("Nearest query needs a result count or a distance limit")]
    InvalidQueryBounds,

    /// A malformed argument: zero node size, zero result count, non-positive
    /// distance limit, axis out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The node arena could not be allocated during build.
    #[error("Allocation failed while building the tree")]
    AllocationFailed,
}

impl From<TryReserveError> for BoxTreeError {
    fn from(_: TryReserveError) -> Self {
        BoxTreeError::AllocationFailed
    }
}

pub type Result<T> = std::result::Result<T, BoxTreeError>;
