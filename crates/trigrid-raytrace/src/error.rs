//! Error types for grid construction.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while building the grid.
///
/// A ray missing the domain or a traversal finding no triangle are normal
/// outcomes and are reported as `None` by the query functions, not as
/// errors.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Allocation of the voxel array or a per-voxel triangle list failed.
    /// The partially built grid is dropped; the build must be retried from
    /// scratch.
    #[error("out of memory while building the voxel grid")]
    OutOfMemory(#[from] TryReserveError),
}

/// Result type for grid construction.
pub type Result<T> = std::result::Result<T, BuildError>;
