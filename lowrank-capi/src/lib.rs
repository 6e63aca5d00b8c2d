//! C API for lowrank-svd
//!
//! Matrices cross the boundary as row-major `double` buffers with explicit
//! extents. Decompositions are returned as opaque `lra_svd` handles that the
//! caller releases with `lra_svd_release`. Every function reports failure
//! through an integer status code and never unwinds into C.

#![allow(non_camel_case_types)]

#[macro_use]
mod macros;

mod utils;
mod types;
mod matrix;
mod svd;
mod lra;

pub use types::*;
pub use matrix::*;
pub use svd::*;
pub use lra::*;

use lowrank_svd::LinalgError;

/// Status code returned by every C API function
pub type StatusCode = libc::c_int;

pub const LRA_SUCCESS: StatusCode = 0;
pub const LRA_DIMENSION_MISMATCH: StatusCode = -1;
pub const LRA_INVALID_DIMENSIONS: StatusCode = -2;
pub const LRA_INVALID_RANK: StatusCode = -3;
pub const LRA_INCOMPLETE_DECOMPOSITION: StatusCode = -4;
pub const LRA_NON_CONVERGENCE: StatusCode = -5;
pub const LRA_INVALID_ARGUMENT: StatusCode = -6;
pub const LRA_INTERNAL_ERROR: StatusCode = -7;

/// Map a core error onto its C status code
pub(crate) fn status_from_error(err: &LinalgError) -> StatusCode {
    log::debug!("C API call failed: {}", err);
    match err {
        LinalgError::DimensionMismatch { .. } => LRA_DIMENSION_MISMATCH,
        LinalgError::InvalidDimensions { .. } => LRA_INVALID_DIMENSIONS,
        LinalgError::InvalidRank(_) => LRA_INVALID_RANK,
        LinalgError::IncompleteDecomposition(_) => LRA_INCOMPLETE_DECOMPOSITION,
        LinalgError::NonConvergence { .. } => LRA_NON_CONVERGENCE,
        LinalgError::InvalidTolerance(_) | LinalgError::BufferSize { .. } => LRA_INVALID_ARGUMENT,
    }
}
