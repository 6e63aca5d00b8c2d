//! # lowrank-svd: Dense SVD and low-rank approximation
//!
//! A pure-Rust singular value decomposition built on the cyclic Jacobi
//! eigenvalue method, with truncated-rank reconstruction on top.
//!
//! The pipeline is:
//! 1. `G = Aᵗ·A` via [`matrix::multiply`]
//! 2. Eigendecomposition of `G` with [`eigen::jacobi_eigen`]
//! 3. Sorting, singular values, left vectors and basis completion in [`svd::svd`]
//! 4. Rank-k reconstruction with [`lra::low_rank_approx`]
//!
//! Matrices are `mdarray` tensors: one contiguous buffer with explicit extents.

pub mod eigen;
pub mod error;
pub mod lra;
pub mod matrix;
pub mod svd;
pub mod utils;

pub use eigen::{EigenPair, JacobiConfig, SymmetricEigen, jacobi_eigen};
pub use error::LinalgError;
pub use lra::{low_rank_approx, truncation_error};
pub use matrix::{frobenius_norm, multiply, normalize, transpose};
pub use svd::{BasisCompletion, Decomposition, SvdConfig, SvdDiagnostics, svd, svd_with_config};
pub use utils::{norm_2, validate_svd};

// Re-export mdarray types
pub use mdarray::DTensor;

/// Dense row-major matrix of `f64` values.
pub type Matrix = DTensor<f64, 2>;
