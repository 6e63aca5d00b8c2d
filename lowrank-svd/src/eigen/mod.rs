//! Symmetric eigenvalue decomposition

pub mod jacobi;

pub use jacobi::{EigenPair, JacobiConfig, SymmetricEigen, jacobi_eigen};
