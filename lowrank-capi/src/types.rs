//! Opaque types for C API

use std::sync::Arc;

use lowrank_svd::{Decomposition, Matrix};

/// Opaque decomposition handle: A = U · S · Vᵗ for an m × n matrix A
#[derive(Clone)]
pub struct lra_svd {
    inner: Arc<Decomposition>,
}

impl lra_svd {
    pub(crate) fn new(decomposition: Decomposition) -> Self {
        Self {
            inner: Arc::new(decomposition),
        }
    }

    pub(crate) fn decomposition(&self) -> &Decomposition {
        &self.inner
    }

    pub(crate) fn dims(&self) -> (usize, usize) {
        (self.inner.rows(), self.inner.cols())
    }

    pub(crate) fn u(&self) -> &Matrix {
        &self.inner.u
    }

    pub(crate) fn s(&self) -> &Matrix {
        &self.inner.s
    }

    pub(crate) fn v(&self) -> &Matrix {
        &self.inner.v
    }
}
