//! Common test utilities
#![allow(dead_code)]

use lowrank_svd::Matrix;

/// Simple deterministic pseudo-random number generator (LCG)
///
/// Uses the Numerical Recipes parameters a = 1664525, c = 1013904223.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next f64 in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        ((self.state >> 16) as f64) / ((1u64 << 48) as f64)
    }

    /// Next f64 in [-1, 1)
    pub fn next_signed(&mut self) -> f64 {
        2.0 * self.next_f64() - 1.0
    }
}

/// m × n matrix with entries uniform in [-1, 1)
pub fn random_matrix(rng: &mut SimpleRng, m: usize, n: usize) -> Matrix {
    let data: Vec<f64> = (0..m * n).map(|_| rng.next_signed()).collect();
    Matrix::from_fn([m, n], |idx| data[idx[0] * n + idx[1]])
}

/// H[i,j] = 1 / (i + j + 1)
pub fn hilbert(m: usize, n: usize) -> Matrix {
    Matrix::from_fn([m, n], |idx| 1.0 / ((idx[0] + idx[1] + 1) as f64))
}

/// Row-major literal helper
pub fn mat<const N: usize>(rows: &[[f64; N]]) -> Matrix {
    Matrix::from_fn([rows.len(), N], |idx| rows[idx[0]][idx[1]])
}

/// Largest absolute entry-wise difference
pub fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
    let (m, n) = *a.shape();
    assert_eq!((m, n), *b.shape());
    let mut worst = 0.0_f64;
    for i in 0..m {
        for j in 0..n {
            worst = worst.max((a[[i, j]] - b[[i, j]]).abs());
        }
    }
    worst
}
