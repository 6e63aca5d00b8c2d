//! Cyclic Jacobi eigenvalue method for real symmetric matrices
//!
//! Each step locates the largest off-diagonal entry A[p][q] (p < q) and
//! applies the plane rotation that zeroes it. The diagonal converges to the
//! eigenvalues and the accumulated rotations to the eigenvectors.

use crate::error::LinalgError;
use crate::matrix::{column, identity};
use crate::utils::norm_2;
use crate::Matrix;

/// Configuration for the Jacobi eigensolver
#[derive(Debug, Clone)]
pub struct JacobiConfig {
    /// Convergence threshold on the largest off-diagonal magnitude
    pub tolerance: f64,
    /// Maximum number of sweeps; one sweep is n(n-1)/2 rotations
    pub max_sweeps: usize,
}

impl JacobiConfig {
    pub fn new(tolerance: f64, max_sweeps: usize) -> Self {
        Self {
            tolerance,
            max_sweeps,
        }
    }

    /// Reject a tolerance that is not finite and positive
    pub fn validate(&self) -> Result<(), LinalgError> {
        check_tolerance(self.tolerance)
    }

    /// Rotation budget for an n × n matrix
    pub fn max_rotations(&self, n: usize) -> usize {
        let per_sweep = (n * n.saturating_sub(1) / 2).max(1);
        self.max_sweeps.saturating_mul(per_sweep)
    }
}

impl Default for JacobiConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_sweeps: 100,
        }
    }
}

/// Tolerances must be finite and strictly positive
pub(crate) fn check_tolerance(tolerance: f64) -> Result<(), LinalgError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(LinalgError::InvalidTolerance(tolerance))
    }
}

/// One eigenvalue with its unit eigenvector
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPair {
    pub value: f64,
    pub vector: Vec<f64>,
}

/// Result of the Jacobi eigendecomposition
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// Eigenvalues in solver order (unsorted)
    pub eigenvalues: Vec<f64>,
    /// Eigenvectors stored as columns (n × n)
    pub eigenvectors: Matrix,
    /// Number of rotations applied
    pub rotations: usize,
}

impl SymmetricEigen {
    /// Eigenpairs in solver order
    pub fn pairs(&self) -> Vec<EigenPair> {
        self.eigenvalues
            .iter()
            .enumerate()
            .map(|(i, &value)| EigenPair {
                value,
                vector: column(&self.eigenvectors, i),
            })
            .collect()
    }
}

/// Plane rotation in the (p, q) plane
#[derive(Debug, Clone, Copy)]
struct JacobiRotation {
    c: f64, // cosine
    s: f64, // sine
}

impl JacobiRotation {
    /// Rotation that annihilates A[p][q]: θ = ½·atan2(2·A[p][q], A[q][q] − A[p][p])
    fn annihilating(app: f64, aqq: f64, apq: f64) -> Self {
        let theta = 0.5 * (2.0 * apq).atan2(aqq - app);
        Self {
            c: theta.cos(),
            s: theta.sin(),
        }
    }
}

/// Locate the largest off-diagonal magnitude in the strict upper triangle.
///
/// Returns `(p, q, |A[p][q]|)`; the first maximum in row-major order wins.
fn find_pivot(a: &Matrix) -> (usize, usize, f64) {
    let n = a.shape().0;
    let (mut p, mut q) = (0, 1);
    let mut max_off = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let aij = a[[i, j]].abs();
            if aij > max_off {
                max_off = aij;
                p = i;
                q = j;
            }
        }
    }
    (p, q, max_off)
}

/// Apply Jᵗ·A·J for the (p, q) rotation, keeping A symmetric.
///
/// The diagonal pair is updated analytically and A[p][q] is set to exactly zero.
fn rotate_symmetric(a: &mut Matrix, p: usize, q: usize, rot: JacobiRotation) {
    let n = a.shape().0;
    let (c, s) = (rot.c, rot.s);
    let app = a[[p, p]];
    let aqq = a[[q, q]];
    let apq = a[[p, q]];

    a[[p, p]] = c * c * app - 2.0 * c * s * apq + s * s * aqq;
    a[[q, q]] = s * s * app + 2.0 * c * s * apq + c * c * aqq;
    a[[p, q]] = 0.0;
    a[[q, p]] = 0.0;

    for k in 0..n {
        if k == p || k == q {
            continue;
        }
        let akp = a[[k, p]];
        let akq = a[[k, q]];
        let new_kp = c * akp - s * akq;
        let new_kq = s * akp + c * akq;
        a[[k, p]] = new_kp;
        a[[p, k]] = new_kp;
        a[[k, q]] = new_kq;
        a[[q, k]] = new_kq;
    }
}

/// Rotate columns p and q of the eigenvector accumulator
fn rotate_columns(v: &mut Matrix, p: usize, q: usize, rot: JacobiRotation) {
    let rows = v.shape().0;
    for k in 0..rows {
        let vkp = v[[k, p]];
        let vkq = v[[k, q]];
        v[[k, p]] = rot.c * vkp - rot.s * vkq;
        v[[k, q]] = rot.s * vkp + rot.c * vkq;
    }
}

/// Eigendecomposition of a real symmetric matrix by Jacobi rotations
///
/// The input must be square and symmetric; only its upper triangle is used to
/// choose pivots, and the result is meaningless for any other input. The
/// matrix is consumed and diagonalized in place.
///
/// # Errors
/// * [`LinalgError::InvalidTolerance`] if `config.tolerance` is not finite and positive
/// * [`LinalgError::NonConvergence`] when the largest off-diagonal entry is
///   still above `config.tolerance` after `config.max_rotations(n)` rotations
pub fn jacobi_eigen(mut a: Matrix, config: &JacobiConfig) -> Result<SymmetricEigen, LinalgError> {
    config.validate()?;
    let (n, cols) = *a.shape();
    debug_assert_eq!(n, cols, "Jacobi eigensolver requires a square matrix");

    let mut v = identity(n);
    let max_rotations = config.max_rotations(n);
    let mut rotations = 0;

    while n >= 2 {
        let (p, q, max_off) = find_pivot(&a);
        if max_off < config.tolerance {
            break;
        }
        if rotations >= max_rotations {
            log::warn!(
                "Jacobi eigensolver stopped after {} rotations on a {}x{} matrix (off-diagonal {:e})",
                rotations,
                n,
                n,
                max_off
            );
            return Err(LinalgError::NonConvergence {
                rotations,
                off_diagonal: max_off,
            });
        }

        let rot = JacobiRotation::annihilating(a[[p, p]], a[[q, q]], a[[p, q]]);
        rotate_symmetric(&mut a, p, q, rot);
        rotate_columns(&mut v, p, q, rot);
        rotations += 1;
    }

    let eigenvalues: Vec<f64> = (0..n).map(|i| a[[i, i]]).collect();

    // Rotations preserve unit norm up to rounding; renormalize to remove drift
    for j in 0..n {
        let norm = norm_2(&column(&v, j));
        if norm > 0.0 {
            for i in 0..n {
                v[[i, j]] /= norm;
            }
        }
    }

    log::debug!("Jacobi eigensolver converged on {}x{} after {} rotations", n, n, rotations);

    Ok(SymmetricEigen {
        eigenvalues,
        eigenvectors: v,
        rotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sym(rows: [[f64; 3]; 3]) -> Matrix {
        Matrix::from_fn([3, 3], |idx| rows[idx[0]][idx[1]])
    }

    #[test]
    fn test_annihilating_rotation_is_orthogonal() {
        let rot = JacobiRotation::annihilating(2.0, 5.0, 1.5);
        assert_abs_diff_eq!(rot.c * rot.c + rot.s * rot.s, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_single_rotation_zeroes_pivot() {
        let mut a = sym([[4.0, 1.0, 2.0], [1.0, 3.0, 0.5], [2.0, 0.5, 1.0]]);
        let (p, q, max_off) = find_pivot(&a);
        assert_eq!((p, q), (0, 2));
        assert_abs_diff_eq!(max_off, 2.0, epsilon = 0.0);

        let trace = a[[0, 0]] + a[[1, 1]] + a[[2, 2]];
        let rot = JacobiRotation::annihilating(a[[p, p]], a[[q, q]], a[[p, q]]);
        rotate_symmetric(&mut a, p, q, rot);

        assert_eq!(a[[0, 2]], 0.0);
        assert_eq!(a[[2, 0]], 0.0);
        // Similarity transforms preserve the trace
        assert_abs_diff_eq!(a[[0, 0]] + a[[1, 1]] + a[[2, 2]], trace, epsilon = 1e-12);
        assert_abs_diff_eq!(a[[0, 1]], a[[1, 0]], epsilon = 0.0);
    }

    #[test]
    fn test_diagonal_input_needs_no_rotation() {
        let a = sym([[3.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 2.0]]);
        let eig = jacobi_eigen(a, &JacobiConfig::default()).unwrap();
        assert_eq!(eig.rotations, 0);
        assert_eq!(eig.eigenvalues, vec![3.0, -1.0, 2.0]);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(eig.eigenvectors[[i, j]], expected);
            }
        }
    }

    #[test]
    fn test_2x2_closed_form() {
        // [[2, 1], [1, 2]] has eigenvalues 1 and 3
        let a = Matrix::from_fn([2, 2], |idx| if idx[0] == idx[1] { 2.0 } else { 1.0 });
        let eig = jacobi_eigen(a, &JacobiConfig::default()).unwrap();
        assert_eq!(eig.rotations, 1);

        let mut values = eig.eigenvalues.clone();
        values.sort_by(|a, b| a.total_cmp(b));
        assert_abs_diff_eq!(values[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_1x1_matrix() {
        let a = Matrix::from_elem([1, 1], 7.5);
        let eig = jacobi_eigen(a, &JacobiConfig::default()).unwrap();
        assert_eq!(eig.eigenvalues, vec![7.5]);
        assert_eq!(eig.eigenvectors[[0, 0]], 1.0);
    }

    #[test]
    fn test_pairs_follow_solver_order() {
        let a = sym([[4.0, 1.0, 2.0], [1.0, 3.0, 0.5], [2.0, 0.5, 1.0]]);
        let eig = jacobi_eigen(a, &JacobiConfig::default()).unwrap();
        let pairs = eig.pairs();
        assert_eq!(pairs.len(), 3);
        for (i, pair) in pairs.iter().enumerate() {
            assert_eq!(pair.value, eig.eigenvalues[i]);
            assert_abs_diff_eq!(norm_2(&pair.vector), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_tolerance_is_rejected() {
        for tolerance in [0.0, -1e-12, f64::NAN, f64::INFINITY] {
            let a = Matrix::from_elem([1, 1], 2.0);
            let err = jacobi_eigen(a, &JacobiConfig::new(tolerance, 100)).unwrap_err();
            assert!(matches!(err, LinalgError::InvalidTolerance(_)), "tolerance {}", tolerance);
        }
    }

    #[test]
    fn test_tiny_tolerance_on_1x1_and_diagonal() {
        let config = JacobiConfig::new(f64::MIN_POSITIVE, 100);

        let eig = jacobi_eigen(Matrix::from_elem([1, 1], 2.0), &config).unwrap();
        assert_eq!(eig.eigenvalues, vec![2.0]);
        assert_eq!(eig.rotations, 0);

        let a = sym([[3.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        let eig = jacobi_eigen(a, &config).unwrap();
        assert_eq!(eig.eigenvalues, vec![3.0, 1.0, 2.0]);
        assert_eq!(eig.rotations, 0);
    }

    #[test]
    fn test_1x1_with_zero_budget() {
        let eig = jacobi_eigen(Matrix::from_elem([1, 1], -4.0), &JacobiConfig::new(1e-12, 0)).unwrap();
        assert_eq!(eig.eigenvalues, vec![-4.0]);
    }

    #[test]
    fn test_rotation_budget() {
        let config = JacobiConfig::new(1e-12, 3);
        assert_eq!(config.max_rotations(1), 3);
        assert_eq!(config.max_rotations(4), 18);
    }
}
