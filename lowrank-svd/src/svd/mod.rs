//! SVD built on the eigendecomposition of AᵗA
//!
//! For A (m × n) the right singular vectors are the eigenvectors of the
//! symmetric positive semi-definite Gram matrix G = AᵗA, the singular values
//! are the square roots of its eigenvalues, and the left singular vectors are
//! u_i = A·v_i / σ_i, orthonormalized and completed to a full m × m basis.

pub mod basis;

use std::cmp::Ordering;

use crate::eigen::jacobi::check_tolerance;
use crate::eigen::{JacobiConfig, jacobi_eigen};
use crate::error::LinalgError;
use crate::lra::low_rank_approx;
use crate::matrix::{multiply, transpose, zeros};
use crate::Matrix;

pub use basis::{BasisCompletion, complete_orthonormal_basis, orthonormalize_columns};

/// Configuration for SVD computation
#[derive(Debug, Clone)]
pub struct SvdConfig {
    /// Singular values below this are treated as zero, and Gram–Schmidt
    /// residuals below this are treated as degenerate
    pub tolerance: f64,
    /// Settings for the eigensolver applied to AᵗA
    pub jacobi: JacobiConfig,
}

impl SvdConfig {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            jacobi: JacobiConfig::default(),
        }
    }

    /// Both tolerances must be finite and positive
    pub fn validate(&self) -> Result<(), LinalgError> {
        check_tolerance(self.tolerance)?;
        self.jacobi.validate()
    }
}

impl Default for SvdConfig {
    fn default() -> Self {
        Self::new(1e-12)
    }
}

/// Numerical events recorded while computing a decomposition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvdDiagnostics {
    /// Jacobi rotations applied to AᵗA
    pub rotations: usize,
    /// Negative eigenvalues of AᵗA clamped to zero
    pub clamped_eigenvalues: usize,
    /// Leading columns of U with σ below tolerance or lost to Gram–Schmidt
    pub rank_deficient_columns: usize,
    /// How the remaining columns of U were filled
    pub completion: BasisCompletion,
}

/// Result of SVD decomposition: A ≈ U · S · Vᵗ
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Left singular vectors (m × m, orthonormal)
    pub u: Matrix,
    /// Singular values on the diagonal (m × n, descending, nonnegative)
    pub s: Matrix,
    /// Right singular vectors (n × n, orthonormal)
    pub v: Matrix,
    pub diagnostics: SvdDiagnostics,
}

impl Decomposition {
    /// Assemble a decomposition from separately held factors.
    ///
    /// Fails with [`LinalgError::IncompleteDecomposition`] if any factor is
    /// missing or is not shaped m × m, m × n and n × n respectively.
    pub fn from_parts(
        m: usize,
        n: usize,
        u: Option<Matrix>,
        s: Option<Matrix>,
        v: Option<Matrix>,
    ) -> Result<Self, LinalgError> {
        let (u, s, v) = match (u, s, v) {
            (Some(u), Some(s), Some(v)) => (u, s, v),
            (u, s, v) => {
                let missing: Vec<&str> = [("U", u.is_none()), ("S", s.is_none()), ("V", v.is_none())]
                    .iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(name, _)| *name)
                    .collect();
                return Err(LinalgError::IncompleteDecomposition(format!(
                    "missing factor(s) {}",
                    missing.join(", ")
                )));
            }
        };

        let decomposition = Self {
            u,
            s,
            v,
            diagnostics: SvdDiagnostics::default(),
        };
        decomposition.check_shapes(m, n)?;
        Ok(decomposition)
    }

    /// Verify that the factors describe an m × n matrix
    pub(crate) fn check_shapes(&self, m: usize, n: usize) -> Result<(), LinalgError> {
        let expected = [("U", (m, m)), ("S", (m, n)), ("V", (n, n))];
        let actual = [*self.u.shape(), *self.s.shape(), *self.v.shape()];
        for ((name, want), got) in expected.iter().zip(actual) {
            if *want != got {
                return Err(LinalgError::IncompleteDecomposition(format!(
                    "factor {} is {}x{}, expected {}x{}",
                    name, got.0, got.1, want.0, want.1
                )));
            }
        }
        Ok(())
    }

    /// Number of rows m of the decomposed matrix
    pub fn rows(&self) -> usize {
        self.s.shape().0
    }

    /// Number of columns n of the decomposed matrix
    pub fn cols(&self) -> usize {
        self.s.shape().1
    }

    /// Diagonal of S (length min(m, n))
    pub fn singular_values(&self) -> Vec<f64> {
        let r = self.rows().min(self.cols());
        (0..r).map(|i| self.s[[i, i]]).collect()
    }

    /// Effective rank: number of leading σ_i with σ_i > rtol · σ_0
    pub fn rank(&self, rtol: f64) -> usize {
        let s = self.singular_values();
        let Some(&max_sv) = s.first() else {
            return 0;
        };
        if max_sv <= 0.0 {
            return 0;
        }
        let threshold = max_sv * rtol;
        s.iter().take_while(|&&sv| sv > threshold).count()
    }

    /// Full reconstruction U · S · Vᵗ
    pub fn reconstruct(&self) -> Result<Matrix, LinalgError> {
        let r = self.rows().min(self.cols());
        low_rank_approx(self.rows(), self.cols(), self, r)
    }

    /// Rank-k reconstruction; `k` above min(m, n) is clamped
    pub fn low_rank(&self, k: usize) -> Result<Matrix, LinalgError> {
        low_rank_approx(self.rows(), self.cols(), self, k)
    }

    /// True when basis completion had to accept a non-orthogonal fallback
    pub fn has_fallback(&self) -> bool {
        !self.diagnostics.completion.is_complete()
    }
}

/// Indices ordering `values` descending; equal values keep ascending index.
///
/// NaN sorts after every number so a poisoned eigenvalue cannot displace a
/// valid one.
fn descending_order(values: &[f64]) -> Vec<usize> {
    let key = |x: f64| if x.is_nan() { f64::NEG_INFINITY } else { x };
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        key(values[b])
            .partial_cmp(&key(values[a]))
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    indices
}

/// SVD with default settings (tolerance 1e-12)
pub fn svd(a: &Matrix) -> Result<Decomposition, LinalgError> {
    svd_with_config(a, &SvdConfig::default())
}

/// SVD of an arbitrary real m × n matrix
///
/// # Errors
/// * [`LinalgError::InvalidTolerance`] if either tolerance is not finite and positive
/// * [`LinalgError::InvalidDimensions`] if m or n is zero
/// * [`LinalgError::NonConvergence`] if the eigensolver exhausts its budget
pub fn svd_with_config(a: &Matrix, config: &SvdConfig) -> Result<Decomposition, LinalgError> {
    config.validate()?;
    let (m, n) = *a.shape();
    if m == 0 || n == 0 {
        return Err(LinalgError::InvalidDimensions { rows: m, cols: n });
    }
    let r = m.min(n);
    let tol = config.tolerance;

    // Step 1-2: eigendecomposition of the Gram matrix
    let gram = multiply(&transpose(a), a)?;
    let eig = jacobi_eigen(gram, &config.jacobi)?;

    // Step 3-4: sort eigenpairs descending, V holds the sorted eigenvectors
    let order = descending_order(&eig.eigenvalues);
    let v = Matrix::from_fn([n, n], |idx| eig.eigenvectors[[idx[0], order[idx[1]]]]);

    // Step 5: σ_i = sqrt(max(λ_i, 0))
    let mut s = zeros(m, n);
    let mut clamped_eigenvalues = 0;
    for (i, &src) in order.iter().take(r).enumerate() {
        let lambda = eig.eigenvalues[src];
        if lambda < 0.0 {
            clamped_eigenvalues += 1;
        }
        s[[i, i]] = lambda.max(0.0).sqrt();
    }
    if clamped_eigenvalues > 0 {
        log::debug!(
            "Clamped {} negative eigenvalue(s) of AᵗA to zero",
            clamped_eigenvalues
        );
    }

    // Step 6: u_i = A·v_i / σ_i for the non-degenerate directions
    let mut u = zeros(m, m);
    let mut fixed = vec![false; m];
    for i in 0..r {
        let sigma = s[[i, i]];
        if sigma < tol {
            continue;
        }
        for row in 0..m {
            let mut acc = 0.0;
            for k in 0..n {
                acc += a[[row, k]] * v[[k, i]];
            }
            u[[row, i]] = acc / sigma;
        }
        fixed[i] = true;
    }
    orthonormalize_columns(&mut u, &mut fixed, tol);
    let rank_deficient_columns = fixed[..r].iter().filter(|&&f| !f).count();

    // Step 7: complete U to an orthonormal m × m basis
    let completion = complete_orthonormal_basis(&mut u, &mut fixed, tol);
    if !completion.is_complete() {
        log::warn!(
            "SVD of {}x{} matrix used fallback vectors for U columns {:?}",
            m,
            n,
            completion.fallback_columns
        );
    }

    log::debug!(
        "SVD of {}x{} matrix: {} rotations, {} rank-deficient column(s), {} completed column(s)",
        m,
        n,
        eig.rotations,
        rank_deficient_columns,
        completion.completed_columns.len()
    );

    Ok(Decomposition {
        u,
        s,
        v,
        diagnostics: SvdDiagnostics {
            rotations: eig.rotations,
            clamped_eigenvalues,
            rank_deficient_columns,
            completion,
        },
    })
}
