//! Gram–Schmidt orthonormalization and basis completion
//!
//! Columns of the working matrix are tracked by a `fixed` mask: a fixed column
//! is unit-norm and orthogonal to every other fixed column. Unfixed columns
//! carry no information and are overwritten by [`complete_orthonormal_basis`].

use crate::matrix::{column, try_normalize};
use crate::utils::{dot, norm_max};
use crate::Matrix;

/// Outcome of completing a partial orthonormal set to a full basis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasisCompletion {
    /// Columns filled from a standard basis seed
    pub completed_columns: Vec<usize>,
    /// Columns where every seed was degenerate; the stored vector is a
    /// canonical fallback that may not be orthogonal to the others
    pub fallback_columns: Vec<usize>,
}

impl BasisCompletion {
    /// True when every filled column is genuinely orthonormal
    pub fn is_complete(&self) -> bool {
        self.fallback_columns.is_empty()
    }
}

/// Subtract from `vec` its components along every fixed column (modified Gram–Schmidt)
fn project_out(u: &Matrix, fixed: &[bool], vec: &mut [f64]) {
    let rows = u.shape().0;
    for j in 0..fixed.len() {
        if !fixed[j] {
            continue;
        }
        let mut proj = 0.0;
        for row in 0..rows {
            proj += u[[row, j]] * vec[row];
        }
        for row in 0..rows {
            vec[row] -= proj * u[[row, j]];
        }
    }
}

fn store_column(u: &mut Matrix, j: usize, vec: &[f64]) {
    for (row, &x) in vec.iter().enumerate() {
        u[[row, j]] = x;
    }
}

fn unit_vector(len: usize, at: usize) -> Vec<f64> {
    let mut e = vec![0.0; len];
    e[at] = 1.0;
    e
}

/// Orthonormalize the candidate columns of `u` in index order.
///
/// On entry `fixed[j]` marks columns holding a candidate direction. Each
/// candidate is projected against the candidates already accepted and
/// normalized; a candidate whose remaining norm is below `tolerance` is zeroed
/// and unmarked. Returns the number of columns dropped.
pub fn orthonormalize_columns(u: &mut Matrix, fixed: &mut [bool], tolerance: f64) -> usize {
    let mut accepted = vec![false; fixed.len()];
    let mut dropped = 0;

    for i in 0..fixed.len() {
        if !fixed[i] {
            continue;
        }
        let mut vec = column(u, i);
        project_out(u, &accepted, &mut vec);
        match try_normalize(&mut vec, tolerance) {
            Some(_) => {
                store_column(u, i, &vec);
                accepted[i] = true;
            }
            None => {
                store_column(u, i, &vec![0.0; vec.len()]);
                dropped += 1;
            }
        }
    }

    fixed.copy_from_slice(&accepted);
    dropped
}

/// Fill every unfixed column of the square matrix `u` so that its columns form
/// an orthonormal basis.
///
/// Columns are filled in index order. For column `c` the seeds tried are
/// `e_c, e_0, e_1, …, e_{m−1}`; each seed is projected against all fixed
/// columns twice and accepted once its norm is at least `tolerance`. If every
/// seed is degenerate the column receives `e_c` re-orthogonalized once (or
/// `e_c` itself) and is reported in [`BasisCompletion::fallback_columns`].
pub fn complete_orthonormal_basis(
    u: &mut Matrix,
    fixed: &mut [bool],
    tolerance: f64,
) -> BasisCompletion {
    let m = u.shape().0;
    let mut report = BasisCompletion::default();

    for col in 0..fixed.len() {
        if fixed[col] {
            continue;
        }

        let seeds = std::iter::once(col).chain(0..m).filter(|&seed| seed < m);
        let mut filled = false;
        for seed in seeds {
            let mut vec = unit_vector(m, seed);
            project_out(u, fixed, &mut vec);
            project_out(u, fixed, &mut vec);
            if try_normalize(&mut vec, tolerance).is_some() {
                store_column(u, col, &vec);
                report.completed_columns.push(col);
                filled = true;
                break;
            }
        }

        if !filled {
            let mut vec = unit_vector(m, col.min(m.saturating_sub(1)));
            project_out(u, fixed, &mut vec);
            if try_normalize(&mut vec, tolerance).is_none() {
                vec = unit_vector(m, col.min(m.saturating_sub(1)));
            }
            log::warn!(
                "Basis completion exhausted all {} seeds for column {}; accepting a non-orthogonal fallback",
                m + 1,
                col
            );
            store_column(u, col, &vec);
            report.fallback_columns.push(col);
        }

        fixed[col] = true;
    }

    report
}

/// Largest entry-wise deviation of UᵗU from the identity, ‖UᵗU − I‖_max
pub fn orthogonality_defect(u: &Matrix) -> f64 {
    let cols = u.shape().1;
    let columns: Vec<Vec<f64>> = (0..cols).map(|j| column(u, j)).collect();
    let deviation = Matrix::from_fn([cols, cols], |idx| {
        let expected = if idx[0] == idx[1] { 1.0 } else { 0.0 };
        dot(&columns[idx[0]], &columns[idx[1]]) - expected
    });
    norm_max(&deviation)
}
