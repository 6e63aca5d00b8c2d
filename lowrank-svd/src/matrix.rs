//! Dense matrix primitives
//!
//! Multiplication, transposition, the Frobenius norm and vector normalization,
//! plus the constructors the rest of the pipeline needs. All results are
//! freshly allocated; inputs are never modified except by [`normalize`].

use crate::error::LinalgError;
use crate::utils::norm_2;
use crate::Matrix;

/// Zero matrix of shape m × n
pub fn zeros(m: usize, n: usize) -> Matrix {
    Matrix::from_elem([m, n], 0.0)
}

/// n × n identity matrix
pub fn identity(n: usize) -> Matrix {
    Matrix::from_fn([n, n], |idx| if idx[0] == idx[1] { 1.0 } else { 0.0 })
}

/// Build an m × n matrix from a row-major slice
pub fn from_row_major(m: usize, n: usize, data: &[f64]) -> Result<Matrix, LinalgError> {
    if data.len() != m * n {
        return Err(LinalgError::BufferSize {
            expected: m * n,
            actual: data.len(),
        });
    }
    Ok(Matrix::from_fn([m, n], |idx| data[idx[0] * n + idx[1]]))
}

/// Flatten a matrix into a row-major vector
pub fn to_row_major(a: &Matrix) -> Vec<f64> {
    let (m, n) = *a.shape();
    let mut out = Vec::with_capacity(m * n);
    for i in 0..m {
        for j in 0..n {
            out.push(a[[i, j]]);
        }
    }
    out
}

/// Copy column `j` out of a matrix
pub fn column(a: &Matrix, j: usize) -> Vec<f64> {
    let m = a.shape().0;
    (0..m).map(|i| a[[i, j]]).collect()
}

/// Matrix product C = A · B
///
/// Fails with [`LinalgError::DimensionMismatch`] when the inner extents differ.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    let (m1, n1) = *a.shape();
    let (m2, n2) = *b.shape();
    if n1 != m2 {
        return Err(LinalgError::DimensionMismatch {
            lhs: (m1, n1),
            rhs: (m2, n2),
        });
    }

    let mut c = zeros(m1, n2);
    for i in 0..m1 {
        for k in 0..n1 {
            let aik = a[[i, k]];
            for j in 0..n2 {
                c[[i, j]] += aik * b[[k, j]];
            }
        }
    }
    Ok(c)
}

/// Transpose Aᵗ
pub fn transpose(a: &Matrix) -> Matrix {
    let (m, n) = *a.shape();
    Matrix::from_fn([n, m], |idx| a[[idx[1], idx[0]]])
}

/// Element-wise difference A − B
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    let a_shape = *a.shape();
    let b_shape = *b.shape();
    if a_shape != b_shape {
        return Err(LinalgError::DimensionMismatch {
            lhs: a_shape,
            rhs: b_shape,
        });
    }
    Ok(Matrix::from_fn([a_shape.0, a_shape.1], |idx| {
        a[[idx[0], idx[1]]] - b[[idx[0], idx[1]]]
    }))
}

/// Frobenius norm sqrt(Σ A[i][j]²)
pub fn frobenius_norm(a: &Matrix) -> f64 {
    let (m, n) = *a.shape();
    let mut sum = 0.0;
    for i in 0..m {
        for j in 0..n {
            let val = a[[i, j]];
            sum += val * val;
        }
    }
    sum.sqrt()
}

/// Divide every component of `v` by its Euclidean norm, in place.
///
/// A zero vector has no direction: every component becomes NaN. Use
/// [`try_normalize`] when the input may be degenerate.
pub fn normalize(v: &mut [f64]) {
    let norm = norm_2(v);
    for x in v.iter_mut() {
        *x /= norm;
    }
}

/// Normalize `v` unless its norm is below `tolerance`.
///
/// Returns the norm that was divided out, or `None` (leaving `v` untouched)
/// for a degenerate vector.
pub fn try_normalize(v: &mut [f64], tolerance: f64) -> Option<f64> {
    let norm = norm_2(v);
    if !(norm >= tolerance) {
        return None;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    Some(norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mat(rows: &[&[f64]]) -> Matrix {
        let m = rows.len();
        let n = rows[0].len();
        Matrix::from_fn([m, n], |idx| rows[idx[0]][idx[1]])
    }

    #[test]
    fn test_multiply_2x3_by_3x2() {
        let a = mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = mat(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
        let c = multiply(&a, &b).unwrap();

        assert_eq!(*c.shape(), (2, 2));
        assert_abs_diff_eq!(c[[0, 0]], 58.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[[0, 1]], 64.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[[1, 0]], 139.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[[1, 1]], 154.0, epsilon = 1e-12);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = zeros(2, 3);
        let b = zeros(2, 3);
        let err = multiply(&a, &b).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch {
                lhs: (2, 3),
                rhs: (2, 3)
            }
        );
    }

    #[test]
    fn test_transpose() {
        let a = mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let t = transpose(&a);
        assert_eq!(*t.shape(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t[[j, i]], a[[i, j]]);
            }
        }
    }

    #[test]
    fn test_frobenius_norm() {
        let a = mat(&[&[3.0, 4.0], &[0.0, 5.0]]);
        assert_abs_diff_eq!(frobenius_norm(&a), 50.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(frobenius_norm(&zeros(3, 2)), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = vec![3.0, 4.0, 0.0];
        normalize(&mut v);
        assert_abs_diff_eq!(v[0], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(v[1], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(v[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector_is_nan() {
        let mut v = vec![0.0; 3];
        normalize(&mut v);
        assert!(v.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_try_normalize_degenerate() {
        let mut v = vec![1e-14, 0.0];
        assert_eq!(try_normalize(&mut v, 1e-12), None);
        assert_eq!(v, vec![1e-14, 0.0]);

        let mut w = vec![0.0, 2.0];
        assert_eq!(try_normalize(&mut w, 1e-12), Some(2.0));
        assert_eq!(w, vec![0.0, 1.0]);
    }

    #[test]
    fn test_row_major_round_trip() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let a = from_row_major(2, 3, &data).unwrap();
        assert_eq!(a[[1, 0]], 4.0);
        assert_eq!(to_row_major(&a), data.to_vec());
        assert_eq!(column(&a, 2), vec![3.0, 6.0]);

        assert_eq!(
            from_row_major(2, 2, &data).unwrap_err(),
            LinalgError::BufferSize {
                expected: 4,
                actual: 6
            }
        );
    }

    #[test]
    fn test_subtract_shape_mismatch() {
        let a = identity(2);
        let b = zeros(2, 3);
        assert!(matches!(
            subtract(&a, &b),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        let d = subtract(&a, &a).unwrap();
        assert_eq!(frobenius_norm(&d), 0.0);
    }
}
