//! Vector and matrix norm computations

use crate::Matrix;

/// Compute the 2-norm (Euclidean norm) of a vector
pub fn norm_2(vec: &[f64]) -> f64 {
    dot(vec, vec).sqrt()
}

/// Inner product of two equally long vectors
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}

/// Compute the maximum absolute value in a matrix
///
/// Any NaN entry makes the result NaN.
pub fn norm_max(mat: &Matrix) -> f64 {
    let (m, n) = *mat.shape();
    let mut max_val = 0.0_f64;
    for i in 0..m {
        for j in 0..n {
            let abs_val = mat[[i, j]].abs();
            if abs_val.is_nan() {
                return f64::NAN;
            }
            if abs_val > max_val {
                max_val = abs_val;
            }
        }
    }
    max_val
}
