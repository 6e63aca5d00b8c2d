//! Norms and result validation

pub mod norms;
pub mod validation;

pub use norms::{dot, norm_2, norm_max};
pub use validation::{is_orthonormal, reconstruction_error, singular_values_valid, validate_svd};
