//! Utility functions for numerical operations

mod numerical;

pub use numerical::*;

/// Small epsilon for numerical stability
pub const EPS: f64 = 1e-10;

/// Default tolerance for symmetry / composition checks on dense operators
pub const MATRIX_TOL: f64 = 1e-9;

/// Default tolerance below which a Laplacian eigenvalue counts as zero
pub const ZERO_EIGEN_TOL: f64 = 1e-8;
