//! Symmetric eigen-decomposition of Laplacians

use nalgebra::{DMatrix, SymmetricEigen};
use tracing::{debug, warn};

/// Spectrum of a Hodge Laplacian
#[derive(Debug, Clone)]
pub struct LaplacianSpectrum {
    /// Eigenvalues in ascending order, clamped at 0 from below
    pub eigenvalues: Vec<f64>,
    /// Orthonormal eigenvectors, column i pairs with `eigenvalues[i]`
    pub eigenvectors: DMatrix<f64>,
    /// Relative reconstruction residual `‖LU − UΛ‖_F / max(‖L‖_F, 1)`
    pub residual: f64,
    /// Residual exceeded the tolerance given to [`LaplacianSpectrum::decompose`]
    pub unstable: bool,
}

impl LaplacianSpectrum {
    /// Decompose a symmetric matrix.
    ///
    /// A residual above `residual_tolerance` is logged as a numerical
    /// instability warning; the best-effort eigenpairs are still returned.
    pub fn decompose(matrix: &DMatrix<f64>, residual_tolerance: f64) -> Self {
        let n = matrix.nrows();
        if n == 0 {
            return Self {
                eigenvalues: Vec::new(),
                eigenvectors: DMatrix::zeros(0, 0),
                residual: 0.0,
                unstable: false,
            };
        }

        let eigen = SymmetricEigen::new(matrix.clone());

        // nalgebra doesn't guarantee order
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            eigen.eigenvalues[a]
                .partial_cmp(&eigen.eigenvalues[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let raw: Vec<f64> = order.iter().map(|&i| eigen.eigenvalues[i]).collect();
        let eigenvectors = DMatrix::from_fn(n, n, |r, c| eigen.eigenvectors[(r, order[c])]);

        let mut scaled = eigenvectors.clone();
        for (j, &lambda) in raw.iter().enumerate() {
            scaled.column_mut(j).scale_mut(lambda);
        }
        let residual = (matrix * &eigenvectors - scaled).norm() / matrix.norm().max(1.0);

        let unstable = residual > residual_tolerance;
        if unstable {
            warn!(
                size = n,
                residual,
                tolerance = residual_tolerance,
                "numerical instability in Laplacian eigen-decomposition"
            );
        }

        let min_raw = raw.first().copied().unwrap_or(0.0);
        if min_raw < 0.0 {
            debug!(min_eigenvalue = min_raw, "clamping negative eigenvalues to zero");
        }

        Self {
            eigenvalues: raw.into_iter().map(|l| l.max(0.0)).collect(),
            eigenvectors,
            residual,
            unstable,
        }
    }

    /// Matrix size
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Is empty?
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Number of eigenvalues at most `tolerance`
    pub fn null_space_dim(&self, tolerance: f64) -> usize {
        self.eigenvalues.iter().filter(|&&l| l <= tolerance).count()
    }

    /// Smallest eigenvalue above `tolerance`
    pub fn spectral_gap(&self, tolerance: f64) -> Option<f64> {
        self.eigenvalues.iter().copied().find(|&l| l > tolerance)
    }

    /// Heat operator `U · diag(exp(−τλ)) · Uᵀ`
    pub fn heat_operator(&self, tau: f64) -> DMatrix<f64> {
        let mut weighted = self.eigenvectors.clone();
        for (j, &lambda) in self.eigenvalues.iter().enumerate() {
            weighted.column_mut(j).scale_mut((-tau * lambda).exp());
        }
        weighted * self.eigenvectors.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_node_spectrum() {
        let l = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let s = LaplacianSpectrum::decompose(&l, 1e-8);
        assert_relative_eq!(s.eigenvalues[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.eigenvalues[1], 2.0, epsilon = 1e-12);
        assert_eq!(s.null_space_dim(1e-8), 1);
        assert_relative_eq!(s.spectral_gap(1e-8).unwrap(), 2.0, epsilon = 1e-12);
        assert!(!s.unstable);
        assert!(s.residual < 1e-12);
    }

    #[test]
    fn test_ascending_and_nonnegative() {
        let l = DMatrix::from_row_slice(
            3,
            3,
            &[2.0, -1.0, -1.0, -1.0, 2.0, -1.0, -1.0, -1.0, 2.0],
        );
        let s = LaplacianSpectrum::decompose(&l, 1e-8);
        assert!(s.eigenvalues.windows(2).all(|w| w[0] <= w[1]));
        assert!(s.eigenvalues.iter().all(|&v| v >= 0.0));
        assert_relative_eq!(s.eigenvalues[2], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_heat_operator_at_zero_is_identity() {
        let l = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let s = LaplacianSpectrum::decompose(&l, 1e-8);
        let h = s.heat_operator(0.0);
        assert_relative_eq!(h, DMatrix::identity(2, 2), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_tolerance_flags_instability() {
        let l = DMatrix::from_row_slice(2, 2, &[1.0, 0.3, 0.3, 2.0]);
        let s = LaplacianSpectrum::decompose(&l, -1.0);
        assert!(s.unstable);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_empty() {
        let s = LaplacianSpectrum::decompose(&DMatrix::zeros(0, 0), 1e-8);
        assert!(s.is_empty());
        assert_eq!(s.heat_operator(1.0).nrows(), 0);
    }
}
