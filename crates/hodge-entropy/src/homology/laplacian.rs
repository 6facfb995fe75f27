//! Combinatorial Hodge Laplacians
//!
//! `Lₖ = ∂ₖᵀ∂ₖ + ∂ₖ₊₁∂ₖ₊₁ᵀ`
//!
//! The down-term couples simplices through shared faces, the up-term
//! through shared cofaces. For k = 0 the down-term vanishes and L₀ is the
//! ordinary graph Laplacian `D − A`. The multiplicity of the zero
//! eigenvalue of Lₖ is the k-th Betti number, provided the up-term was
//! included.

use nalgebra::DMatrix;

use super::boundary::BoundaryOperator;
use super::simplex::CliqueComplex;
use crate::error::{HeatError, Result};
use crate::spectral::LaplacianSpectrum;
use crate::utils::asymmetry;

/// Hodge Laplacian of one dimension
#[derive(Debug, Clone)]
pub struct HodgeLaplacian {
    /// Simplex dimension k
    pub dim: usize,
    /// `|Cₖ| × |Cₖ|` symmetric positive semi-definite matrix
    pub matrix: DMatrix<f64>,
}

impl HodgeLaplacian {
    /// Combine ∂ₖ and (optionally) ∂ₖ₊₁.
    ///
    /// A missing `up` operator contributes nothing.
    pub fn from_boundaries(
        k: usize,
        down: &BoundaryOperator,
        up: Option<&BoundaryOperator>,
    ) -> Result<Self> {
        let n = down.ncols();

        let mut matrix = if down.nrows() == 0 {
            DMatrix::zeros(n, n)
        } else {
            down.matrix.tr_mul(&down.matrix)
        };

        if let Some(up) = up {
            if up.nrows() != n {
                return Err(HeatError::invalid_complex(format!(
                    "∂{} has {} rows but dimension {} has {} simplices",
                    k + 1,
                    up.nrows(),
                    k,
                    n
                )));
            }
            if up.ncols() > 0 {
                matrix += &up.matrix * up.matrix.transpose();
            }
        }

        Ok(Self { dim: k, matrix })
    }

    /// Laplacians for dimensions `lo..=hi`.
    ///
    /// With `include_upper == false` the top requested dimension gets no
    /// up-term. With `include_upper == true` ∂ₕᵢ₊₁ is used whenever the
    /// complex was built that far.
    pub fn build_range(
        complex: &CliqueComplex,
        (lo, hi): (usize, usize),
        include_upper: bool,
    ) -> Result<Vec<Self>> {
        if lo > hi {
            return Err(HeatError::invalid_parameter(
                "dimension range",
                format!("({lo}, {hi}) is empty"),
            ));
        }

        let top = if include_upper && complex.max_dim() > hi {
            hi + 1
        } else {
            hi
        };
        let boundaries = BoundaryOperator::build_range(complex, (lo, top))?;

        (lo..=hi)
            .map(|k| {
                let i = k - lo;
                Self::from_boundaries(k, &boundaries[i], boundaries.get(i + 1))
            })
            .collect()
    }

    /// Number of k-simplices
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Is the operator empty (no simplices of this dimension)?
    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    /// Check symmetry within `eps`
    pub fn is_symmetric(&self, eps: f64) -> bool {
        asymmetry(&self.matrix) <= eps
    }

    /// Dimension of the null space, i.e. the Betti number when the
    /// up-term is present
    pub fn betti_number(&self, zero_tolerance: f64) -> usize {
        if self.is_empty() {
            return 0;
        }
        LaplacianSpectrum::decompose(&self.matrix, f64::INFINITY).null_space_dim(zero_tolerance)
    }
}
