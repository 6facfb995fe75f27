//! Signed boundary operators ∂ₖ: Cₖ → Cₖ₋₁
//!
//! Rows index (k−1)-simplices, columns index k-simplices, both in the
//! complex's canonical order. ∂₀ is the zero map (vertices have no faces)
//! and is represented with shape `0 × |C₀|`.

use nalgebra::DMatrix;

use super::simplex::CliqueComplex;
use crate::error::{HeatError, Result};
use crate::utils::max_abs;

/// Boundary matrix of one dimension
#[derive(Debug, Clone)]
pub struct BoundaryOperator {
    /// Dimension k of the source simplices
    pub dim: usize,
    /// `|Cₖ₋₁| × |Cₖ|` matrix with entries in {−1, 0, 1}
    pub matrix: DMatrix<f64>,
}

impl BoundaryOperator {
    /// Build ∂ₖ for a complex.
    ///
    /// Runs in O(|Cₖ|·(k+1)) lookups against the (k−1) index map.
    pub fn build(complex: &CliqueComplex, k: usize) -> Result<Self> {
        let cols = complex.simplices(k)?;

        if k == 0 {
            return Ok(Self {
                dim: 0,
                matrix: DMatrix::zeros(0, cols.len()),
            });
        }

        let face_index = complex.index(k - 1)?;
        let mut matrix = DMatrix::zeros(face_index.len(), cols.len());

        for (j, simplex) in cols.iter().enumerate() {
            for (face, sign) in simplex.boundary() {
                let i = face_index.get(face.vertices()).ok_or_else(|| {
                    HeatError::invalid_complex(format!(
                        "face {:?} of {:?} missing from dimension {}",
                        face.vertices(),
                        simplex.vertices(),
                        k - 1
                    ))
                })?;
                matrix[(i, j)] = sign;
            }
        }

        Ok(Self { dim: k, matrix })
    }

    /// Build ∂ₖ for every k in `lo..=hi`, in order
    pub fn build_range(complex: &CliqueComplex, (lo, hi): (usize, usize)) -> Result<Vec<Self>> {
        (lo..=hi).map(|k| Self::build(complex, k)).collect()
    }

    /// Number of (k−1)-simplices
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of k-simplices
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Check ∂ₖ₋₁ ∘ ∂ₖ = 0 within `eps`.
    ///
    /// `lower` must be ∂ₖ₋₁ and `upper` ∂ₖ. Incompatible shapes return
    /// false; compositions through an empty dimension are trivially zero.
    pub fn compose_is_zero(lower: &Self, upper: &Self, eps: f64) -> bool {
        if lower.ncols() != upper.nrows() {
            return false;
        }
        if lower.nrows() == 0 || upper.ncols() == 0 {
            return true;
        }
        max_abs(&(&lower.matrix * &upper.matrix)) <= eps
    }
}
