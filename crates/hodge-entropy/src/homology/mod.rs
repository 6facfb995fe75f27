//! Clique complexes, boundary operators and Hodge Laplacians
//!
//! ## Mathematical Background
//!
//! A graph G induces the clique (flag) complex K(G): every set of k+1
//! mutually bonded atoms is a k-simplex. Oriented by increasing vertex
//! index, the boundary maps
//!
//! ```text
//! ... → C₂ —∂₂→ C₁ —∂₁→ C₀ —∂₀→ 0
//! ```
//!
//! satisfy ∂ₖ₋₁∂ₖ = 0, and `Lₖ = ∂ₖᵀ∂ₖ + ∂ₖ₊₁∂ₖ₊₁ᵀ` is the k-th Hodge
//! Laplacian. dim ker Lₖ = βₖ (the k-th Betti number).

mod boundary;
mod laplacian;
mod simplex;

pub use boundary::BoundaryOperator;
pub use laplacian::HodgeLaplacian;
pub use simplex::{CliqueComplex, Simplex, SimplexIndex};

use crate::error::Result;

/// Betti numbers β₀ … β_{max_dim − 1} of a complex.
///
/// The top built dimension is excluded because its Laplacian lacks the
/// up-term; build the complex one dimension higher than needed.
pub fn betti_numbers(complex: &CliqueComplex, zero_tolerance: f64) -> Result<Vec<usize>> {
    if complex.max_dim() == 0 {
        let l0 = HodgeLaplacian::build_range(complex, (0, 0), false)?;
        return Ok(vec![l0[0].betti_number(zero_tolerance)]);
    }

    let laplacians = HodgeLaplacian::build_range(complex, (0, complex.max_dim() - 1), true)?;
    Ok(laplacians
        .iter()
        .map(|l| l.betti_number(zero_tolerance))
        .collect())
}
