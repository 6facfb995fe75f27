//! Spectral heat diffusion on Hodge Laplacians
//!
//! ## Mathematical Background
//!
//! Heat flow on k-simplices obeys `∂f/∂τ = −Lₖ f`, so
//! `f(τ) = exp(−τLₖ) f(0)`. With the eigen-decomposition `Lₖ = UΛUᵀ`
//!
//! ```text
//! exp(−τLₖ) = U · diag(exp(−τλᵢ)) · Uᵀ
//! ```
//!
//! One decomposition serves every diffusion time, and no power series is
//! ever summed. Column j of the operator is the heat profile of a unit
//! source placed on simplex j.

mod eigen;
mod heat;

pub use eigen::LaplacianSpectrum;
pub use heat::{DiffusionConfig, DiffusionSnapshot, HeatDiffusion};
