//! Multiscale heat diffusion engine

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::eigen::LaplacianSpectrum;
use crate::error::{HeatError, Result};
use crate::homology::HodgeLaplacian;

/// Tuning parameters for [`HeatDiffusion`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    /// Relative eigen-decomposition residual above which a numerical
    /// instability warning is logged
    pub residual_tolerance: f64,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            residual_tolerance: 1e-8,
        }
    }
}

/// Heat operator `exp(−τL)` at a single diffusion time
#[derive(Debug, Clone)]
pub struct DiffusionSnapshot {
    /// Diffusion time
    pub tau: f64,
    /// Symmetric `n × n` operator; column j is the profile from a unit
    /// source on simplex j
    pub operator: DMatrix<f64>,
}

impl DiffusionSnapshot {
    /// Number of simplices
    pub fn size(&self) -> usize {
        self.operator.nrows()
    }

    /// Sum of row `i`
    pub fn row_sum(&self, i: usize) -> f64 {
        self.operator.row(i).sum()
    }
}

/// Heat diffusion on a Hodge Laplacian at several time scales.
///
/// Stateless: build once, call [`transform`](HeatDiffusion::transform)
/// for every Laplacian.
#[derive(Debug, Clone, Default)]
pub struct HeatDiffusion {
    /// Configuration
    pub config: DiffusionConfig,
}

impl HeatDiffusion {
    /// Create an engine
    pub fn new(config: DiffusionConfig) -> Self {
        Self { config }
    }

    /// Reject negative or non-finite diffusion times
    pub fn validate_times(taus: &[f64]) -> Result<()> {
        match taus.iter().find(|t| !t.is_finite() || **t < 0.0) {
            Some(&tau) => Err(HeatError::InvalidDiffusionTime { tau }),
            None => Ok(()),
        }
    }

    /// Evaluate `exp(−τL)` for every τ in `taus`.
    ///
    /// The Laplacian is decomposed once and reused for all times; output
    /// order follows `taus`, which need not be sorted. An empty Laplacian
    /// yields an empty result.
    pub fn transform(&self, laplacian: &HodgeLaplacian, taus: &[f64]) -> Result<Vec<DiffusionSnapshot>> {
        Self::validate_times(taus)?;

        if laplacian.is_empty() || taus.is_empty() {
            return Ok(Vec::new());
        }

        let spectrum = LaplacianSpectrum::decompose(&laplacian.matrix, self.config.residual_tolerance);
        debug!(
            dim = laplacian.dim,
            size = spectrum.len(),
            residual = spectrum.residual,
            times = taus.len(),
            "heat diffusion"
        );

        Ok(taus
            .iter()
            .map(|&tau| DiffusionSnapshot {
                tau,
                operator: spectrum.heat_operator(tau),
            })
            .collect())
    }
}
