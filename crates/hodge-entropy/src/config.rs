//! Pipeline configuration
//!
//! All sections deserialize with defaults, so a partial TOML/JSON document
//! only needs the fields it changes.

use serde::{Deserialize, Serialize};

use crate::batch::BatchConfig;
use crate::entropy::EntropyConfig;
use crate::error::{HeatError, Result};
use crate::spectral::{DiffusionConfig, HeatDiffusion};
use crate::utils::log_spaced;

/// Number of default diffusion times
pub const DEFAULT_TIME_COUNT: usize = 20;

/// Smallest default diffusion time
pub const DEFAULT_TIME_MIN: f64 = 0.01;

/// Largest default diffusion time
pub const DEFAULT_TIME_MAX: f64 = 10.0;

/// Configuration for [`SignaturePipeline`](crate::SignaturePipeline)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Diffusion times for the vertex (atom) Laplacian L₀
    pub node_times: Vec<f64>,
    /// Diffusion times for the edge (bond) Laplacian L₁
    pub edge_times: Vec<f64>,
    /// Highest clique dimension enumerated (at least 1)
    pub max_dim: usize,
    /// Add the ∂₂∂₂ᵀ up-term to L₁ (needs `max_dim >= 2`)
    pub include_upper: bool,
    /// Heat diffusion settings
    pub diffusion: DiffusionConfig,
    /// Entropy estimator settings
    pub entropy: EntropyConfig,
    /// Batch driver settings
    pub batch: BatchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let times = default_times();
        Self {
            node_times: times.clone(),
            edge_times: times,
            max_dim: 1,
            include_upper: false,
            diffusion: DiffusionConfig::default(),
            entropy: EntropyConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Use the same times for nodes and edges
    pub fn with_times(mut self, times: Vec<f64>) -> Self {
        self.node_times = times.clone();
        self.edge_times = times;
        self
    }

    /// Set node and edge times separately
    pub fn with_node_edge_times(mut self, node_times: Vec<f64>, edge_times: Vec<f64>) -> Self {
        self.node_times = node_times;
        self.edge_times = edge_times;
        self
    }

    /// Check times and dimensions
    pub fn validate(&self) -> Result<()> {
        HeatDiffusion::validate_times(&self.node_times)?;
        HeatDiffusion::validate_times(&self.edge_times)?;

        if self.max_dim < 1 {
            return Err(HeatError::invalid_parameter(
                "max_dim",
                "must be at least 1 to produce edge descriptors",
            ));
        }
        if self.include_upper && self.max_dim < 2 {
            return Err(HeatError::invalid_parameter(
                "include_upper",
                "requires max_dim >= 2",
            ));
        }
        if !(self.entropy.zero_tolerance >= 0.0) {
            return Err(HeatError::invalid_parameter(
                "entropy.zero_tolerance",
                "must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Default time grid: log-spaced on `[0.01, 10]`
pub fn default_times() -> Vec<f64> {
    log_spaced(DEFAULT_TIME_MIN, DEFAULT_TIME_MAX, DEFAULT_TIME_COUNT)
}
