//! Entropy signatures of heat diffusion
//!
//! For simplex i and time τ the i-th row of `exp(−τLₖ)` is clipped at zero,
//! normalised into a distribution and summarised by its Shannon entropy.
//! Low entropy means heat is still concentrated near the source; high
//! entropy means it has spread over the simplex's neighbourhood.
//!
//! The heat operator of a symmetric Laplacian is symmetric, so row and
//! column readings agree; [`Orientation`] fixes which one is used.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{HeatError, Result};
use crate::spectral::DiffusionSnapshot;
use crate::utils::{shannon_entropy, LogBase};

/// Which slice of the diffusion operator describes a simplex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Row i: heat received by every simplex, weighted as seen from i
    #[default]
    Row,
    /// Column i: heat spread from a unit source on i
    Column,
}

/// Configuration for [`EntropyExtractor`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    /// Row or column reading
    pub orientation: Orientation,
    /// Logarithm base of the entropy
    pub log_base: LogBase,
    /// Clipped mass at or below this fraction of the slice's largest
    /// magnitude is a degenerate distribution
    pub zero_tolerance: f64,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Row,
            log_base: LogBase::Natural,
            zero_tolerance: 1e-12,
        }
    }
}

/// Entropy values of one simplex dimension, oriented `times × simplices`
#[derive(Debug, Clone, PartialEq)]
pub struct EntropySignature {
    /// Simplex dimension (0 = atoms, 1 = bonds)
    pub dimension: usize,
    /// Diffusion times, one per row
    pub times: Vec<f64>,
    /// Row t, column s: entropy of simplex s at `times[t]`
    pub values: DMatrix<f64>,
}

impl EntropySignature {
    /// Signature for a dimension without simplices or without times
    pub fn empty(dimension: usize, times: Vec<f64>, simplices: usize) -> Self {
        debug_assert!(times.is_empty() || simplices == 0);
        let values = DMatrix::zeros(times.len(), simplices);
        Self {
            dimension,
            times,
            values,
        }
    }

    /// Number of diffusion times
    pub fn n_times(&self) -> usize {
        self.values.nrows()
    }

    /// Number of simplices
    pub fn n_simplices(&self) -> usize {
        self.values.ncols()
    }

    /// Entropy at time index `t` for simplex `s`
    pub fn at(&self, t: usize, s: usize) -> f64 {
        self.values[(t, s)]
    }

    /// Entropy-vs-time curve of one simplex
    pub fn curve(&self, simplex: usize) -> Vec<f64> {
        self.values.column(simplex).iter().copied().collect()
    }

    /// Values as nested rows (one per time)
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values
            .row_iter()
            .map(|r| r.iter().copied().collect())
            .collect()
    }
}

impl Serialize for EntropySignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            dimension: usize,
            times: &'a [f64],
            values: Vec<Vec<f64>>,
        }

        Repr {
            dimension: self.dimension,
            times: &self.times,
            values: self.rows(),
        }
        .serialize(serializer)
    }
}

/// Converts diffusion snapshots into entropy signatures
#[derive(Debug, Clone, Default)]
pub struct EntropyExtractor {
    /// Configuration
    pub config: EntropyConfig,
}

impl EntropyExtractor {
    /// Create an extractor
    pub fn new(config: EntropyConfig) -> Self {
        Self { config }
    }

    /// Entropy of every simplex at every snapshot.
    ///
    /// Fails with [`HeatError::DegenerateDistribution`] when a slice has
    /// no positive mass; undefined entropy is never reported as zero.
    pub fn extract(&self, dimension: usize, snapshots: &[DiffusionSnapshot]) -> Result<EntropySignature> {
        let n = snapshots.first().map_or(0, DiffusionSnapshot::size);
        let mut values = DMatrix::zeros(snapshots.len(), n);
        let mut slice = vec![0.0; n];

        for (t, snap) in snapshots.iter().enumerate() {
            if snap.size() != n {
                return Err(HeatError::invalid_parameter(
                    "snapshots",
                    format!("size {} differs from {}", snap.size(), n),
                ));
            }
            for s in 0..n {
                for (k, v) in slice.iter_mut().enumerate() {
                    *v = match self.config.orientation {
                        Orientation::Row => snap.operator[(s, k)],
                        Orientation::Column => snap.operator[(k, s)],
                    };
                }
                values[(t, s)] = shannon_entropy(&slice, self.config.log_base, self.config.zero_tolerance)
                    .ok_or(HeatError::DegenerateDistribution {
                        dimension,
                        simplex: s,
                        tau: snap.tau,
                    })?;
            }
        }

        Ok(EntropySignature {
            dimension,
            times: snapshots.iter().map(|s| s.tau).collect(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::homology::{CliqueComplex, HodgeLaplacian};
    use crate::spectral::HeatDiffusion;
    use approx::assert_relative_eq;

    fn snapshots(n: usize, edges: &[(usize, usize)], dim: usize, taus: &[f64]) -> Vec<DiffusionSnapshot> {
        let c = CliqueComplex::from_edges(n, edges, 1).unwrap();
        let laps = HodgeLaplacian::build_range(&c, (0, 1), false).unwrap();
        HeatDiffusion::default().transform(&laps[dim], taus).unwrap()
    }

    #[test]
    fn test_zero_time_is_point_mass() {
        let snaps = snapshots(3, &[(0, 1), (1, 2)], 0, &[0.0]);
        let sig = EntropyExtractor::default().extract(0, &snaps).unwrap();
        for s in 0..3 {
            assert_relative_eq!(sig.at(0, s), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_single_bond_rises_to_ln2() {
        let taus = [0.0, 0.1, 0.5, 1.0, 2.0, 10.0];
        let snaps = snapshots(2, &[(0, 1)], 0, &taus);
        let sig = EntropyExtractor::default().extract(0, &snaps).unwrap();
        assert_eq!((sig.n_times(), sig.n_simplices()), (6, 2));

        for s in 0..2 {
            let curve = sig.curve(s);
            assert!(curve.windows(2).all(|w| w[0] < w[1] + 1e-12));
            assert_relative_eq!(curve[5], 2f64.ln(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_edges_stay_defined_at_long_times() {
        // Neither graph has a cycle, so L₁ is invertible and heat decays
        let taus = [14.0, 50.0, 200.0];
        let single = EntropyExtractor::default()
            .extract(1, &snapshots(2, &[(0, 1)], 1, &taus))
            .unwrap();
        for t in 0..taus.len() {
            assert!(single.at(t, 0).is_finite());
            assert_relative_eq!(single.at(t, 0), 0.0, epsilon = 1e-12);
        }

        let chain = EntropyExtractor::default()
            .extract(1, &snapshots(3, &[(0, 1), (1, 2)], 1, &taus))
            .unwrap();
        for t in 0..taus.len() {
            for s in 0..2 {
                let h = chain.at(t, s);
                assert!(h.is_finite() && h >= 0.0);
                assert_relative_eq!(h, 2f64.ln(), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_rows_and_columns_agree() {
        let edges = [(0, 1), (1, 2), (2, 0), (2, 3)];
        let snaps = snapshots(4, &edges, 1, &[0.2, 1.5]);
        let row = EntropyExtractor::default().extract(1, &snaps).unwrap();
        let col = EntropyExtractor::new(EntropyConfig {
            orientation: Orientation::Column,
            ..Default::default()
        })
        .extract(1, &snaps)
        .unwrap();
        assert_relative_eq!(row.values, col.values, epsilon = 1e-10);
    }

    #[test]
    fn test_bits_scale() {
        let snaps = snapshots(2, &[(0, 1)], 0, &[50.0]);
        let bits = EntropyExtractor::new(EntropyConfig {
            log_base: LogBase::Bits,
            ..Default::default()
        })
        .extract(0, &snaps)
        .unwrap();
        assert_relative_eq!(bits.at(0, 0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_distribution_propagates() {
        let snap = DiffusionSnapshot {
            tau: 0.0,
            operator: DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1e-20]),
        };
        let err = EntropyExtractor::default().extract(1, &[snap]).unwrap_err();
        assert_eq!(
            err,
            HeatError::DegenerateDistribution {
                dimension: 1,
                simplex: 1,
                tau: 0.0
            }
        );
    }

    #[test]
    fn test_serialize_rows() {
        let snaps = snapshots(2, &[(0, 1)], 0, &[0.0, 1.0]);
        let sig = EntropyExtractor::default().extract(0, &snaps).unwrap();
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["values"].as_array().unwrap().len(), 2);
        assert_eq!(json["values"][0].as_array().unwrap().len(), 2);
        assert_eq!(json["times"][1], 1.0);
    }
}
