//! Numerical utility functions

use nalgebra::DMatrix;

/// Logarithm base used by entropy estimators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogBase {
    /// Natural logarithm (nats)
    #[default]
    Natural,
    /// Base-2 logarithm (bits)
    Bits,
}

impl LogBase {
    /// Logarithm of `x` in this base
    #[inline]
    pub fn log(self, x: f64) -> f64 {
        match self {
            LogBase::Natural => x.ln(),
            LogBase::Bits => x.log2(),
        }
    }
}

/// Shannon entropy `−Σ pᵢ log pᵢ` of a non-negative weight vector.
///
/// Negative entries are clipped to zero and the remainder renormalised.
/// Returns `None` when the clipped weights sum to at most `tolerance`
/// times the largest absolute weight, i.e. when only rounding noise is
/// left. The scale of the weights does not matter. `0·log 0` is taken as 0.
pub fn shannon_entropy(weights: &[f64], base: LogBase, tolerance: f64) -> Option<f64> {
    let total: f64 = weights.iter().map(|&w| w.max(0.0)).sum();
    let scale = weights.iter().fold(0.0f64, |acc, &w| acc.max(w.abs()));
    if !(total > 0.0 && total > tolerance * scale) {
        return None;
    }

    let h = weights
        .iter()
        .map(|&w| w.max(0.0) / total)
        .filter(|&p| p > 0.0)
        .map(|p| -p * base.log(p))
        .sum::<f64>();

    // Rounding can leave a point mass at -0.0 or a hair below zero.
    Some(h.max(0.0))
}

/// `count` logarithmically spaced values on `[start, end]` (inclusive).
///
/// Both bounds must be positive. With `count == 1` returns `[start]`.
pub fn log_spaced(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let (lo, hi) = (start.ln(), end.ln());
            let step = (hi - lo) / (count - 1) as f64;
            (0..count).map(|i| (lo + step * i as f64).exp()).collect()
        }
    }
}

/// Largest absolute entry of `m - mᵀ`
pub fn asymmetry(m: &DMatrix<f64>) -> f64 {
    if m.nrows() != m.ncols() {
        return f64::INFINITY;
    }
    let n = m.nrows();
    let mut worst = 0.0f64;
    for i in 0..n {
        for j in (i + 1)..n {
            worst = worst.max((m[(i, j)] - m[(j, i)]).abs());
        }
    }
    worst
}

/// Largest absolute entry of a matrix (0 for an empty matrix)
pub fn max_abs(m: &DMatrix<f64>) -> f64 {
    m.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::EPS;

    #[test]
    fn test_entropy_point_mass() {
        let h = shannon_entropy(&[0.0, 3.0, 0.0], LogBase::Natural, EPS).unwrap();
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_entropy_uniform() {
        let h = shannon_entropy(&[1.0; 4], LogBase::Natural, EPS).unwrap();
        assert!((h - 4f64.ln()).abs() < 1e-12);

        let bits = shannon_entropy(&[1.0; 4], LogBase::Bits, EPS).unwrap();
        assert!((bits - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_clips_negative_noise() {
        let h = shannon_entropy(&[0.5, 0.5, -1e-17], LogBase::Natural, EPS).unwrap();
        assert!((h - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_degenerate() {
        assert!(shannon_entropy(&[0.0, -0.1], LogBase::Natural, EPS).is_none());
        assert!(shannon_entropy(&[], LogBase::Natural, EPS).is_none());
        // Positive residue swamped by a large negative entry
        assert!(shannon_entropy(&[1e-20, -1.0], LogBase::Natural, EPS).is_none());
    }

    #[test]
    fn test_entropy_ignores_scale() {
        let h = shannon_entropy(&[1e-170, 1e-170], LogBase::Natural, EPS).unwrap();
        assert!((h - 2f64.ln()).abs() < 1e-12);
        let h = shannon_entropy(&[1e-30], LogBase::Natural, EPS).unwrap();
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_log_spaced() {
        let t = log_spaced(0.01, 10.0, 4);
        assert_eq!(t.len(), 4);
        assert!((t[0] - 0.01).abs() < 1e-12);
        assert!((t[3] - 10.0).abs() < 1e-9);
        assert!((t[1] - 0.1).abs() < 1e-12);
        assert!(log_spaced(1.0, 2.0, 0).is_empty());
        assert_eq!(log_spaced(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_asymmetry() {
        let sym = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        assert_eq!(asymmetry(&sym), 0.0);
        let skew = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 0.5, 1.0]);
        assert!((asymmetry(&skew) - 1.5).abs() < 1e-12);
    }
}
