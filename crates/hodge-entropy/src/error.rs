//! Error types for hodge-entropy

use thiserror::Error;

/// Result type alias for hodge-entropy operations
pub type Result<T> = std::result::Result<T, HeatError>;

/// Errors that can occur while building descriptors for a molecule
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatError {
    /// Molecule has no atoms, so no complex can be built
    #[error("Empty graph: molecule has no atoms")]
    EmptyGraph,

    /// Bond-type code outside the one-hot range {1, 2, 3, 12}
    #[error("Unsupported bond code: {0}")]
    UnsupportedBondCode(u32),

    /// A simplex's diffusion row sums to zero after clipping
    #[error("Degenerate distribution at simplex {simplex} (dim {dimension}, tau {tau})")]
    DegenerateDistribution {
        /// Simplex dimension
        dimension: usize,
        /// Index of the simplex within its dimension
        simplex: usize,
        /// Diffusion time of the snapshot
        tau: f64,
    },

    /// Diffusion time is negative or not finite
    #[error("Invalid diffusion time: {tau}")]
    InvalidDiffusionTime {
        /// Offending value
        tau: f64,
    },

    /// Attributed graph violates its structural invariants
    #[error("Invalid graph: {reason}")]
    InvalidGraph {
        /// What was wrong
        reason: String,
    },

    /// Complex is not downward closed or otherwise malformed
    #[error("Invalid complex: {reason}")]
    InvalidComplex {
        /// What was wrong
        reason: String,
    },

    /// Requested simplex dimension exceeds what the complex was built with
    #[error("Dimension {requested} unavailable (complex built up to {max})")]
    DimensionUnavailable {
        /// Requested dimension
        requested: usize,
        /// Highest dimension in the complex
        max: usize,
    },

    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Failure while processing one molecule of a batch
    #[error("Molecule {index}: {source}")]
    Molecule {
        /// Molecule index in the batch
        index: usize,
        /// Underlying error
        #[source]
        source: Box<HeatError>,
    },
}

impl HeatError {
    /// Create an invalid graph error
    pub fn invalid_graph(reason: impl Into<String>) -> Self {
        Self::InvalidGraph {
            reason: reason.into(),
        }
    }

    /// Create an invalid complex error
    pub fn invalid_complex(reason: impl Into<String>) -> Self {
        Self::InvalidComplex {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an error with the batch index of the molecule that produced it
    pub fn in_molecule(self, index: usize) -> Self {
        Self::Molecule {
            index,
            source: Box::new(self),
        }
    }

    /// True for errors caused by malformed input molecules.
    ///
    /// Only these may be skipped by the batch driver; numerical errors
    /// always propagate.
    pub fn is_malformed_molecule(&self) -> bool {
        match self {
            Self::EmptyGraph | Self::UnsupportedBondCode(_) | Self::InvalidGraph { .. } => true,
            Self::Molecule { source, .. } => source.is_malformed_molecule(),
            _ => false,
        }
    }
}
