//! Batch driver over many molecules
//!
//! Every accepted molecule gets a contiguous slice of a global node index
//! space and of a global edge index space, in molecule order, so a
//! downstream dataset can concatenate all node (edge) features into one
//! table. Skipped molecules occupy no range.
//!
//! State lives in an explicit [`BatchAccumulator`] owned by the caller.

use serde::{Deserialize, Serialize, Serializer};
use tracing::{info, warn};

use crate::error::{HeatError, Result};
use crate::molecule::AttributedGraph;
use crate::pipeline::{MoleculeSignature, SignaturePipeline};

/// What to do when a molecule is malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Record the molecule as skipped and continue
    Skip,
    /// Stop the batch with the molecule's error
    #[default]
    Abort,
}

/// Configuration for [`BatchDriver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Log progress every this many molecules (0 disables)
    pub progress_interval: usize,
    /// Handling of malformed molecules
    pub error_policy: ErrorPolicy,
    /// Process molecules on the rayon pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            progress_interval: 1000,
            error_policy: ErrorPolicy::Abort,
            parallel: false,
        }
    }
}

/// Half-open range `[start, end)` in a global index space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    /// First index
    pub start: usize,
    /// One past the last index
    pub end: usize,
}

impl IndexRange {
    /// Range of `len` indices starting at `start`
    pub fn with_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Is the range empty?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift both ends by `offset`
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Descriptors of one accepted molecule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeRecord {
    /// Molecule index in the input
    pub molecule: usize,
    /// Global atom indices
    pub node_range: IndexRange,
    /// Global bond indices
    pub edge_range: IndexRange,
    /// Entropy signatures
    pub signature: MoleculeSignature,
}

/// A molecule rejected under [`ErrorPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMolecule {
    /// Molecule index in the input
    pub molecule: usize,
    /// Why it was rejected
    #[serde(serialize_with = "serialize_display")]
    pub error: HeatError,
}

fn serialize_display<S: Serializer>(error: &HeatError, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Results of a batch so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchAccumulator {
    /// Accepted molecules, in molecule order
    pub records: Vec<MoleculeRecord>,
    /// Skipped molecules, in molecule order
    pub skipped: Vec<SkippedMolecule>,
    /// Next free global node index
    pub node_offset: usize,
    /// Next free global edge index
    pub edge_offset: usize,
    /// Molecules seen, accepted or skipped
    pub processed: usize,
}

impl BatchAccumulator {
    /// Empty accumulator starting at global index 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted molecule and assign its ranges
    pub fn push(&mut self, molecule: usize, signature: MoleculeSignature) -> &MoleculeRecord {
        let node_range = IndexRange::with_len(self.node_offset, signature.atom_count());
        let edge_range = IndexRange::with_len(self.edge_offset, signature.bond_count());
        self.node_offset = node_range.end;
        self.edge_offset = edge_range.end;
        self.processed += 1;
        self.records.push(MoleculeRecord {
            molecule,
            node_range,
            edge_range,
            signature,
        });
        &self.records[self.records.len() - 1]
    }

    /// Record a skipped molecule
    pub fn skip(&mut self, molecule: usize, error: HeatError) {
        self.processed += 1;
        self.skipped.push(SkippedMolecule { molecule, error });
    }

    /// Append `other`, shifting its ranges past the ones already assigned
    pub fn merge(&mut self, other: BatchAccumulator) {
        let (node_shift, edge_shift) = (self.node_offset, self.edge_offset);
        self.records.extend(other.records.into_iter().map(|mut r| {
            r.node_range = r.node_range.shifted(node_shift);
            r.edge_range = r.edge_range.shifted(edge_shift);
            r
        }));
        self.skipped.extend(other.skipped);
        self.node_offset += other.node_offset;
        self.edge_offset += other.edge_offset;
        self.processed += other.processed;
    }

    /// Total atoms across accepted molecules
    pub fn node_total(&self) -> usize {
        self.node_offset
    }

    /// Total bonds across accepted molecules
    pub fn edge_total(&self) -> usize {
        self.edge_offset
    }
}

/// Drives a [`SignaturePipeline`] over a sequence of molecules
#[derive(Debug, Clone)]
pub struct BatchDriver {
    pipeline: SignaturePipeline,
    config: BatchConfig,
}

impl BatchDriver {
    /// Create a driver
    pub fn new(pipeline: SignaturePipeline, config: BatchConfig) -> Self {
        Self { pipeline, config }
    }

    /// Driver using the batch section of the pipeline's own configuration
    pub fn from_pipeline(pipeline: SignaturePipeline) -> Self {
        let config = pipeline.config().batch.clone();
        Self::new(pipeline, config)
    }

    /// Active configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process molecule `index` into `acc`.
    ///
    /// Under [`ErrorPolicy::Skip`] malformed molecules are recorded and
    /// `Ok` is returned; any other failure comes back wrapped in
    /// [`HeatError::Molecule`].
    pub fn process_one(&self, acc: &mut BatchAccumulator, index: usize, graph: &AttributedGraph) -> Result<()> {
        self.record(acc, index, self.pipeline.compute(graph))?;
        self.log_progress(acc.processed, None);
        Ok(())
    }

    fn record(&self, acc: &mut BatchAccumulator, index: usize, result: Result<MoleculeSignature>) -> Result<()> {
        match result {
            Ok(signature) => {
                acc.push(index, signature);
                Ok(())
            }
            Err(err) if self.config.error_policy == ErrorPolicy::Skip && err.is_malformed_molecule() => {
                warn!(molecule = index, error = %err, "skipping molecule");
                acc.skip(index, err);
                Ok(())
            }
            Err(err) => Err(err.in_molecule(index)),
        }
    }

    fn log_progress(&self, processed: usize, total: Option<usize>) {
        let every = self.config.progress_interval;
        if every > 0 && processed > 0 && processed % every == 0 {
            match total {
                Some(total) => info!(processed, total, "batch progress"),
                None => info!(processed, "batch progress"),
            }
        }
    }

    /// Process every molecule; molecule `i` gets batch index `i`
    pub fn run(&self, graphs: &[AttributedGraph]) -> Result<BatchAccumulator> {
        self.run_from(graphs, 0)
    }

    /// Process every molecule, labelling molecule `i` as `first_index + i`.
    ///
    /// Parallel and sequential runs produce identical accumulators.
    pub fn run_from(&self, graphs: &[AttributedGraph], first_index: usize) -> Result<BatchAccumulator> {
        info!(
            molecules = graphs.len(),
            first_index,
            parallel = self.config.parallel,
            "starting batch"
        );

        let acc = if self.config.parallel {
            self.run_parallel(graphs, first_index)?
        } else {
            self.run_sequential(graphs, first_index)?
        };

        info!(
            accepted = acc.records.len(),
            skipped = acc.skipped.len(),
            nodes = acc.node_total(),
            edges = acc.edge_total(),
            "batch finished"
        );
        Ok(acc)
    }

    fn run_sequential(&self, graphs: &[AttributedGraph], first_index: usize) -> Result<BatchAccumulator> {
        let mut acc = BatchAccumulator::new();
        for (i, graph) in graphs.iter().enumerate() {
            self.record(&mut acc, first_index + i, self.pipeline.compute(graph))?;
            self.log_progress(acc.processed, Some(graphs.len()));
        }
        Ok(acc)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, graphs: &[AttributedGraph], first_index: usize) -> Result<BatchAccumulator> {
        use rayon::prelude::*;

        let chunk = (graphs.len() / (rayon::current_num_threads() * 4)).max(1);
        let partials: Vec<Result<BatchAccumulator>> = graphs
            .par_chunks(chunk)
            .enumerate()
            .map(|(c, molecules)| {
                let mut acc = BatchAccumulator::new();
                for (j, graph) in molecules.iter().enumerate() {
                    self.record(&mut acc, first_index + c * chunk + j, self.pipeline.compute(graph))?;
                }
                Ok(acc)
            })
            .collect();

        // Ordered merge; the earliest failing chunk decides the error
        let mut acc = BatchAccumulator::new();
        for partial in partials {
            let before = acc.processed;
            acc.merge(partial?);
            let every = self.config.progress_interval;
            if every > 0 && acc.processed / every > before / every {
                info!(processed = acc.processed, total = graphs.len(), "batch progress");
            }
        }
        Ok(acc)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel(&self, graphs: &[AttributedGraph], first_index: usize) -> Result<BatchAccumulator> {
        warn!("built without the `parallel` feature, running sequentially");
        self.run_sequential(graphs, first_index)
    }
}
