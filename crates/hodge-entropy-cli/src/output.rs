use anyhow::Result;
use hodge_entropy::batch::{BatchAccumulator, IndexRange, SkippedMolecule};
use hodge_entropy::molecule::BOND_ONE_HOT_WIDTH;
use hodge_entropy::AttributedGraph;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct MoleculeFeatures {
    pub molecule: usize,
    pub node_range: IndexRange,
    pub edge_range: IndexRange,
    /// One row per node time, one column per atom
    pub node_entropy: Vec<Vec<f64>>,
    /// One row per edge time, one column per bond
    pub edge_entropy: Vec<Vec<f64>>,
    pub node_times: Vec<f64>,
    pub edge_times: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bond_features: Option<Vec<[f32; BOND_ONE_HOT_WIDTH]>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureFile {
    pub node_total: usize,
    pub edge_total: usize,
    pub molecules: Vec<MoleculeFeatures>,
    pub skipped: Vec<SkippedMolecule>,
}

impl FeatureFile {
    /// Flatten a finished batch. `graphs[i]` must be molecule `first_index + i`.
    pub fn from_batch(
        acc: BatchAccumulator,
        graphs: &[AttributedGraph],
        first_index: usize,
        bond_features: bool,
    ) -> Result<Self> {
        let node_total = acc.node_total();
        let edge_total = acc.edge_total();

        let molecules = acc
            .records
            .into_iter()
            .map(|record| {
                let bonds = if bond_features {
                    let graph = graphs
                        .get(record.molecule - first_index)
                        .ok_or_else(|| anyhow::anyhow!("no input graph for molecule {}", record.molecule))?;
                    Some(graph.bond_features()?)
                } else {
                    None
                };
                let sig = record.signature;
                Ok(MoleculeFeatures {
                    molecule: record.molecule,
                    node_range: record.node_range,
                    edge_range: record.edge_range,
                    node_entropy: sig.node.rows(),
                    edge_entropy: sig.edge.rows(),
                    node_times: sig.node.times,
                    edge_times: sig.edge.times,
                    bond_features: bonds,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            node_total,
            edge_total,
            molecules,
            skipped: acc.skipped,
        })
    }

    /// Write JSON to `path`, or to stdout when no path is given
    pub fn write(&self, path: Option<&Path>, pretty: bool) -> Result<()> {
        let content = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };

        match path {
            Some(p) => std::fs::write(p, content)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
