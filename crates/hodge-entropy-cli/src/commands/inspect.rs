use crate::config::Config;
use clap::Args;
use hodge_entropy::utils::ZERO_EIGEN_TOL;
use hodge_entropy::{betti_numbers, AttributedGraph, CliqueComplex, HodgeLaplacian, LaplacianSpectrum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectArgs {
    /// Input molecules (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Only inspect this molecule
    #[arg(short, long)]
    molecule: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Topological summary of one molecule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub molecule: usize,
    pub atoms: usize,
    pub bonds: usize,
    /// Simplex counts per dimension, up to one above the configured `max_dim`
    pub simplices: Vec<usize>,
    pub euler_characteristic: i64,
    /// β₀ … β_{max_dim}
    pub betti: Vec<usize>,
    /// Smallest non-zero eigenvalue of L₀; `None` for isolated atoms
    pub spectral_gap: Option<f64>,
}

pub fn summarize(molecule: usize, graph: &AttributedGraph, max_dim: usize) -> hodge_entropy::Result<Summary> {
    // One extra dimension so the top Betti number sees its up-term
    let complex = CliqueComplex::from_graph(graph, max_dim + 1)?;
    let l0 = HodgeLaplacian::build_range(&complex, (0, 0), true)?;
    let spectral_gap = l0
        .first()
        .and_then(|l| LaplacianSpectrum::decompose(&l.matrix, f64::INFINITY).spectral_gap(ZERO_EIGEN_TOL));
    Ok(Summary {
        molecule,
        atoms: graph.atom_count(),
        bonds: graph.bond_count(),
        simplices: complex.simplex_counts(),
        euler_characteristic: complex.euler_characteristic(),
        betti: betti_numbers(&complex, ZERO_EIGEN_TOL)?,
        spectral_gap,
    })
}

pub fn run(args: InspectArgs, config: &Config) -> anyhow::Result<()> {
    let molecules = super::load_molecules(&args.input)?;

    let selected: Vec<usize> = match args.molecule {
        Some(i) if i < molecules.len() => vec![i],
        Some(i) => anyhow::bail!("molecule {} out of range ({} molecules)", i, molecules.len()),
        None => (0..molecules.len()).collect(),
    };

    for i in selected {
        match summarize(i, &molecules[i], config.pipeline.max_dim) {
            Ok(summary) if args.json => println!("{}", serde_json::to_string(&summary)?),
            Ok(s) => println!(
                "molecule {:>6}  atoms {:>4}  bonds {:>4}  simplices {:?}  chi {:>3}  betti {:?}  gap {}",
                s.molecule,
                s.atoms,
                s.bonds,
                s.simplices,
                s.euler_characteristic,
                s.betti,
                s.spectral_gap.map_or_else(|| "-".to_string(), |g| format!("{g:.4}")),
            ),
            Err(err) => tracing::warn!(molecule = i, error = %err, "cannot inspect molecule"),
        }
    }
    Ok(())
}
