pub mod compute;
pub mod init_config;
pub mod inspect;

use anyhow::Context;
use hodge_entropy::AttributedGraph;
use serde::Deserialize;

/// Accepted input layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum InputData {
    List(Vec<AttributedGraph>),
    Wrapped { molecules: Vec<AttributedGraph> },
}

/// Load molecules from a JSON array, or an object with a `molecules` array
pub fn load_molecules(path: &std::path::Path) -> anyhow::Result<Vec<AttributedGraph>> {
    let content = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let data: InputData =
        serde_json::from_slice(&content).with_context(|| format!("parsing molecules from {}", path.display()))?;

    Ok(match data {
        InputData::List(molecules) | InputData::Wrapped { molecules } => molecules,
    })
}
