use anyhow::Context;
use hodge_entropy::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Indent the JSON output
    pub pretty: bool,
    /// Emit one-hot bond-type rows next to the edge entropies
    pub bond_features: bool,
}

pub const DEFAULT_PATHS: [&str; 2] = ["hodge-entropy.toml", "config/hodge-entropy.toml"];

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(p) = path {
        let content = std::fs::read_to_string(p)
            .with_context(|| format!("reading config {}", p.display()))?;
        return parse(&content).with_context(|| format!("parsing config {}", p.display()));
    }

    // Try default locations
    for path in &DEFAULT_PATHS {
        if let Ok(content) = std::fs::read_to_string(path) {
            tracing::debug!(path = *path, "using config file");
            return parse(&content).with_context(|| format!("parsing config {path}"));
        }
    }

    Ok(Config::default())
}

fn parse(content: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.pipeline.validate()?;
    Ok(config)
}

impl Config {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
