use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct InitConfigArgs {
    /// Where to write the configuration
    #[arg(short, long, default_value = "hodge-entropy.toml")]
    output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

/// Write the default configuration; an explicit `--config` is not applied
pub fn run(args: InitConfigArgs, _config: &Config) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", args.output.display());
    }

    Config::default().save(&args.output)?;
    tracing::info!("Default configuration written to {:?}", args.output);
    Ok(())
}
