use crate::{config::Config, output::FeatureFile};
use clap::Args;
use hodge_entropy::{BatchDriver, ErrorPolicy, SignaturePipeline};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args)]
pub struct ComputeArgs {
    /// Input molecules (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process molecules in parallel
    #[arg(long)]
    parallel: bool,

    /// Skip malformed molecules instead of aborting
    #[arg(long)]
    skip_invalid: bool,

    /// Log progress every N molecules
    #[arg(long)]
    progress_interval: Option<usize>,

    /// Index assigned to the first molecule (when resuming a partial run)
    #[arg(long, default_value = "0")]
    start_index: usize,

    /// Include one-hot bond-type rows
    #[arg(long)]
    bond_features: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: ComputeArgs, config: &Config) -> anyhow::Result<()> {
    let mut pipeline_config = config.pipeline.clone();
    let batch = &mut pipeline_config.batch;
    batch.parallel |= args.parallel;
    if args.skip_invalid {
        batch.error_policy = ErrorPolicy::Skip;
    }
    if let Some(n) = args.progress_interval {
        batch.progress_interval = n;
    }

    tracing::info!("Loading molecules from {:?}", args.input);
    let molecules = super::load_molecules(&args.input)?;

    let driver = BatchDriver::from_pipeline(SignaturePipeline::new(pipeline_config)?);

    let start = Instant::now();
    let acc = driver.run_from(&molecules, args.start_index)?;
    tracing::info!(
        "Computed {} molecules in {:.2?} ({} skipped)",
        acc.records.len(),
        start.elapsed(),
        acc.skipped.len()
    );

    let file = FeatureFile::from_batch(
        acc,
        &molecules,
        args.start_index,
        args.bond_features || config.output.bond_features,
    )?;
    file.write(args.output.as_deref(), args.pretty || config.output.pretty)?;

    if let Some(path) = &args.output {
        tracing::info!("Features written to {:?}", path);
    }
    Ok(())
}
