use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "hodge-entropy")]
#[command(version)]
#[command(about = "Multiscale heat-entropy descriptors for molecular graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute node and edge entropy features for a batch of molecules
    Compute(commands::compute::ComputeArgs),

    /// Print simplex counts and Betti numbers per molecule
    Inspect(commands::inspect::InspectArgs),

    /// Write the default configuration to a file
    InitConfig(commands::init_config::InitConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .with(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .init();

    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Compute(args) => commands::compute::run(args, &config),
        Commands::Inspect(args) => commands::inspect::run(args, &config),
        Commands::InitConfig(args) => commands::init_config::run(args, &config),
    }
}
