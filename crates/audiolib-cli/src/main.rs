//! Audiolib CLI - sample conversion and spectral measurement of WAV files.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "audiolib")]
#[command(author, version, about = "PCM conversion and spectral analysis", long_about = None)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show WAV file information
    Info(commands::info::InfoArgs),

    /// Compute the power spectrum of one channel
    Spectrum(commands::spectrum::SpectrumArgs),

    /// Estimate coherence between two recordings
    Coherence(commands::coherence::CoherenceArgs),

    /// Extract an impulse response from an input/output pair
    Ir(commands::ir::IrArgs),

    /// Re-encode a WAV file at another sample format
    Convert(commands::convert::ConvertArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args, config),
        Commands::Coherence(args) => commands::coherence::run(args, config),
        Commands::Ir(args) => commands::ir::run(args, config),
        Commands::Convert(args) => commands::convert::run(args, config),
    }
}
