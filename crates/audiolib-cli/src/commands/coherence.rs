//! Coherence between two recordings.

use super::common::{load_settings, read_pair};
use anyhow::Context;
use audiolib_analysis::{coherence, export_coherence_csv, format_eng};
use clap::Args;
use std::path::{Path, PathBuf};

/// Estimate magnitude-squared coherence between two WAV files.
#[derive(Args)]
pub struct CoherenceArgs {
    /// First WAV file (reference)
    #[arg(value_name = "A")]
    pub a: PathBuf,

    /// Second WAV file
    #[arg(value_name = "B")]
    pub b: PathBuf,

    /// Welch segment length (defaults to the settings value)
    #[arg(long)]
    pub block_len: Option<usize>,

    /// Channel to compare
    #[arg(long, default_value = "0")]
    pub channel: usize,

    /// Output CSV file (optional)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the coherence command.
pub fn run(args: CoherenceArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let block_len = args.block_len.unwrap_or(settings.block_len);
    let (a, b) = read_pair(&args.a, &args.b, args.channel)?;

    println!(
        "Coherence of {} and {} (block {})...",
        args.a.display(),
        args.b.display(),
        block_len
    );

    let coh = coherence(&a.samples, &b.samples, a.sample_rate, block_len)?;

    // DC carries no information after per-segment mean removal
    let band = &coh.msc[1.min(coh.msc.len())..];
    if let Some((offset, &min)) = band
        .iter()
        .enumerate()
        .min_by(|(_, x), (_, y)| x.total_cmp(y))
    {
        let mean = band.iter().sum::<f64>() / band.len() as f64;
        println!("  Mean coherence: {:.4}", mean);
        println!(
            "  Minimum:        {:.4} at {}",
            min,
            format_eng(coh.frequencies[offset + 1], "Hz")
        );
    }

    if let Some(path) = args.output {
        export_coherence_csv(&coh, &path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nCoherence saved to {}", path.display());
    }

    Ok(())
}
