//! Power spectrum of a recording.

use super::common::{load_settings, read_channel};
use anyhow::Context;
use audiolib_analysis::{PowerSpectrum, export_power_spectrum_csv, format_eng, rfft_power_spectrum};
use clap::Args;
use std::path::{Path, PathBuf};

/// Compute the one-sided power spectrum of a WAV channel.
#[derive(Args)]
pub struct SpectrumArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// FFT length (defaults to the settings value, then the signal length)
    #[arg(long)]
    pub fft_len: Option<usize>,

    /// Channel to analyze
    #[arg(long, default_value = "0")]
    pub channel: usize,

    /// Show top N peaks
    #[arg(long, default_value = "5")]
    pub peaks: usize,

    /// Output CSV file (optional)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write power in dB instead of linear units
    #[arg(long)]
    pub db: bool,
}

/// Run the spectrum command.
pub fn run(args: SpectrumArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let channel = read_channel(&args.input, args.channel)?;
    let fft_len = args.fft_len.or(settings.fft_len);

    println!("Analyzing spectrum of {}...", args.input.display());
    println!(
        "  {} samples at {}",
        channel.samples.len(),
        format_eng(channel.sample_rate, "Hz")
    );

    let spectrum = rfft_power_spectrum(&channel.samples, channel.sample_rate, fft_len)?;
    let resolution = spectrum.frequencies.get(1).copied().unwrap_or(0.0);
    println!(
        "  {} bins, resolution {}",
        spectrum.len(),
        format_eng(resolution, "Hz")
    );

    if args.peaks > 0 {
        println!("\nTop {} peaks:", args.peaks);
        for (i, (freq, power)) in spectrum.peaks(args.peaks).iter().enumerate() {
            let db = 10.0 * power.max(1e-24).log10();
            println!("  {:2}. {:>12}  {:7.1} dB", i + 1, format_eng(*freq, "Hz"), db);
        }
    }

    if let Some(path) = args.output {
        let (frequencies, power) = settings
            .scales()?
            .plottable(&spectrum.frequencies, &spectrum.power)?;
        let dropped = spectrum.len() - frequencies.len();
        if dropped > 0 {
            tracing::info!(dropped, "bins outside the log axes omitted from export");
        }
        let visible = PowerSpectrum { frequencies, power };
        export_power_spectrum_csv(&visible, &path, args.db)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nSpectrum saved to {}", path.display());
    }

    Ok(())
}
