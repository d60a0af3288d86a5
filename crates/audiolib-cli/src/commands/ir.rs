//! Impulse response extraction from a stimulus/response pair.

use super::common::{load_settings, read_pair};
use anyhow::Context;
use audiolib_analysis::{TransferFunction, export_ir_csv, format_eng};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extract a zero-centered impulse response.
#[derive(Args)]
pub struct IrArgs {
    /// Stimulus WAV file (what was played into the system)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Response WAV file (what was recorded from the system)
    #[arg(value_name = "OUTPUT")]
    pub response: PathBuf,

    /// FFT length (defaults to the settings value, then the signal length)
    #[arg(long)]
    pub fft_len: Option<usize>,

    /// Channel to use from both files
    #[arg(long, default_value = "0")]
    pub channel: usize,

    /// Half width of the displayed window in seconds
    #[arg(long)]
    pub width: Option<f64>,

    /// Center of the displayed window in seconds
    #[arg(long)]
    pub center: Option<f64>,

    /// Output CSV file for the windowed response (optional)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the ir command.
pub fn run(args: IrArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let (input, response) = read_pair(&args.input, &args.response, args.channel)?;
    let sample_rate = input.sample_rate;
    let fft_len = args
        .fft_len
        .or(settings.fft_len)
        .unwrap_or(input.samples.len());

    println!(
        "Extracting impulse response ({} samples, FFT {})...",
        input.samples.len(),
        fft_len
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("measuring transfer function");
    let tf = TransferFunction::measure(&input.samples, &response.samples, sample_rate, fft_len)?;
    pb.set_message("inverse transform");
    let ir = tf.to_impulse_response(sample_rate)?;
    pb.finish_and_clear();

    if let (Some(peak), Some(delay)) = (ir.peak_index(), ir.peak_delay()) {
        println!("  Peak:    {:.4} at sample {}", ir.samples[peak], peak);
        println!("  Delay:   {}", format_eng(delay, "s"));
    }

    let width = args.width.or(settings.ir_width);
    let center = args.center.unwrap_or(settings.ir_center);
    let window = ir.window(width, center)?;
    println!(
        "  Window:  {} .. {} ({} samples)",
        format_eng(window.start, "s"),
        format_eng(window.end, "s"),
        window.indices.len()
    );

    if let Some(path) = args.output {
        export_ir_csv(&ir, Some(&window), &path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nImpulse response saved to {}", path.display());
    }

    Ok(())
}
