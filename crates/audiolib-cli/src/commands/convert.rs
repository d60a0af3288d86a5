//! Sample format conversion.

use super::common::load_settings;
use anyhow::Context;
use audiolib_io::{SampleFormat, read_wav, read_wav_info, write_wav};
use clap::Args;
use std::path::{Path, PathBuf};

/// Re-encode a WAV file.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Integer PCM bit depth (defaults to the settings value)
    #[arg(long, conflicts_with = "float")]
    pub bits: Option<u16>,

    /// Write 32-bit IEEE float instead of integer PCM
    #[arg(long)]
    pub float: bool,
}

/// Run the convert command.
pub fn run(args: ConvertArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let format = if args.float {
        SampleFormat::Float
    } else {
        args.bits
            .map_or_else(|| settings.output_format(), |bits| SampleFormat::Pcm { bits })
    };

    let source = read_wav_info(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let data = read_wav(&args.input)?;

    write_wav(&args.output, &data, format)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let target = match format {
        SampleFormat::Pcm { bits } => format!("PCM {bits}-bit"),
        SampleFormat::Float => "IEEE Float 32-bit".to_string(),
    };
    println!(
        "Converted {} ({} {}-bit) -> {} ({})",
        args.input.display(),
        source.format,
        source.bits_per_sample,
        args.output.display(),
        target
    );
    println!(
        "  {} channel(s), {} frames",
        data.num_channels(),
        data.num_frames()
    );

    Ok(())
}
