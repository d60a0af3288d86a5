//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use audiolib_config::AnalysisSettings;
use audiolib_io::read_wav;
use std::path::Path;

/// Load settings from `--config`, or the default location.
pub fn load_settings(config: Option<&Path>) -> anyhow::Result<AnalysisSettings> {
    AnalysisSettings::load_or_default(config).context("loading settings")
}

/// One channel of a WAV file with its sample rate.
pub struct Channel {
    pub samples: Vec<f64>,
    pub sample_rate: f64,
}

/// Read one channel of a WAV file.
pub fn read_channel(path: &Path, index: usize) -> anyhow::Result<Channel> {
    let mut data = read_wav(path).with_context(|| format!("reading {}", path.display()))?;
    let count = data.num_channels();
    if index >= count {
        anyhow::bail!(
            "{} has {} channel(s), channel {} requested",
            path.display(),
            count,
            index
        );
    }
    let sample_rate = f64::from(data.sample_rate);
    Ok(Channel {
        samples: data.channels.swap_remove(index),
        sample_rate,
    })
}

/// Read the same channel from two files recorded at one sample rate.
pub fn read_pair(a: &Path, b: &Path, index: usize) -> anyhow::Result<(Channel, Channel)> {
    let first = read_channel(a, index)?;
    let second = read_channel(b, index)?;
    if first.sample_rate != second.sample_rate {
        anyhow::bail!(
            "sample rates differ: {} Hz vs {} Hz",
            first.sample_rate,
            second.sample_rate
        );
    }
    Ok((first, second))
}
