//! WAV file reading and writing.
//!
//! Container parsing is delegated to `hound`; sample codes are routed
//! through the PCM converter one channel at a time.

use crate::pcm::{PcmEncoding, float_to_signed, to_float};
use crate::{Error, Result};
use hound::{WavReader, WavWriter};
use std::path::{Path, PathBuf};

/// Widest PCM word stored as unsigned offset-binary in WAV files.
const UNSIGNED_PCM_MAX_BITS: u16 = 8;

/// Integer PCM widths [`write_wav`] can encode.
pub const WRITABLE_PCM_BITS: [u16; 3] = [16, 24, 32];

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Two's complement integer samples (9 bits and wider).
    SignedPcm,
    /// Offset-binary integer samples (8 bits and narrower).
    UnsignedPcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl WavFormat {
    fn from_spec(spec: &hound::WavSpec) -> Self {
        match spec.sample_format {
            hound::SampleFormat::Float => WavFormat::IeeeFloat,
            hound::SampleFormat::Int if spec.bits_per_sample <= UNSIGNED_PCM_MAX_BITS => {
                WavFormat::UnsignedPcm
            }
            hound::SampleFormat::Int => WavFormat::SignedPcm,
        }
    }
}

impl std::fmt::Display for WavFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WavFormat::SignedPcm => write!(f, "signed PCM"),
            WavFormat::UnsignedPcm => write!(f, "unsigned PCM"),
            WavFormat::IeeeFloat => write!(f, "IEEE float"),
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Sample encoding.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = reader.duration() as u64;

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / spec.sample_rate as f64,
        format: WavFormat::from_spec(&spec),
    })
}

/// Decoded audio: one normalized buffer per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct WavData {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Per-channel samples in `[-1.0, 1.0]`.
    pub channels: Vec<Vec<f64>>,
}

impl WavData {
    /// Create from per-channel buffers.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f64>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Create a single-channel recording.
    pub fn mono(sample_rate: u32, samples: Vec<f64>) -> Self {
        Self::new(sample_rate, vec![samples])
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel (0 when there are no channels).
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Borrow one channel.
    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    fn check_shape(&self) -> Result<()> {
        if self.channels.is_empty() {
            return Err(Error::InvalidArgument("no channels to write".to_string()));
        }
        let expected = self.num_frames();
        for (i, channel) in self.channels.iter().enumerate() {
            if channel.len() != expected {
                return Err(Error::ShapeMismatch {
                    what: format!("channel {i}"),
                    expected,
                    actual: channel.len(),
                });
            }
        }
        Ok(())
    }
}

/// Split interleaved frames into per-channel buffers.
fn deinterleave(interleaved: &[f64], channels: usize) -> Vec<Vec<f64>> {
    let frames = interleaved.len() / channels;
    let mut out = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (channel, &sample) in out.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }
    out
}

/// Read a WAV file and return normalized samples per channel.
///
/// Integer files are routed through the converter per channel: 8-bit files
/// hold unsigned codes, wider files signed codes. Float files pass through.
///
/// # Example
/// ```ignore
/// let data = read_wav("input.wav")?;
/// println!("Loaded {} frames at {} Hz", data.num_frames(), data.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<WavData> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_channels = spec.channels as usize;
    let bits = spec.bits_per_sample;
    if num_channels == 0 {
        return Err(Error::InvalidArgument("WAV file declares zero channels".to_string()));
    }

    let channels = match WavFormat::from_spec(&spec) {
        WavFormat::IeeeFloat => {
            let samples = reader
                .into_samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            deinterleave(&samples, num_channels)
        }
        format => {
            let codes = reader
                .into_samples::<i32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let encoding = if format == WavFormat::UnsignedPcm {
                PcmEncoding::Unsigned
            } else {
                PcmEncoding::Signed
            };
            // hound re-centres unsigned codes; restore the stored offset.
            let offset = match encoding {
                PcmEncoding::Unsigned => (1u32 << bits.saturating_sub(1)) as f64,
                PcmEncoding::Signed => 0.0,
            };
            deinterleave(&codes, num_channels)
                .into_iter()
                .map(|channel| {
                    let raw: Vec<f64> = channel.into_iter().map(|c| c + offset).collect();
                    to_float(&raw, bits, encoding)
                })
                .collect::<Result<Vec<_>>>()?
        }
    };

    tracing::debug!(
        channels = num_channels,
        sample_rate = spec.sample_rate,
        bits,
        "read_wav"
    );

    Ok(WavData::new(spec.sample_rate, channels))
}

/// Read several WAV files, keeping each path alongside its data.
pub fn read_wavs<I, P>(paths: I) -> Result<Vec<(PathBuf, WavData)>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| {
            let path = p.as_ref().to_path_buf();
            read_wav(&path).map(|data| (path, data))
        })
        .collect()
}

/// Target encoding for [`write_wav`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Integer PCM of the given width.
    Pcm {
        /// Bits per sample.
        bits: u16,
    },
    /// 32-bit IEEE float.
    Float,
}

impl Default for SampleFormat {
    fn default() -> Self {
        SampleFormat::Pcm { bits: 16 }
    }
}

impl SampleFormat {
    /// Check that [`write_wav`] can encode this format.
    ///
    /// Widths of 8 bits or fewer are stored unsigned, which the converter
    /// does not produce, and give [`Error::NotImplemented`]. Any other width
    /// outside [`WRITABLE_PCM_BITS`] is an [`Error::InvalidArgument`].
    pub fn check_writable(self) -> Result<()> {
        match self {
            SampleFormat::Float => Ok(()),
            SampleFormat::Pcm { bits } if WRITABLE_PCM_BITS.contains(&bits) => Ok(()),
            SampleFormat::Pcm { bits } if (1..=UNSIGNED_PCM_MAX_BITS).contains(&bits) => {
                Err(Error::NotImplemented("float to unsigned PCM conversion"))
            }
            SampleFormat::Pcm { bits } => Err(Error::InvalidArgument(format!(
                "cannot write {bits}-bit PCM, supported widths are 16, 24 and 32"
            ))),
        }
    }
}

/// Write per-channel samples to a WAV file.
///
/// The format is checked with [`SampleFormat::check_writable`] and the
/// channels with their shape before the file is created, so a rejected
/// write leaves nothing on disk.
pub fn write_wav<P: AsRef<Path>>(path: P, data: &WavData, format: SampleFormat) -> Result<()> {
    data.check_shape()?;
    format.check_writable()?;

    let channels = data.num_channels();
    let (bits_per_sample, sample_format) = match format {
        SampleFormat::Float => (32, hound::SampleFormat::Float),
        SampleFormat::Pcm { bits } => (bits, hound::SampleFormat::Int),
    };
    let spec = hound::WavSpec {
        channels: channels as u16,
        sample_rate: data.sample_rate,
        bits_per_sample,
        sample_format,
    };

    match format {
        SampleFormat::Float => {
            let mut writer = WavWriter::create(path, spec)?;
            for i in 0..data.num_frames() {
                for channel in &data.channels {
                    writer.write_sample(channel[i] as f32)?;
                }
            }
            writer.finalize()?;
        }
        SampleFormat::Pcm { bits } => {
            let codes = data
                .channels
                .iter()
                .map(|c| float_to_signed(c, bits))
                .collect::<Result<Vec<_>>>()?;

            let mut writer = WavWriter::create(path, spec)?;
            for i in 0..data.num_frames() {
                for channel in &codes {
                    writer.write_sample(channel[i])?;
                }
            }
            writer.finalize()?;
        }
    }

    tracing::debug!(channels, bits_per_sample, "write_wav");
    Ok(())
}
