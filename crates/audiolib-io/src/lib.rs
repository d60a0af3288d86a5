//! Sample-format conversion and WAV I/O for audiolib.
//!
//! This crate provides:
//!
//! - **PCM conversion**: [`signed_to_float`], [`unsigned_to_float`] and
//!   [`float_to_signed`] map between fixed-point PCM codes and normalized
//!   `f64` amplitude
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] load and save
//!   per-channel normalized buffers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use audiolib_io::{read_wav, write_wav, SampleFormat};
//!
//! let data = read_wav("capture.wav")?;
//! println!("{} channels at {} Hz", data.channels.len(), data.sample_rate);
//!
//! write_wav("capture_16bit.wav", &data, SampleFormat::Pcm { bits: 16 })?;
//! ```

mod pcm;
mod wav;

pub use pcm::{
    MAX_BIT_DEPTH, PcmEncoding, float_to_signed, float_to_unsigned, signed_to_float, to_float,
    unsigned_to_float,
};
pub use wav::{
    SampleFormat, WRITABLE_PCM_BITS, WavData, WavFormat, WavInfo, read_wav, read_wav_info,
    read_wavs, write_wav,
};

/// Error types for sample conversion and audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was outside its accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested conversion direction is not available.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// Paired buffers disagree in length.
    #[error("shape mismatch: {what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        /// Which buffer had the wrong length.
        what: String,
        /// Length required by the other inputs.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for conversion and I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
