//! Audiolib Analysis - spectra, coherence and impulse responses
//!
//! Frequency-domain tools for measuring recorded audio:
//!
//! - [`fft`] - Real FFT wrapper with windowing and inverse transform
//! - [`spectrum`] - One-sided power spectrum and magnitude-squared coherence
//! - [`transfer_fn`] - Transfer function measurement and harmonic phase
//! - [`ir`] - Zero-centered impulse responses from half spectra
//! - [`plot`] - Axis scaling, IR windows and engineering labels
//! - [`export`] - CSV and FRD output
//!
//! All signals are `f64` in the nominal range [-1.0, 1.0], as produced by
//! `audiolib-io`.
//!
//! ## Example Workflow
//!
//! ```rust,ignore
//! use audiolib_analysis::{TransferFunction, rfft_power_spectrum};
//!
//! // 1. Spectrum of a recording
//! let spectrum = rfft_power_spectrum(&signal, 48000.0, None)?;
//! println!("peak at {} Hz", spectrum.frequencies[spectrum.peak_bin().unwrap()]);
//!
//! // 2. System measurement from a stimulus/response pair
//! let tf = TransferFunction::measure(&input, &output, 48000.0, 4096)?;
//! let ir = tf.to_impulse_response(48000.0)?;
//! println!("latency: {:?} s", ir.peak_delay());
//! ```

pub mod error;
pub mod export;
pub mod fft;
pub mod ir;
pub mod plot;
pub mod spectrum;
pub mod transfer_fn;

pub use error::{Bound, Error, Result};
pub use export::{
    export_coherence_csv, export_frd, export_ir_csv, export_power_spectrum_csv, import_frd,
};
pub use fft::{Fft, Window, fft_shift, magnitude_db};
pub use ir::{ImpulseResponse, centered_time_axis, ir_from_recordings, ir_from_spectrum};
pub use plot::{AxisScale, IrWindow, PlotScales, format_eng, ir_window, unit_circle};
pub use spectrum::{Coherence, PowerSpectrum, coherence, rfft_frequencies, rfft_power_spectrum};
pub use transfer_fn::{HarmonicPhase, TransferFunction, unwrap_phase};

/// Re-export of the complex type used for spectra.
pub use rustfft::num_complex::Complex;
