//! Impulse response reconstruction from frequency-domain data

use crate::error::{Error, Result, check_sample_rate};
use crate::fft::{Fft, fft_shift};
use crate::plot::{IrWindow, ir_window};
use crate::transfer_fn::TransferFunction;
use rustfft::num_complex::Complex;

/// Zero-centered impulse response.
///
/// `samples[len/2]` is the zero-delay sample; earlier indices hold the
/// acausal part.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    /// Time of each sample in seconds, zero at `len/2`.
    pub time: Vec<f64>,
    /// Response samples scaled by the sample rate.
    pub samples: Vec<f64>,
}

impl ImpulseResponse {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the t = 0 sample.
    pub fn zero_index(&self) -> usize {
        self.samples.len() / 2
    }

    /// Index of the largest-magnitude sample.
    pub fn peak_index(&self) -> Option<usize> {
        self.samples
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
            .map(|(i, _)| i)
    }

    /// Delay of the peak relative to t = 0, in seconds.
    pub fn peak_delay(&self) -> Option<f64> {
        self.peak_index().map(|i| self.time[i])
    }

    /// Select the samples within `center ± width` seconds.
    ///
    /// See [`ir_window`] for the bounds rules.
    pub fn window(&self, width: Option<f64>, center: f64) -> Result<IrWindow> {
        ir_window(&self.time, width, center)
    }
}

/// Centered time axis `(i - len/2) / sample_rate`.
pub fn centered_time_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    let zero = (len / 2) as f64;
    (0..len).map(|i| (i as f64 - zero) / sample_rate).collect()
}

/// Reconstruct a zero-centered impulse response from a half spectrum.
///
/// Takes the inverse real FFT of `spectrum` at length `fft_len`, scales it
/// by `sample_rate`, and rotates it so the zero-delay sample sits at index
/// `fft_len / 2`. `freq_axis` must pair one frequency with each bin.
///
/// # Example
///
/// ```rust
/// use audiolib_analysis::ir_from_spectrum;
/// use rustfft::num_complex::Complex;
///
/// let freqs = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let flat = [Complex::new(1.0, 0.0); 5];
/// let ir = ir_from_spectrum(&freqs, &flat, 1.0, 8).unwrap();
/// assert_eq!(ir.peak_index(), Some(4));
/// ```
pub fn ir_from_spectrum(
    freq_axis: &[f64],
    spectrum: &[Complex<f64>],
    sample_rate: f64,
    fft_len: usize,
) -> Result<ImpulseResponse> {
    check_sample_rate(sample_rate)?;
    if fft_len == 0 {
        return Err(Error::InvalidArgument(
            "FFT length must be at least 1".to_string(),
        ));
    }
    if freq_axis.len() != spectrum.len() {
        return Err(Error::shape("spectrum", freq_axis.len(), spectrum.len()));
    }

    let fft = Fft::new(fft_len);
    if spectrum.len() != fft.num_bins() {
        tracing::debug!(
            bins = spectrum.len(),
            expected = fft.num_bins(),
            "spectrum length differs from fft_len/2+1, padding or truncating"
        );
    }

    let scaled: Vec<f64> = fft
        .inverse_real(spectrum)
        .into_iter()
        .map(|x| x * sample_rate)
        .collect();

    Ok(ImpulseResponse {
        time: centered_time_axis(fft_len, sample_rate),
        samples: fft_shift(&scaled),
    })
}

/// Estimate a system's impulse response from an input/output recording pair.
///
/// The transfer function is measured with Welch averaging over `fft_len`
/// segments and then transformed with [`ir_from_spectrum`].
pub fn ir_from_recordings(
    input: &[f64],
    output: &[f64],
    sample_rate: f64,
    fft_len: usize,
) -> Result<ImpulseResponse> {
    TransferFunction::measure(input, output, sample_rate, fft_len)?
        .to_impulse_response(sample_rate)
}
