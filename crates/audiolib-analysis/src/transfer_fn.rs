//! Transfer function measurement

use crate::error::{Bound, Error, Result, check_sample_rate};
use crate::ir::{ImpulseResponse, ir_from_spectrum};
use crate::spectrum::{cross_spectra, rfft_frequencies};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// Complex frequency response of a system, one-sided.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    /// Frequency bins (Hz)
    pub frequencies: Vec<f64>,
    /// Complex response `H(f)`
    pub response: Vec<Complex<f64>>,
    /// Coherence (0-1, measure of linearity)
    pub coherence: Vec<f64>,
    /// Transform length the bins were computed with
    pub fft_len: usize,
}

/// Phase of one harmonic read from its own unwrapped segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicPhase {
    /// Requested harmonic frequency in Hz.
    pub frequency_hz: f64,
    /// Bin the phase was read from.
    pub bin: usize,
    /// Unwrapped phase in degrees.
    pub phase_deg: f64,
}

impl TransferFunction {
    /// Measure the transfer function `H = Pxy / Pxx` between an input and
    /// the system's output.
    ///
    /// Spectra are Welch-averaged over half-overlapping Hann segments of
    /// `fft_len` samples.
    ///
    /// # Arguments
    /// * `input` - Input signal (reference)
    /// * `output` - Output signal (system response)
    /// * `sample_rate` - Sample rate in Hz
    /// * `fft_len` - Segment and transform length
    pub fn measure(
        input: &[f64],
        output: &[f64],
        sample_rate: f64,
        fft_len: usize,
    ) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        let spectra = cross_spectra(input, output, fft_len)?;

        let mut response = Vec::with_capacity(spectra.pxx.len());
        let mut coherence = Vec::with_capacity(spectra.pxx.len());

        for ((&pxx, &pyy), &pxy) in spectra.pxx.iter().zip(&spectra.pyy).zip(&spectra.pxy) {
            if pxx > 0.0 {
                response.push(pxy / pxx);
                let denom = pxx * pyy;
                coherence.push(if denom > 0.0 {
                    (pxy.norm_sqr() / denom).min(1.0)
                } else {
                    0.0
                });
            } else {
                response.push(Complex::new(0.0, 0.0));
                coherence.push(0.0);
            }
        }

        Ok(Self {
            frequencies: rfft_frequencies(spectra.block_len, sample_rate),
            response,
            coherence,
            fft_len: spectra.block_len,
        })
    }

    /// Wrap an already computed complex response.
    ///
    /// Coherence is unknown and set to 1.
    pub fn from_spectrum(
        frequencies: Vec<f64>,
        response: Vec<Complex<f64>>,
        fft_len: usize,
    ) -> Result<Self> {
        if frequencies.len() != response.len() {
            return Err(Error::shape("response", frequencies.len(), response.len()));
        }
        let coherence = vec![1.0; response.len()];
        Ok(Self {
            frequencies,
            response,
            coherence,
            fft_len,
        })
    }

    /// Linear magnitude `|H|`.
    pub fn magnitude(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.norm()).collect()
    }

    /// Magnitude in dB (floored at -240 dB).
    pub fn magnitude_db(&self) -> Vec<f64> {
        crate::fft::magnitude_db(&self.response)
    }

    /// Wrapped phase in radians.
    pub fn phase_rad(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.arg()).collect()
    }

    /// Wrapped phase in degrees.
    pub fn phase_deg(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.arg().to_degrees()).collect()
    }

    /// Phase in degrees, unwrapped across the whole band.
    pub fn unwrapped_phase_deg(&self) -> Vec<f64> {
        unwrap_phase(&self.phase_rad())
            .into_iter()
            .map(f64::to_degrees)
            .collect()
    }

    /// Read the phase of each harmonic from its own bin range.
    ///
    /// `limits[i]` is the inclusive `(start, end)` bin range for
    /// `harmonics_hz[i]`. Phase is unwrapped within that range only, then
    /// sampled at the bin nearest the harmonic (clamped into the range).
    pub fn harmonic_phases(
        &self,
        harmonics_hz: &[f64],
        limits: &[(usize, usize)],
    ) -> Result<Vec<HarmonicPhase>> {
        if limits.len() != harmonics_hz.len() {
            return Err(Error::shape("phase limits", harmonics_hz.len(), limits.len()));
        }
        let last_bin = self.response.len().checked_sub(1).ok_or_else(|| {
            Error::InvalidArgument("transfer function has no bins".to_string())
        })?;
        let phase = self.phase_rad();

        harmonics_hz
            .iter()
            .zip(limits)
            .map(|(&frequency_hz, &(start, end))| {
                if start > end {
                    return Err(Error::OutOfRange {
                        bound: Bound::Start,
                        value: start as f64,
                        limit: end as f64,
                    });
                }
                if end > last_bin {
                    return Err(Error::OutOfRange {
                        bound: Bound::End,
                        value: end as f64,
                        limit: last_bin as f64,
                    });
                }

                let bin = self.nearest_bin(frequency_hz).clamp(start, end);
                let segment = unwrap_phase(&phase[start..=end]);
                Ok(HarmonicPhase {
                    frequency_hz,
                    bin,
                    phase_deg: segment[bin - start].to_degrees(),
                })
            })
            .collect()
    }

    /// Bin whose frequency is closest to `freq_hz`.
    pub fn nearest_bin(&self, freq_hz: f64) -> usize {
        self.frequencies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - freq_hz).abs().total_cmp(&(*b - freq_hz).abs()))
            .map_or(0, |(i, _)| i)
    }

    /// Centered impulse response of this transfer function.
    pub fn to_impulse_response(&self, sample_rate: f64) -> Result<ImpulseResponse> {
        ir_from_spectrum(&self.frequencies, &self.response, sample_rate, self.fft_len)
    }
}

/// Unwrap phase (remove 2*PI discontinuities)
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    if phase.is_empty() {
        return Vec::new();
    }

    let mut unwrapped = Vec::with_capacity(phase.len());
    unwrapped.push(phase[0]);

    let two_pi = 2.0 * PI;
    let mut correction = 0.0;

    for i in 1..phase.len() {
        let diff = phase[i] - phase[i - 1];

        if diff > PI {
            correction -= two_pi;
        } else if diff < -PI {
            correction += two_pi;
        }

        unwrapped.push(phase[i] + correction);
    }

    unwrapped
}
