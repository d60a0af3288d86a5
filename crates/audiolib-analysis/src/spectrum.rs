//! Power spectra and magnitude-squared coherence

use crate::error::{Error, Result, check_sample_rate};
use crate::fft::{Fft, Window};
use rustfft::num_complex::Complex;

/// One-sided power spectrum of a real signal.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    /// Bin frequencies in Hz, DC to Nyquist.
    pub frequencies: Vec<f64>,
    /// `|X[k] / N|^2` per bin.
    pub power: Vec<f64>,
}

impl PowerSpectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// True when there are no bins.
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Index of the strongest bin.
    pub fn peak_bin(&self) -> Option<usize> {
        self.power
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
    }

    /// Power in dB (floored at -240 dB).
    pub fn power_db(&self) -> Vec<f64> {
        self.power
            .iter()
            .map(|&p| 10.0 * p.max(1e-24).log10())
            .collect()
    }

    /// Local maxima as `(frequency, power)` pairs, strongest first.
    pub fn peaks(&self, count: usize) -> Vec<(f64, f64)> {
        let p = &self.power;
        let mut peaks: Vec<(f64, f64)> = (0..p.len())
            .filter(|&i| {
                let left = i == 0 || p[i] > p[i - 1];
                let right = i + 1 == p.len() || p[i] >= p[i + 1];
                left && right && p[i] > 0.0
            })
            .map(|i| (self.frequencies[i], p[i]))
            .collect();

        peaks.sort_by(|a, b| b.1.total_cmp(&a.1));
        peaks.truncate(count);
        peaks
    }
}

/// Bin frequencies `k * sample_rate / fft_len` for `k = 0..=fft_len/2`.
pub fn rfft_frequencies(fft_len: usize, sample_rate: f64) -> Vec<f64> {
    let bin_width = sample_rate / fft_len as f64;
    (0..=fft_len / 2).map(|k| k as f64 * bin_width).collect()
}

/// Compute the power spectrum of a real signal.
///
/// `fft_len` defaults to the signal length; the signal is zero-padded or
/// truncated to it. Returns `fft_len/2 + 1` bins spaced `sample_rate /
/// fft_len` apart with power `|RFFT(signal)[k] / fft_len|^2`.
///
/// # Example
///
/// ```rust
/// use audiolib_analysis::rfft_power_spectrum;
///
/// let signal: Vec<f64> = (0..64)
///     .map(|i| (2.0 * std::f64::consts::PI * 4.0 * i as f64 / 64.0).sin())
///     .collect();
/// let spec = rfft_power_spectrum(&signal, 64.0, None).unwrap();
/// assert_eq!(spec.peak_bin(), Some(4));
/// ```
pub fn rfft_power_spectrum(
    signal: &[f64],
    sample_rate: f64,
    fft_len: Option<usize>,
) -> Result<PowerSpectrum> {
    check_sample_rate(sample_rate)?;
    let fft_len = fft_len.unwrap_or(signal.len());
    if fft_len == 0 {
        return Err(Error::InvalidArgument(
            "FFT length must be at least 1".to_string(),
        ));
    }

    let fft = Fft::new(fft_len);
    let norm = (fft_len as f64).powi(2);
    let power = fft
        .forward_real(signal)
        .iter()
        .map(|c| c.norm_sqr() / norm)
        .collect();

    Ok(PowerSpectrum {
        frequencies: rfft_frequencies(fft_len, sample_rate),
        power,
    })
}

/// Magnitude-squared coherence between two signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Coherence {
    /// Bin frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Coherence per bin, in `[0, 1]`.
    pub msc: Vec<f64>,
}

/// Welch-averaged auto and cross spectra of a signal pair.
pub(crate) struct CrossSpectra {
    pub pxx: Vec<f64>,
    pub pyy: Vec<f64>,
    /// `sum(conj(X) * Y)`.
    pub pxy: Vec<Complex<f64>>,
    pub block_len: usize,
}

/// Validate a signal pair and return the effective segment length.
fn effective_block_len(x: &[f64], y: &[f64], block_len: usize) -> Result<usize> {
    if x.len() != y.len() {
        return Err(Error::shape("second signal", x.len(), y.len()));
    }
    if x.is_empty() {
        return Err(Error::InvalidArgument("signals are empty".to_string()));
    }
    if block_len == 0 {
        return Err(Error::InvalidArgument(
            "block length must be at least 1".to_string(),
        ));
    }
    if block_len > x.len() {
        tracing::warn!(
            block_len,
            signal_len = x.len(),
            "block length exceeds signal length, using signal length"
        );
        return Ok(x.len());
    }
    Ok(block_len)
}

/// Accumulate Hann-windowed spectra over half-overlapping segments.
///
/// Each segment has its mean removed before windowing.
pub(crate) fn cross_spectra(x: &[f64], y: &[f64], block_len: usize) -> Result<CrossSpectra> {
    let block_len = effective_block_len(x, y, block_len)?;
    let hop = block_len - block_len / 2;
    let num_segments = (x.len() - block_len) / hop + 1;

    let fft = Fft::new(block_len);
    let window = Window::Hann.coefficients(block_len);
    let bins = fft.num_bins();

    let mut pxx = vec![0.0; bins];
    let mut pyy = vec![0.0; bins];
    let mut pxy = vec![Complex::new(0.0, 0.0); bins];

    let prepare = |segment: &[f64]| -> Vec<f64> {
        let mean = segment.iter().sum::<f64>() / segment.len() as f64;
        segment
            .iter()
            .zip(&window)
            .map(|(&s, &w)| (s - mean) * w)
            .collect()
    };

    for seg in 0..num_segments {
        let start = seg * hop;
        let xs = fft.forward_real(&prepare(&x[start..start + block_len]));
        let ys = fft.forward_real(&prepare(&y[start..start + block_len]));

        for i in 0..bins {
            pxx[i] += xs[i].norm_sqr();
            pyy[i] += ys[i].norm_sqr();
            pxy[i] += xs[i].conj() * ys[i];
        }
    }

    tracing::debug!(block_len, num_segments, "cross_spectra");

    Ok(CrossSpectra {
        pxx,
        pyy,
        pxy,
        block_len,
    })
}

/// Estimate magnitude-squared coherence with Welch averaging.
///
/// Segments of `block_len` samples overlap by half and use a periodic Hann
/// window. A `block_len` longer than the signals is reduced to their length.
/// Bins where either signal carries no energy report 0.
pub fn coherence(x: &[f64], y: &[f64], sample_rate: f64, block_len: usize) -> Result<Coherence> {
    check_sample_rate(sample_rate)?;
    let spectra = cross_spectra(x, y, block_len)?;

    let msc = spectra
        .pxy
        .iter()
        .zip(spectra.pxx.iter().zip(&spectra.pyy))
        .map(|(pxy, (&pxx, &pyy))| {
            let denom = pxx * pyy;
            if denom > 0.0 {
                (pxy.norm_sqr() / denom).min(1.0)
            } else {
                0.0
            }
        })
        .collect();

    Ok(Coherence {
        frequencies: rfft_frequencies(spectra.block_len, sample_rate),
        msc,
    })
}
