//! Real-input FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f64::consts::PI;
use std::sync::Arc;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Periodic Hann window (raised cosine)
    Hann,
}

impl Window {
    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f64]) {
        let n = buffer.len();
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 * (1.0 - (2.0 * PI * i as f64 / n as f64).cos());
                    *sample *= w;
                }
            }
        }
    }

    /// Get window coefficients
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }
}

/// Planned forward/inverse transform of a fixed length.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);
        tracing::debug!(size, "fft_plan");

        Self { fft, ifft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative frequency bins, `size/2 + 1`.
    pub fn num_bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Forward transform of a real signal.
    ///
    /// The input is zero-padded or truncated to the FFT size. Returns the
    /// `size/2 + 1` bins from DC to Nyquist.
    pub fn forward_real(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.num_bins());
        buffer
    }

    /// Inverse transform of a half spectrum to a real signal of FFT size.
    ///
    /// Only the first `size/2 + 1` bins are used; missing bins are treated
    /// as zero. Negative frequencies are rebuilt by conjugate symmetry, so
    /// the imaginary parts of DC and (for even sizes) Nyquist are ignored.
    pub fn inverse_real(&self, spectrum: &[Complex<f64>]) -> Vec<f64> {
        let n = self.size;
        if n == 0 {
            return Vec::new();
        }

        let half = n / 2;
        let mut buffer = vec![Complex::new(0.0, 0.0); n];
        for (slot, &bin) in buffer.iter_mut().zip(spectrum.iter().take(half + 1)) {
            *slot = bin;
        }

        buffer[0].im = 0.0;
        if n % 2 == 0 {
            buffer[half].im = 0.0;
        }
        for k in 1..n.div_ceil(2) {
            buffer[n - k] = buffer[k].conj();
        }

        self.ifft.process(&mut buffer);

        let scale = 1.0 / n as f64;
        buffer.iter().map(|c| c.re * scale).collect()
    }
}

/// Rotate a buffer so its first element lands at index `len/2`.
///
/// Moves the zero-delay sample of a circular impulse response to the centre.
pub fn fft_shift<T: Clone>(data: &[T]) -> Vec<T> {
    let mut shifted = data.to_vec();
    shifted.rotate_right(data.len() / 2);
    shifted
}

/// Compute magnitude spectrum in dB
pub fn magnitude_db(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-12).log10())
        .collect()
}
