//! Export formats for analysis results.
//!
//! Plotting is done in external tools, so results are written as plain text:
//! - CSV for power spectra, coherence, and impulse responses
//! - FRD (frequency response data, compatible with REW) for transfer functions

use crate::plot::IrWindow;
use crate::{Coherence, ImpulseResponse, PowerSpectrum, Result, TransferFunction};
use rustfft::num_complex::Complex;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Export a power spectrum to CSV.
///
/// Columns are `frequency_hz,power` or `frequency_hz,power_db` when
/// `db_scale` is set.
pub fn export_power_spectrum_csv(
    spectrum: &PowerSpectrum,
    path: impl AsRef<Path>,
    db_scale: bool,
) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    if db_scale {
        writeln!(file, "frequency_hz,power_db")?;
        for (f, p) in spectrum.frequencies.iter().zip(spectrum.power_db()) {
            writeln!(file, "{:.6},{:.6}", f, p)?;
        }
    } else {
        writeln!(file, "frequency_hz,power")?;
        for (f, p) in spectrum.frequencies.iter().zip(&spectrum.power) {
            writeln!(file, "{:.6},{:e}", f, p)?;
        }
    }

    file.flush()
}

/// Export magnitude-squared coherence to CSV.
pub fn export_coherence_csv(coherence: &Coherence, path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "frequency_hz,msc")?;
    for (f, c) in coherence.frequencies.iter().zip(&coherence.msc) {
        writeln!(file, "{:.6},{:.6}", f, c)?;
    }

    file.flush()
}

/// Export an impulse response to CSV, optionally restricted to a window.
///
/// A window computed on a longer time axis than `ir` is a
/// [`crate::Error::ShapeMismatch`]; the file is not created in that case.
pub fn export_ir_csv(
    ir: &ImpulseResponse,
    window: Option<&IrWindow>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let (time, samples) = match window {
        Some(w) => (w.slice(&ir.time)?, w.slice(&ir.samples)?),
        None => (ir.time.as_slice(), ir.samples.as_slice()),
    };
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "time_s,amplitude")?;
    for (t, s) in time.iter().zip(samples) {
        writeln!(file, "{:.9},{:e}", t, s)?;
    }

    Ok(file.flush()?)
}

/// Export transfer function to FRD format (REW compatible).
///
/// FRD (Frequency Response Data) is a simple text format:
/// - One measurement per line
/// - Three space-separated values: frequency_hz magnitude_db phase_deg
pub fn export_frd(tf: &TransferFunction, path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "* Frequency Response Data exported by audiolib")?;

    for ((freq, mag), phase) in tf
        .frequencies
        .iter()
        .zip(tf.magnitude_db())
        .zip(tf.phase_deg())
    {
        writeln!(file, "{:.6} {:.6} {:.6}", freq, mag, phase)?;
    }

    file.flush()
}

/// Import transfer function from FRD format.
///
/// Lines starting with `*` or `#` are comments. FRD carries no coherence,
/// so it is set to 1.0, and the transform length is inferred from the bin
/// count as `2 * (bins - 1)`.
pub fn import_frd(path: impl AsRef<Path>) -> std::io::Result<TransferFunction> {
    let reader = BufReader::new(File::open(path)?);

    let mut frequencies = Vec::new();
    let mut response = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with('*') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 3
            && let (Ok(freq), Ok(mag_db), Ok(phase_deg)) = (
                parts[0].parse::<f64>(),
                parts[1].parse::<f64>(),
                parts[2].parse::<f64>(),
            )
        {
            frequencies.push(freq);
            response.push(Complex::from_polar(
                10f64.powf(mag_db / 20.0),
                phase_deg.to_radians(),
            ));
        }
    }

    let fft_len = 2 * frequencies.len().saturating_sub(1);
    let coherence = vec![1.0; frequencies.len()];

    Ok(TransferFunction {
        frequencies,
        response,
        coherence,
        fft_len,
    })
}
