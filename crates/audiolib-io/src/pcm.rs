//! Fixed-point PCM <-> normalized float conversion.
//!
//! Signed codes scale linearly by `2^(bits-1)`. Unsigned codes are first
//! re-centred by removing the `2^(bits-1)` offset, after which the positive
//! and negative halves are scaled by their own spans so both extremes land
//! exactly on ±1.0.

use crate::{Error, Result};

/// Widest PCM word supported by the converter.
pub const MAX_BIT_DEPTH: u16 = 32;

/// Signedness of a PCM sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcmEncoding {
    /// Two's complement codes centred on zero.
    Signed,
    /// Offset-binary codes in `[0, 2^bits - 1]`.
    Unsigned,
}

/// Number of negative codes, `2^(bits-1)`, after validating the bit depth.
fn negative_span(bit_depth: u16) -> Result<f64> {
    if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
        return Err(Error::InvalidArgument(format!(
            "bit depth must be in 1..={MAX_BIT_DEPTH}, got {bit_depth}"
        )));
    }
    Ok((1u64 << (bit_depth - 1)) as f64)
}

/// Convert signed PCM codes to normalized floats.
///
/// Every sample is divided by `2^(bit_depth-1)`, so `-2^(bit_depth-1)` maps
/// to exactly `-1.0` and the largest positive code to `1.0 - 2^-(bit_depth-1)`.
///
/// # Example
///
/// ```rust
/// use audiolib_io::signed_to_float;
///
/// let out = signed_to_float(&[0i16, 32767, -32768], 16).unwrap();
/// assert_eq!(out[0], 0.0);
/// assert_eq!(out[2], -1.0);
/// ```
pub fn signed_to_float<T: Copy + Into<f64>>(samples: &[T], bit_depth: u16) -> Result<Vec<f64>> {
    let span = negative_span(bit_depth)?;
    Ok(samples.iter().map(|&s| s.into() / span).collect())
}

/// Convert unsigned PCM codes to normalized floats.
///
/// The offset `2^(bit_depth-1)` is removed first. Non-negative results are
/// divided by `2^(bit_depth-1) - 1`, negative results by `2^(bit_depth-1)`,
/// so the full code range maps onto `[-1.0, 1.0]` with zero left in place.
pub fn unsigned_to_float<T: Copy + Into<f64>>(
    samples: &[T],
    bit_depth: u16,
) -> Result<Vec<f64>> {
    let negative = negative_span(bit_depth)?;
    // One-bit words have no positive codes; only zero lands on this side.
    let positive = (negative - 1.0).max(1.0);

    Ok(samples
        .iter()
        .map(|&s| {
            let centred = s.into() - negative;
            if centred >= 0.0 {
                centred / positive
            } else {
                centred / negative
            }
        })
        .collect())
}

/// Convert normalized floats back to signed PCM codes.
///
/// Samples are multiplied by `2^(bit_depth-1)`, rounded to the nearest
/// integer (halves away from zero) and saturated to
/// `[-2^(bit_depth-1), 2^(bit_depth-1) - 1]`. NaN becomes 0.
pub fn float_to_signed(samples: &[f64], bit_depth: u16) -> Result<Vec<i32>> {
    let span = negative_span(bit_depth)?;
    let (min, max) = (-span, span - 1.0);

    Ok(samples
        .iter()
        .map(|&x| {
            let code = (x * span).round();
            if code.is_nan() {
                0
            } else {
                code.clamp(min, max) as i32
            }
        })
        .collect())
}

/// Convert normalized floats to unsigned PCM codes.
///
/// Not available: always returns [`Error::NotImplemented`].
pub fn float_to_unsigned(_samples: &[f64], bit_depth: u16) -> Result<Vec<u32>> {
    negative_span(bit_depth)?;
    Err(Error::NotImplemented("float to unsigned PCM conversion"))
}

/// Convert PCM codes of either signedness to normalized floats.
pub fn to_float<T: Copy + Into<f64>>(
    samples: &[T],
    bit_depth: u16,
    encoding: PcmEncoding,
) -> Result<Vec<f64>> {
    tracing::debug!(
        len = samples.len(),
        bit_depth,
        ?encoding,
        "pcm_to_float"
    );
    match encoding {
        PcmEncoding::Signed => signed_to_float(samples, bit_depth),
        PcmEncoding::Unsigned => unsigned_to_float(samples, bit_depth),
    }
}
