//! Property-based tests for the PCM sample-format converter.

use audiolib_io::{float_to_signed, signed_to_float, unsigned_to_float};
use proptest::prelude::*;

/// Bit depth plus a signed code that fits in it.
fn signed_code() -> impl Strategy<Value = (u16, i64)> {
    (2u16..=32).prop_flat_map(|bits| {
        let half = 1i64 << (bits - 1);
        (Just(bits), -half..half)
    })
}

/// Bit depth plus an unsigned code that fits in it.
fn unsigned_code() -> impl Strategy<Value = (u16, u64)> {
    (2u16..=32).prop_flat_map(|bits| (Just(bits), 0u64..(1u64 << bits)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Signed codes survive a trip through float and back.
    #[test]
    fn signed_roundtrip((bits, code) in signed_code()) {
        let float = signed_to_float(&[code as f64], bits).unwrap();
        let back = float_to_signed(&float, bits).unwrap();
        prop_assert_eq!(i64::from(back[0]), code, "bits={}", bits);
    }

    /// Signed conversion never leaves [-1, 1).
    #[test]
    fn signed_output_in_range((bits, code) in signed_code()) {
        let v = signed_to_float(&[code as f64], bits).unwrap()[0];
        prop_assert!((-1.0..1.0).contains(&v), "bits={} code={} -> {}", bits, code, v);
    }

    /// Unsigned conversion covers exactly [-1, 1] and keeps the sign of the
    /// offset-removed code.
    #[test]
    fn unsigned_output_in_range((bits, code) in unsigned_code()) {
        let v = unsigned_to_float(&[code as f64], bits).unwrap()[0];
        prop_assert!((-1.0..=1.0).contains(&v));
        let centred = code as i64 - (1i64 << (bits - 1));
        prop_assert_eq!(v < 0.0, centred < 0);
    }

    /// Quantization error of float_to_signed is at most half a code step
    /// for in-range input.
    #[test]
    fn float_to_signed_error_bounded(bits in 2u16..=24, x in -1.0f64..0.99) {
        let code = float_to_signed(&[x], bits).unwrap()[0];
        let back = signed_to_float(&[code], bits).unwrap()[0];
        let step = 1.0 / (1u64 << (bits - 1)) as f64;
        prop_assert!((back - x).abs() <= step, "x={} back={} step={}", x, back, step);
    }
}
