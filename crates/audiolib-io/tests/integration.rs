//! Integration tests for audiolib-io WAV I/O and per-channel conversion.

use audiolib_io::{
    Error, SampleFormat, WavData, WavFormat, read_wav, read_wav_info, signed_to_float, write_wav,
};
use tempfile::NamedTempFile;

/// Generate a sine wave at the given sample rate.
fn sine_wave(sample_rate: u32, freq_hz: f64, num_samples: usize, amplitude: f64) -> Vec<f64> {
    (0..num_samples)
        .map(|i| {
            amplitude * (2.0 * std::f64::consts::PI * freq_hz * i as f64 / sample_rate as f64).sin()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// PCM roundtrips
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_pcm_bit_depths() {
    for bits in [16u16, 24, 32] {
        let samples = sine_wave(48000, 440.0, 4800, 0.8);
        let data = WavData::mono(48000, samples.clone());
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &data, SampleFormat::Pcm { bits }).unwrap();

        let loaded = read_wav(file.path()).unwrap();
        let step = 1.0 / (1u64 << (bits - 1)) as f64;
        for (a, b) in samples.iter().zip(&loaded.channels[0]) {
            assert!(
                (a - b).abs() <= step / 2.0 + 1e-12,
                "bits={bits}: {a} vs {b}"
            );
        }
    }
}

#[test]
fn wav_read_matches_signed_converter() {
    let codes: Vec<i16> = vec![0, 1, -1, 16384, -16384, i16::MAX, i16::MIN];
    let file = NamedTempFile::new().unwrap();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(file.path(), spec).unwrap();
    for &c in &codes {
        writer.write_sample(c).unwrap();
    }
    writer.finalize().unwrap();

    let loaded = read_wav(file.path()).unwrap();
    let expected = signed_to_float(&codes, 16).unwrap();
    assert_eq!(loaded.channels[0], expected);
}

#[test]
fn wav_channels_converted_independently() {
    let left = sine_wave(44100, 1000.0, 441, 0.5);
    let right = vec![-0.25; 441];
    let third = vec![0.75; 441];
    let data = WavData::new(44100, vec![left.clone(), right, third]);

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &data, SampleFormat::Pcm { bits: 16 }).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 3);
    assert_eq!(info.format, WavFormat::SignedPcm);

    let loaded = read_wav(file.path()).unwrap();
    assert_eq!(loaded.num_channels(), 3);
    assert!(loaded.channels[1].iter().all(|&v| v == -0.25));
    assert!(loaded.channels[2].iter().all(|&v| v == 0.75));
    for (a, b) in left.iter().zip(&loaded.channels[0]) {
        assert!((a - b).abs() < 1e-4);
    }
}

#[test]
fn wav_float_preserves_out_of_range_values() {
    let data = WavData::mono(48000, vec![1.5, -2.0, 0.0]);
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &data, SampleFormat::Float).unwrap();

    let loaded = read_wav(file.path()).unwrap();
    assert_eq!(loaded.channels[0], vec![1.5, -2.0, 0.0]);
    assert_eq!(
        read_wav_info(file.path()).unwrap().format,
        WavFormat::IeeeFloat
    );
}

#[test]
fn wav_pcm_saturates_out_of_range_values() {
    let data = WavData::mono(48000, vec![1.5, -2.0]);
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &data, SampleFormat::Pcm { bits: 16 }).unwrap();

    let loaded = read_wav(file.path()).unwrap();
    assert_eq!(loaded.channels[0], vec![32767.0 / 32768.0, -1.0]);
}

// ---------------------------------------------------------------------------
// Error paths
// ---------------------------------------------------------------------------

#[test]
fn wav_missing_file_is_error() {
    let err = read_wav("/nonexistent/definitely_missing.wav").unwrap_err();
    assert!(matches!(err, Error::Wav(_) | Error::Io(_)));
}

#[test]
fn wav_write_without_channels_is_rejected() {
    let file = NamedTempFile::new().unwrap();
    let err = write_wav(file.path(), &WavData::new(48000, Vec::new()), SampleFormat::Float)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
