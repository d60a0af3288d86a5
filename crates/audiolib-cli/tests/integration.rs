//! Integration tests for the `audiolib` binary.
//!
//! Each test writes synthetic WAV files to a temporary directory and runs the
//! CLI against them.

use audiolib_io::{SampleFormat, WavData, read_wav, read_wav_info, write_wav};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `audiolib` binary built by cargo.
fn audiolib_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_audiolib"))
}

/// Run with a settings file inside `dir`, so the user's own settings never apply.
fn run(args: &[&str], dir: &TempDir) -> Output {
    let config = dir.path().join("settings.toml");
    audiolib_bin()
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("failed to run audiolib")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_mono(dir: &TempDir, name: &str, sample_rate: u32, samples: Vec<f64>) -> PathBuf {
    let path = dir.path().join(name);
    write_wav(
        &path,
        &WavData::mono(sample_rate, samples),
        SampleFormat::Pcm { bits: 24 },
    )
    .unwrap();
    path
}

fn noise(len: usize) -> Vec<f64> {
    let mut state = 0x1357_9bdfu32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            0.5 * (state as i32 as f64) / (i32::MAX as f64)
        })
        .collect()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// info
// ---------------------------------------------------------------------------

#[test]
fn cli_info_shows_metadata() {
    let dir = TempDir::new().unwrap();
    let wav = write_mono(&dir, "tone.wav", 48000, vec![0.0; 24000]);

    let output = run(&["info", path_str(&wav)], &dir);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("signed PCM 24-bit"), "got: {out}");
    assert!(out.contains("48 kHz"), "got: {out}");
    assert!(out.contains("500 ms"), "got: {out}");
}

#[test]
fn cli_info_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["info", "/nonexistent/file.wav"], &dir);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// spectrum
// ---------------------------------------------------------------------------

#[test]
fn cli_spectrum_reports_tone_and_writes_csv() {
    let dir = TempDir::new().unwrap();
    let tone: Vec<f64> = (0..8000)
        .map(|i| 0.5 * (2.0 * PI * 1000.0 * i as f64 / 8000.0).sin())
        .collect();
    let wav = write_mono(&dir, "tone.wav", 8000, tone);
    let csv = dir.path().join("spectrum.csv");

    let output = run(
        &["spectrum", path_str(&wav), "--peaks", "1", "-o", path_str(&csv)],
        &dir,
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("1 kHz"));

    let content = std::fs::read_to_string(&csv).unwrap();
    assert!(content.starts_with("frequency_hz,power"));
    assert_eq!(content.lines().count(), 1 + 4001);
}

#[test]
fn cli_spectrum_db_export() {
    let dir = TempDir::new().unwrap();
    let tone: Vec<f64> = (0..8000)
        .map(|i| 0.5 * (2.0 * PI * 1000.0 * i as f64 / 8000.0).sin())
        .collect();
    let wav = write_mono(&dir, "tone.wav", 8000, tone);
    let csv = dir.path().join("spectrum.csv");

    let output = run(&["spectrum", path_str(&wav), "--db", "-o", path_str(&csv)], &dir);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let content = std::fs::read_to_string(&csv).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("frequency_hz,power_db"));
    let tone_db: f64 = lines
        .find(|l| l.starts_with("1000.000000,"))
        .and_then(|l| l.split_once(',')?.1.parse().ok())
        .unwrap();
    // amplitude 0.5 puts (0.5 / 2)^2 in the positive bin
    assert!((tone_db - 10.0 * 0.0625f64.log10()).abs() < 0.1, "{tone_db}");
}

#[test]
fn cli_spectrum_log_axis_from_settings_drops_dc() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.toml"), "x_scale = \"log\"\n").unwrap();
    let wav = write_mono(&dir, "noise.wav", 1000, noise(64));
    let csv = dir.path().join("spectrum.csv");

    let output = run(&["spectrum", path_str(&wav), "-o", path_str(&csv)], &dir);
    assert!(output.status.success());

    let content = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(content.lines().count(), 1 + 32);
    assert!(!content.contains("\n0.000000,"));
}

#[test]
fn cli_spectrum_rejects_missing_channel() {
    let dir = TempDir::new().unwrap();
    let wav = write_mono(&dir, "mono.wav", 8000, vec![0.0; 100]);

    let output = run(&["spectrum", path_str(&wav), "--channel", "1"], &dir);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("channel 1 requested"));
}

// ---------------------------------------------------------------------------
// coherence and ir
// ---------------------------------------------------------------------------

#[test]
fn cli_coherence_of_scaled_copy_is_one() {
    let dir = TempDir::new().unwrap();
    let x = noise(8192);
    let y: Vec<f64> = x.iter().map(|v| 0.5 * v).collect();
    let a = write_mono(&dir, "a.wav", 48000, x);
    let b = write_mono(&dir, "b.wav", 48000, y);
    let csv = dir.path().join("coherence.csv");

    let output = run(
        &[
            "coherence",
            path_str(&a),
            path_str(&b),
            "--block-len",
            "256",
            "-o",
            path_str(&csv),
        ],
        &dir,
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Mean coherence: 1.0000"));
    assert_eq!(
        std::fs::read_to_string(&csv).unwrap().lines().count(),
        1 + 129
    );
}

#[test]
fn cli_coherence_rejects_rate_mismatch() {
    let dir = TempDir::new().unwrap();
    let a = write_mono(&dir, "a.wav", 48000, noise(512));
    let b = write_mono(&dir, "b.wav", 44100, noise(512));

    let output = run(&["coherence", path_str(&a), path_str(&b)], &dir);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sample rates differ"));
}

#[test]
fn cli_ir_finds_delay() {
    let dir = TempDir::new().unwrap();
    let x = noise(16384);
    let mut y = vec![0.0; 10];
    y.extend_from_slice(&x[..x.len() - 10]);
    let input = write_mono(&dir, "in.wav", 1000, x);
    let response = write_mono(&dir, "out.wav", 1000, y);
    let csv = dir.path().join("ir.csv");

    let output = run(
        &[
            "ir",
            path_str(&input),
            path_str(&response),
            "--fft-len",
            "512",
            "--width",
            "0.05",
            "-o",
            path_str(&csv),
        ],
        &dir,
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("at sample 266"), "got: {out}");
    assert!(out.contains("Delay:   10 ms"), "got: {out}");

    let rows = std::fs::read_to_string(&csv).unwrap().lines().count();
    assert_eq!(rows, 1 + 101);
}

#[test]
fn cli_ir_window_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    let x = noise(1024);
    let input = write_mono(&dir, "in.wav", 1000, x.clone());
    let response = write_mono(&dir, "out.wav", 1000, x);

    let output = run(
        &[
            "ir",
            path_str(&input),
            path_str(&response),
            "--fft-len",
            "256",
            "--width",
            "1.0",
        ],
        &dir,
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("outside the available range"));
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

#[test]
fn cli_convert_to_float_and_back() {
    let dir = TempDir::new().unwrap();
    let samples = vec![0.0, 0.25, -0.5, 0.75];
    let src = write_mono(&dir, "src.wav", 44100, samples.clone());
    let float = dir.path().join("float.wav");
    let pcm16 = dir.path().join("pcm16.wav");

    let output = run(&["convert", path_str(&src), path_str(&float), "--float"], &dir);
    assert!(output.status.success());
    let info = read_wav_info(&float).unwrap();
    assert_eq!(info.bits_per_sample, 32);
    assert_eq!(info.format.to_string(), "IEEE float");

    let output = run(
        &["convert", path_str(&float), path_str(&pcm16), "--bits", "16"],
        &dir,
    );
    assert!(output.status.success());
    let data = read_wav(&pcm16).unwrap();
    for (a, b) in data.channels[0].iter().zip(&samples) {
        assert!((a - b).abs() < 1.0 / 32768.0);
    }
}

#[test]
fn cli_convert_uses_settings_bit_depth() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.toml"), "output_bits = 32\n").unwrap();
    let src = write_mono(&dir, "src.wav", 44100, vec![0.1; 16]);
    let out = dir.path().join("out.wav");

    let output = run(&["convert", path_str(&src), path_str(&out)], &dir);
    assert!(output.status.success());
    assert_eq!(read_wav_info(&out).unwrap().bits_per_sample, 32);
}

#[test]
fn cli_convert_to_8_bit_is_not_supported() {
    let dir = TempDir::new().unwrap();
    let src = write_mono(&dir, "src.wav", 8000, vec![0.0; 16]);
    let out = dir.path().join("out.wav");

    let output = run(&["convert", path_str(&src), path_str(&out), "--bits", "8"], &dir);
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn cli_convert_to_12_bit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let src = write_mono(&dir, "src.wav", 8000, vec![0.0; 16]);
    let out = dir.path().join("out.wav");

    let output = run(&["convert", path_str(&src), path_str(&out), "--bits", "12"], &dir);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("supported widths"));
    assert!(!out.exists());
}

#[test]
fn cli_convert_bits_conflicts_with_float() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &["convert", "a.wav", "b.wav", "--bits", "16", "--float"],
        &dir,
    );
    assert!(!output.status.success());
}
