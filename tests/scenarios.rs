//! End-to-end scenarios against the compiled `sender`/`receiver` binaries,
//! mirroring the testable-properties scenario table: clean round trip,
//! polarity inversion, leading silence, single-byte corruption and
//! pure-silence rejection.

use std::path::PathBuf;
use std::process::Command;

use stego_audio::wav;

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("stego_audio_scenario_{}_{}.wav", std::process::id(), name));
    path
}

fn run_sender(message: &str, out: &PathBuf) {
    let status = Command::new(env!("CARGO_BIN_EXE_sender"))
        .arg(message)
        .arg("--out")
        .arg(out)
        .status()
        .expect("failed to run sender");
    assert!(status.success(), "sender exited with failure for {message:?}");
}

fn run_receiver(file: &PathBuf) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_receiver"))
        .arg(file)
        .output()
        .expect("failed to run receiver");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn scenario_1_hello_round_trips() {
    let out = unique_path("hello");
    run_sender("hello", &out);
    let (ok, stdout, _stderr) = run_receiver(&out);
    assert!(ok);
    assert_eq!(stdout, "hello");
    let _ = std::fs::remove_file(&out);
}

#[test]
fn scenario_2_lorem_ipsum_round_trips() {
    let message = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
        tempor incididunt ut labore et dolore magna aliqua ut enim ad minim veniam \
        quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
        consequat duis aute irure dolor in reprehenderit in voluptate velit esse \
        cillum dolore eu fugiat nulla pariatur excepteur sint occaecat cupidatat \
        non proident sunt in culpa qui officia deserunt mollit anim id est laborum";
    let out = unique_path("lorem");
    run_sender(message, &out);
    let (ok, stdout, _stderr) = run_receiver(&out);
    assert!(ok);
    assert_eq!(stdout, message);
    let _ = std::fs::remove_file(&out);
}

#[test]
fn scenario_3_inverted_polarity_still_decodes() {
    let out = unique_path("invert");
    run_sender("hi", &out);

    let (samples, rate) = wav::read_mono_pcm(&out).unwrap();
    let inverted: Vec<f32> = samples.iter().map(|s| -s).collect();
    wav::write_mono_pcm(&out, &inverted, rate).unwrap();

    let (ok, stdout, _stderr) = run_receiver(&out);
    assert!(ok);
    assert_eq!(stdout, "hi");
    let _ = std::fs::remove_file(&out);
}

#[test]
fn scenario_4_leading_silence_still_decodes() {
    let out = unique_path("silence_prefix");
    run_sender("hi", &out);

    let (samples, rate) = wav::read_mono_pcm(&out).unwrap();
    let mut padded = vec![0.0f32; rate as usize / 2]; // 0.5s of zeros
    padded.extend_from_slice(&samples);
    wav::write_mono_pcm(&out, &padded, rate).unwrap();

    let (ok, stdout, _stderr) = run_receiver(&out);
    assert!(ok);
    assert_eq!(stdout, "hi");
    let _ = std::fs::remove_file(&out);
}

#[test]
fn scenario_5_corrupted_frame_byte_yields_crc_mismatch() {
    use stego_audio::config::SAMPLE_RATE_TX;
    use stego_audio::frame::build_frame;
    use stego_audio::modulator::modulate;
    use stego_audio::config::LinkParams;
    use stego_audio::crypto;
    use stego_audio::{DEFAULT_IV, DEFAULT_KEY};

    let ciphertext = crypto::encrypt(&DEFAULT_KEY, &DEFAULT_IV, b"hi");
    let mut frame = build_frame(&ciphertext).unwrap();
    frame[12] ^= 0xFF;
    let params = LinkParams::new(SAMPLE_RATE_TX).unwrap();
    let samples = modulate(&frame, &params, None);

    let out = unique_path("corrupt");
    wav::write_mono_pcm(&out, &samples, SAMPLE_RATE_TX).unwrap();

    let (ok, _stdout, stderr) = run_receiver(&out);
    assert!(!ok);
    assert!(stderr.to_lowercase().contains("crc"), "stderr was: {stderr}");
    let _ = std::fs::remove_file(&out);
}

#[test]
fn scenario_6_pure_silence_fails_to_acquire() {
    let out = unique_path("pure_silence");
    let silence = vec![0.0f32; 44_100 * 10];
    wav::write_mono_pcm(&out, &silence, 44_100).unwrap();

    let (ok, _stdout, stderr) = run_receiver(&out);
    assert!(!ok);
    let lower = stderr.to_lowercase();
    assert!(
        lower.contains("sync") || lower.contains("magic"),
        "stderr was: {stderr}"
    );
    let _ = std::fs::remove_file(&out);
}
