//! `receiver <file.wav>` — acquire, demodulate, verify and decrypt a
//! recorded WAV file, printing diagnostics and the recovered plaintext.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::{info, LevelFilter};

use stego_audio::{keymaterial, wav, DEFAULT_IV, DEFAULT_KEY};

#[derive(Parser)]
#[command(about = "Recover an encrypted text message from a recorded WAV file")]
struct Args {
    /// WAV file to decode.
    file: PathBuf,

    /// Override the demo AES-256 key (64 hex chars).
    #[arg(long)]
    key_hex: Option<String>,

    /// Override the demo CTR IV (32 hex chars).
    #[arg(long)]
    iv_hex: Option<String>,

    /// Raise log verbosity to debug.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let key = match args.key_hex {
        Some(hex) => keymaterial::parse_key_hex(&hex)?,
        None => DEFAULT_KEY,
    };
    let iv = match args.iv_hex {
        Some(hex) => keymaterial::parse_iv_hex(&hex)?,
        None => DEFAULT_IV,
    };

    let (samples, sample_rate) = wav::read_mono_pcm(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let (plaintext, diag) = stego_audio::decode_message(&samples, sample_rate, &key, &iv)
        .context("decoding message")?;

    info!(
        "acquisition: coarse_offset={} coarse_score={}/{} invert={} frame_start={} ciphertext_len={}",
        diag.coarse_offset, diag.coarse_score, diag.pre_bits, diag.invert, diag.frame_start, diag.ciphertext_len
    );

    let text = String::from_utf8_lossy(&plaintext);
    println!("{text}");

    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    let default_level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    pretty_env_logger::formatted_builder()
        .filter_level(default_level)
        .parse_env("RUST_LOG")
        .init();

    if let Err(err) = run(args) {
        eprintln!("receiver: {err:#}");
        std::process::exit(1);
    }
}
