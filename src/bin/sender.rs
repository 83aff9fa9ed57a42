//! `sender "<message>" [cover.wav]` — encrypt, frame and modulate a text
//! message into `encoded_signal.wav` (or `--out`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::{info, LevelFilter};

use stego_audio::{config, keymaterial, wav, DEFAULT_IV, DEFAULT_KEY};

#[derive(Parser)]
#[command(about = "Transmit an encrypted text message as a BFSK-modulated WAV file")]
struct Args {
    /// Plaintext message to transmit.
    message: String,

    /// Optional cover audio to mix the signal under.
    cover: Option<PathBuf>,

    /// Output WAV path.
    #[arg(long, default_value = "encoded_signal.wav")]
    out: PathBuf,

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

    let cover_samples = match &args.cover {
        Some(path) => {
            let (samples, _rate) = wav::read_mono_pcm(path)
                .with_context(|| format!("reading cover audio {}", path.display()))?;
            Some(samples)
        }
        None => None,
    };

    let samples = stego_audio::encode_message(
        args.message.as_bytes(),
        &key,
        &iv,
        config::SAMPLE_RATE_TX,
        cover_samples.as_deref(),
    )
    .context("encoding message")?;

    wav::write_mono_pcm(&args.out, &samples, config::SAMPLE_RATE_TX)
        .with_context(|| format!("writing {}", args.out.display()))?;

    let duration = samples.len() as f64 / config::SAMPLE_RATE_TX as f64;
    info!(
        "wrote {} ({:.2}s, {} samples at {} Hz)",
        args.out.display(),
        duration,
        samples.len(),
        config::SAMPLE_RATE_TX
    );
    println!("{} ({:.2}s)", args.out.display(), duration);

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
        eprintln!("sender: {err:#}");
        std::process::exit(1);
    }
}
