//! WAV file I/O: the external collaborator boundary. Reads any 16-bit PCM
//! WAV (any channel count, averaged down to mono) and writes 16-bit PCM
//! mono WAV.

use std::path::Path;

use crate::error::StegoError;

/// Read a WAV file, averaging all channels into a single mono `f32` stream
/// in `[-1.0, 1.0]`.
///
/// # Returns
/// `(samples, sample_rate)` - mono samples and the file's native sample rate
pub fn read_mono_pcm(path: &Path) -> Result<(Vec<f32>, u32), StegoError> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| StegoError::InputError(format!("failed to open {}: {e}", path.display())))?;

    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    let sample_rate = spec.sample_rate;

    // Int and float PCM normalise to [-1.0, 1.0] differently: integer
    // samples need dividing by their full-scale peak, float samples are
    // already in range. Keep the two paths separate rather than funnelling
    // both through one buffer and one peak constant.
    let normalized: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let peak = match spec.bits_per_sample {
                8 => i8::MAX as f32,
                16 => i16::MAX as f32,
                24 => 8_388_607.0, // 2^23 - 1
                32 => i32::MAX as f32,
                other => {
                    return Err(StegoError::InputError(format!(
                        "unsupported bits_per_sample: {other}"
                    )))
                }
            };
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / peak))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StegoError::InputError(format!("malformed PCM samples: {e}")))?
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StegoError::InputError(format!("malformed float samples: {e}")))?,
    };

    if normalized.is_empty() {
        return Err(StegoError::InputError(format!(
            "{} contains no audio samples",
            path.display()
        )));
    }

    let frame_count = normalized.len() / channels;
    let mut mono = Vec::with_capacity(frame_count);
    for frame in normalized.chunks(channels) {
        let sum: f32 = frame.iter().sum();
        mono.push(sum / channels as f32);
    }

    Ok((mono, sample_rate))
}

/// Write `samples` as a 16-bit PCM mono WAV file at `sample_rate`.
pub fn write_mono_pcm(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), StegoError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| StegoError::InputError(format!("failed to create {}: {e}", path.display())))?;

    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let sample_i16 = (clamped * i16::MAX as f32) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| StegoError::InputError(format!("failed to write sample: {e}")))?;
    }

    writer
        .finalize()
        .map_err(|e| StegoError::InputError(format!("failed to finalize {}: {e}", path.display())))?;

    Ok(())
}
