//! 16-bit mono WAV reading and writing via hound.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Read a WAV file as normalized mono samples, averaging channels.
/// Returns the samples and the file's sample rate. Only 16-bit integer
/// PCM is supported.
pub fn read_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let reader = WavReader::open(path)
        .with_context(|| format!("failed to open WAV '{}'", path.display()))?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        anyhow::bail!(
            "'{}': only 16-bit integer WAV is supported",
            path.display()
        );
    }

    let channels = spec.channels as usize;
    let mut samples = Vec::new();
    let mut frame_sum = 0.0f32;
    let mut in_frame = 0usize;
    for sample in reader.into_samples::<i16>() {
        let sample = sample.with_context(|| format!("failed to read '{}'", path.display()))?;
        frame_sum += sample as f32 / 32768.0;
        in_frame += 1;
        if in_frame == channels {
            samples.push(frame_sum / channels as f32);
            frame_sum = 0.0;
            in_frame = 0;
        }
    }

    Ok((samples, spec.sample_rate))
}

/// Write normalized mono samples as 16-bit PCM, clamping to full scale.
pub fn write_mono(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create WAV '{}'", path.display()))?;
    for &sample in samples {
        let pcm = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        writer.write_sample(pcm)?;
    }
    writer
        .finalize()
        .with_context(|| format!("failed to finalize WAV '{}'", path.display()))?;
    Ok(())
}
