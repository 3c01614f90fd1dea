//! Run the noise-reduction pipeline over a WAV file.
//!
//! Usage: denoise-wav <input.wav> [output.wav] [suppression-factor]

use anyhow::{Context, Result};
use clearwave::dataset::wav;
use clearwave::dsp::utils::frame_rms;
use clearwave::{DenoiseParams, NoiseReducer};
use std::path::PathBuf;

const FFT_SIZE: usize = 1024;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .context("usage: denoise-wav <input.wav> [output.wav] [suppression-factor]")?;
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("cleaned.wav"));

    let mut params = DenoiseParams::default();
    if let Some(arg) = args.next() {
        params.suppression_factor = arg
            .parse()
            .with_context(|| format!("invalid suppression factor '{}'", arg))?;
    }

    let (samples, sample_rate) = wav::read_mono(&input)?;
    let mut reducer = NoiseReducer::new(FFT_SIZE, params)
        .context("invalid denoiser parameters")?;

    let mut cleaned = reducer.process_stream(&samples);
    cleaned.truncate(samples.len());

    wav::write_mono(&output, &cleaned, sample_rate)?;

    println!("Denoise summary for '{}':", input.display());
    println!("  samples processed : {}", samples.len());
    println!("  input RMS         : {:.6}", frame_rms(&samples));
    println!("  output RMS        : {:.6}", frame_rms(&cleaned));
    println!("  written to        : {}", output.display());
    Ok(())
}
