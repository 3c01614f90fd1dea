//! Generate the standard evaluation dataset: synthetic noise WAVs, a chirp
//! test tone, and (given a clean speech WAV) speech+noise mixtures at the
//! standard SNR levels.
//!
//! Usage: make-dataset [output-dir] [clean-speech.wav]

use anyhow::{Context, Result};
use clearwave::dataset::{
    chirp, loop_to_length, mix_at_snr, noise, resample_linear, wav, NoiseKind, SAMPLE_RATE,
    SNR_LEVELS_DB,
};
use std::path::PathBuf;

const NOISE_DURATION_SECS: f32 = 10.0;
// Cap speech material used in mixtures.
const MAX_SPEECH_SECS: u32 = 10;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test-audio-dataset"));
    let speech_path = args.next().map(PathBuf::from);

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create '{}'", output_dir.display()))?;
    println!("Output directory: {}/", output_dir.display());

    // Synthetic background noise
    let num_samples = (SAMPLE_RATE as f32 * NOISE_DURATION_SECS) as usize;
    let mut rng = rand::rng();
    let mut noise_files = Vec::new();
    for kind in NoiseKind::ALL {
        let path = output_dir.join(format!("noise_{}.wav", kind.name()));
        let samples = noise(kind, num_samples, &mut rng);
        wav::write_mono(&path, &samples, SAMPLE_RATE)?;
        println!("  wrote {}", path.display());
        noise_files.push((kind, samples));
    }

    // Chirp reference tone (200 Hz -> 2000 Hz sweep)
    let chirp_path = output_dir.join("chirp.wav");
    wav::write_mono(&chirp_path, &chirp(SAMPLE_RATE, 3.0, 200.0, 2000.0), SAMPLE_RATE)?;
    println!("  wrote {}", chirp_path.display());

    // Speech + noise mixtures
    let Some(speech_path) = speech_path else {
        println!("No clean speech WAV given; skipping SNR mixtures.");
        return Ok(());
    };

    let (speech, rate) = wav::read_mono(&speech_path)?;
    let mut speech = resample_linear(&speech, rate, SAMPLE_RATE);
    speech.truncate((SAMPLE_RATE * MAX_SPEECH_SECS) as usize);
    println!(
        "Loaded speech: {} ({:.2}s)",
        speech_path.display(),
        speech.len() as f32 / SAMPLE_RATE as f32
    );

    for (kind, noise_samples) in &noise_files {
        let looped = loop_to_length(noise_samples, speech.len());
        for snr_db in SNR_LEVELS_DB {
            let mixed = mix_at_snr(&speech, &looped, snr_db);
            let path = output_dir.join(format!("mixed_{}_snr{}db.wav", kind.name(), snr_db as i32));
            wav::write_mono(&path, &mixed, SAMPLE_RATE)?;
            println!("  wrote {}", path.display());
        }
    }

    let clean_path = output_dir.join("speech_clean.wav");
    wav::write_mono(&clean_path, &speech, SAMPLE_RATE)?;
    println!("  wrote {}", clean_path.display());

    Ok(())
}
