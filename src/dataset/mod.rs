//! Test-material generation for noise-reduction evaluation.
//!
//! Synthesizes background noise and reference tones, mixes clean speech
//! with noise at chosen signal-to-noise ratios, and reads/writes 16-bit
//! mono WAV files. Everything here is offline tooling; nothing in the
//! per-frame processing path depends on it.

pub mod mix;
pub mod synth;
pub mod wav;

pub use mix::{loop_to_length, mix_at_snr, resample_linear, trim_or_pad};
pub use synth::{chirp, noise, tone, NoiseKind};

/// SNR levels (dB) used for the standard evaluation mix matrix.
pub const SNR_LEVELS_DB: [f32; 5] = [0.0, 5.0, 10.0, 15.0, 20.0];

/// Sample rate of all generated material.
pub const SAMPLE_RATE: u32 = 44_100;
