//! Synthetic signal generators: white/pink/brown noise, chirps and tones.
//!
//! The pink noise filter is Paul Kellet's three-pole approximation; brown
//! noise is integrated white noise clamped to full scale.

use rand::Rng;
use std::f32::consts::PI;

/// Background noise color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    /// Equal power at all frequencies.
    White,
    /// 1/f spectrum, natural background.
    Pink,
    /// 1/f² spectrum, deep rumble.
    Brown,
}

impl NoiseKind {
    pub const ALL: [NoiseKind; 3] = [NoiseKind::White, NoiseKind::Pink, NoiseKind::Brown];

    pub fn name(&self) -> &'static str {
        match self {
            NoiseKind::White => "white",
            NoiseKind::Pink => "pink",
            NoiseKind::Brown => "brown",
        }
    }
}

/// Generate `num_samples` of noise in [-1, 1].
pub fn noise<R: Rng>(kind: NoiseKind, num_samples: usize, rng: &mut R) -> Vec<f32> {
    match kind {
        NoiseKind::White => (0..num_samples).map(|_| rng.random_range(-1.0..1.0)).collect(),
        NoiseKind::Pink => {
            let mut out = Vec::with_capacity(num_samples);
            let (mut b0, mut b1, mut b2) = (0.0f32, 0.0f32, 0.0f32);
            for _ in 0..num_samples {
                let white: f32 = rng.random_range(-1.0..1.0);
                b0 = 0.99765 * b0 + white * 0.0990460;
                b1 = 0.96300 * b1 + white * 0.2965164;
                b2 = 0.57000 * b2 + white * 1.0526913;
                out.push((b0 + b1 + b2 + white * 0.1848) / 5.0);
            }
            out
        }
        NoiseKind::Brown => {
            let mut out = Vec::with_capacity(num_samples);
            let mut last = 0.0f32;
            for _ in 0..num_samples {
                let white: f32 = rng.random_range(-0.02..0.02);
                last = (last + white).clamp(-1.0, 1.0);
                out.push(last);
            }
            out
        }
    }
}

/// Linear frequency sweep from `start_freq` to `end_freq` at 0.5 amplitude.
pub fn chirp(sample_rate: u32, duration_secs: f32, start_freq: f32, end_freq: f32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let freq = start_freq + (end_freq - start_freq) * (t / duration_secs);
            0.5 * (2.0 * PI * freq * t).sin()
        })
        .collect()
}

/// Pure sine tone.
pub fn tone(sample_rate: u32, duration_secs: f32, freq: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}
