//! SNR mixing and length/rate adaptation for evaluation material.

use crate::dsp::utils::frame_rms;

/// Mix speech with noise at the given SNR (dB), clamping the sum to full
/// scale. The noise buffer must be at least as long as the speech buffer.
///
/// `snr = 20·log10(speech_rms / noise_rms)`, so the noise is scaled by
/// `speech_rms / (noise_rms · 10^(snr/20))`.
pub fn mix_at_snr(speech: &[f32], noise: &[f32], snr_db: f32) -> Vec<f32> {
    assert!(noise.len() >= speech.len(), "noise shorter than speech");

    let speech_rms = frame_rms(speech);
    let noise_rms = frame_rms(&noise[..speech.len()]);

    let snr_linear = 10.0f32.powf(snr_db / 20.0);
    let noise_scale = if noise_rms > 0.0 {
        speech_rms / (noise_rms * snr_linear)
    } else {
        0.0
    };

    speech
        .iter()
        .zip(noise.iter())
        .map(|(&s, &n)| (s + n * noise_scale).clamp(-1.0, 1.0))
        .collect()
}

/// Resample by linear interpolation. Good enough for test material; not a
/// production resampler.
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let new_len = (samples.len() as f64 * ratio) as usize;
    (0..new_len)
        .map(|i| {
            let src = i as f64 / ratio;
            let lo = src as usize;
            let hi = (lo + 1).min(samples.len() - 1);
            let frac = (src - lo as f64) as f32;
            samples[lo] * (1.0 - frac) + samples[hi] * frac
        })
        .collect()
}

/// Repeat `samples` until `target_len`, truncating the last repetition.
pub fn loop_to_length(samples: &[f32], target_len: usize) -> Vec<f32> {
    assert!(!samples.is_empty(), "cannot loop an empty buffer");
    if samples.len() >= target_len {
        return samples[..target_len].to_vec();
    }
    let mut out = Vec::with_capacity(target_len);
    while out.len() < target_len {
        let remaining = target_len - out.len();
        out.extend_from_slice(&samples[..remaining.min(samples.len())]);
    }
    out
}

/// Truncate or zero-pad to `target_len`.
pub fn trim_or_pad(samples: &[f32], target_len: usize) -> Vec<f32> {
    let mut out = samples.to_vec();
    out.resize(target_len, 0.0);
    out.truncate(target_len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::synth::{tone, NoiseKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn measured_snr_db(speech: &[f32], mixed: &[f32]) -> f32 {
        let residual: Vec<f32> = mixed.iter().zip(speech.iter()).map(|(m, s)| m - s).collect();
        20.0 * (frame_rms(speech) / frame_rms(&residual)).log10()
    }

    #[test]
    fn test_mix_hits_requested_snr() {
        let mut rng = StdRng::seed_from_u64(11);
        let speech = tone(44_100, 0.5, 440.0, 0.3);
        let noise = crate::dataset::synth::noise(NoiseKind::White, speech.len(), &mut rng);

        for snr_db in [0.0f32, 10.0, 20.0] {
            let mixed = mix_at_snr(&speech, &noise, snr_db);
            let measured = measured_snr_db(&speech, &mixed);
            // Clipping in the mix can nudge the achieved SNR slightly.
            assert!(
                (measured - snr_db).abs() < 1.0,
                "requested {} dB, measured {} dB",
                snr_db,
                measured
            );
        }
    }

    #[test]
    fn test_mix_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(12);
        let speech = tone(44_100, 0.2, 300.0, 0.9);
        let noise = crate::dataset::synth::noise(NoiseKind::White, speech.len(), &mut rng);
        let mixed = mix_at_snr(&speech, &noise, 0.0);
        assert!(mixed.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_resample_identity_and_length() {
        let samples = tone(44_100, 0.1, 500.0, 0.5);
        assert_eq!(resample_linear(&samples, 44_100, 44_100), samples);

        let up = resample_linear(&samples, 22_050, 44_100);
        assert_eq!(up.len(), samples.len() * 2);
    }

    #[test]
    fn test_loop_to_length() {
        let samples = [1.0, 2.0, 3.0];
        assert_eq!(loop_to_length(&samples, 7), vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
        assert_eq!(loop_to_length(&samples, 2), vec![1.0, 2.0]);
    }

    #[test]
    fn test_trim_or_pad() {
        let samples = [1.0, 2.0];
        assert_eq!(trim_or_pad(&samples, 4), vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(trim_or_pad(&samples, 1), vec![1.0]);
    }
}
