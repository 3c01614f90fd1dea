//! Gain Stage (Spectral Subtraction)
//!
//! Computes a per-bin attenuation from the current frame's magnitude and
//! the tracked noise estimate, and applies it to the complex spectrum
//! in place:
//!
//! ```text
//! clean = max(0, |X[k]| − suppression_factor · noise[k])
//! gain  = max(noise_floor_gain, clean / max(|X[k]|, ε))
//! ```
//!
//! The gain scales real and imaginary parts uniformly; phase is never
//! altered, only magnitude. Gains vary continuously in
//! [noise_floor_gain, 1] — a binary keep/kill mask is a correctness bug
//! here, not a stylistic choice (it produces musical-noise artifacts).
//!
//! Bins outside the tracked sub-range pass through at unity gain: there is
//! no noise estimate for them. Noise above the tracked cutoff is therefore
//! never reduced; a known limitation, kept deliberately.
//!
//! For a real input frame the spectrum is conjugate-symmetric, so bin k
//! and bin N−k carry the same frequency; both receive the gain computed
//! for the lower index, which keeps the reconstructed frame real.

use rustfft::num_complex::Complex;

use crate::dsp::noise_tracker::NoiseProfile;

// Guard against division by near-zero magnitudes.
const EPS: f32 = 1e-9;

/// Per-bin spectral-subtraction gain computation and application.
pub struct GainStage {
    suppression_factor: f32,
    noise_floor_gain: f32,
    // Gains of the last processed frame, one per bin 0..=N/2.
    last_gains: Vec<f32>,
}

impl GainStage {
    pub fn new(fft_size: usize, suppression_factor: f32, noise_floor_gain: f32) -> Self {
        Self {
            suppression_factor,
            noise_floor_gain,
            last_gains: vec![1.0; fft_size / 2 + 1],
        }
    }

    pub fn set_params(&mut self, suppression_factor: f32, noise_floor_gain: f32) {
        self.suppression_factor = suppression_factor;
        self.noise_floor_gain = noise_floor_gain;
    }

    /// Per-bin gains applied to the last frame, indices 0..=N/2.
    pub fn last_gains(&self) -> &[f32] {
        &self.last_gains
    }

    pub fn reset(&mut self) {
        self.last_gains.fill(1.0);
    }

    /// Attenuate `spectrum` in place using the current noise profile.
    ///
    /// The per-bin computation has no cross-bin dependency; it is a pure
    /// map over the bin index.
    pub fn apply(&mut self, spectrum: &mut [Complex<f32>], profile: &NoiseProfile) {
        let n = spectrum.len();
        let nyq = n / 2;
        assert!(self.last_gains.len() == nyq + 1, "spectrum size mismatch");

        let tracked = profile.tracked_bins();
        for bin in 0..=nyq {
            self.last_gains[bin] = if bin < tracked {
                let s = spectrum[bin].norm();
                let noise = profile.estimate(bin);
                let clean = (s - self.suppression_factor * noise).max(0.0);
                (clean / s.max(EPS)).max(self.noise_floor_gain).min(1.0)
            } else {
                // No noise estimate outside the tracked range: pass through.
                1.0
            };
        }

        for bin in 0..n {
            let key = bin.min(n - bin);
            spectrum[bin] *= self.last_gains[key];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::noise_tracker::NoiseTracker;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn settled_tracker(bins: usize, noise_mag: f32) -> NoiseTracker {
        let mut tracker = NoiseTracker::new(bins, 0.01);
        tracker.update(&vec![Complex::new(noise_mag, 0.0); bins]);
        tracker
    }

    #[test]
    fn test_gain_bounded() {
        let n = 64;
        let tracker = settled_tracker(16, 0.2);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let mut stage = GainStage::new(n, 2.5, 0.15);
            let mut spectrum: Vec<Complex<f32>> = (0..n)
                .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
                .collect();
            stage.apply(&mut spectrum, tracker.profile());
            for &g in stage.last_gains() {
                assert!((0.15..=1.0).contains(&g), "gain {} out of bounds", g);
            }
        }
    }

    #[test]
    fn test_zero_suppression_is_identity() {
        let n = 64;
        let tracker = settled_tracker(16, 0.5);
        let mut stage = GainStage::new(n, 0.0, 0.1);

        let original: Vec<Complex<f32>> = (0..n)
            .map(|i| Complex::new((i as f32 * 0.37).sin(), (i as f32 * 0.11).cos()))
            .collect();
        let mut spectrum = original.clone();
        stage.apply(&mut spectrum, tracker.profile());

        for (a, b) in original.iter().zip(spectrum.iter()) {
            assert!((a - b).norm() < 1e-6);
        }
    }

    #[test]
    fn test_phase_preserved() {
        let n = 64;
        let tracker = settled_tracker(32, 0.1);
        let mut stage = GainStage::new(n, 1.0, 0.05);

        let original: Vec<Complex<f32>> = (0..n)
            .map(|i| Complex::new(0.3 * (i as f32).cos(), 0.3 * (i as f32).sin()))
            .collect();
        let mut spectrum = original.clone();
        stage.apply(&mut spectrum, tracker.profile());

        for (a, b) in original.iter().zip(spectrum.iter()) {
            if b.norm() > 1e-6 {
                let phase_diff = (a.arg() - b.arg()).abs();
                assert!(phase_diff < 1e-4, "phase must not change");
            }
        }
    }

    #[test]
    fn test_untracked_bins_pass_through() {
        let n = 64;
        let tracked = 8;
        let tracker = settled_tracker(tracked, 0.4);
        let mut stage = GainStage::new(n, 4.0, 0.0);

        let original: Vec<Complex<f32>> = (0..n).map(|i| Complex::new(0.2 + i as f32 * 1e-3, 0.0)).collect();
        let mut spectrum = original.clone();
        stage.apply(&mut spectrum, tracker.profile());

        // Bins whose folded index lies outside the tracked range are untouched.
        for bin in tracked..=(n - tracked) {
            assert_eq!(spectrum[bin], original[bin]);
            let key = bin.min(n - bin);
            assert_eq!(stage.last_gains()[key], 1.0);
        }
    }

    #[test]
    fn test_gain_is_continuous_not_binary() {
        let n = 64;
        let tracker = settled_tracker(32, 0.1);
        let mut stage = GainStage::new(n, 1.0, 0.0);

        // Magnitudes sweeping through the noise estimate must produce
        // intermediate gains, not a step.
        let mut spectrum: Vec<Complex<f32>> = (0..n)
            .map(|i| Complex::new(0.05 + 0.01 * i as f32, 0.0))
            .collect();
        stage.apply(&mut spectrum, tracker.profile());

        let intermediate = stage.last_gains()[..32]
            .iter()
            .filter(|&&g| g > 0.05 && g < 0.95)
            .count();
        assert!(intermediate > 5, "expected a continuous gain ramp");
    }
}
