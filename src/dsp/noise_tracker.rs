//! Noise Tracker (Minimum Statistics)
//!
//! Maintains one adaptive noise-magnitude estimate per tracked frequency
//! bin, updated once per frame:
//!
//! - A magnitude below the current estimate is adopted immediately. Noise
//!   is assumed never louder than the best minimum seen so far.
//! - A magnitude above the estimate relaxes it upward by `alpha_decay` per
//!   frame, so stale minima are slowly forgotten and a rising noise floor
//!   can still be tracked, without jumping on a single loud frame.
//!
//! The instant-down / gradual-up asymmetry is the defining property of
//! minimum-statistics tracking and must hold for every bin.
//!
//! Only a bounded low-frequency sub-range relevant to speech is tracked
//! (`tracked_bins` ≤ transform size). Bins outside that range are never
//! read or written here.

use rustfft::num_complex::Complex;

use crate::dsp::utils::MAG_FLOOR;

/// Initial per-bin estimate, strictly above any physically possible bin
/// magnitude for normalized input. Starting at zero would freeze every
/// estimate there: no magnitude is ever below zero, so the instant-down
/// rule would never fire again.
pub const NOISE_PROFILE_INIT: f32 = 1.0e6;

/// Per-bin noise magnitude estimates for the tracked sub-range.
///
/// Deliberately sized to the tracked range only, not the full spectrum;
/// every accessor validates its bin index at the boundary so an
/// out-of-range bin fails fast instead of silently reading noise data
/// that does not exist.
pub struct NoiseProfile {
    estimates: Box<[f32]>,
}

impl NoiseProfile {
    pub fn new(tracked_bins: usize) -> Self {
        assert!(tracked_bins > 0, "tracked_bins must be > 0");
        Self {
            estimates: vec![NOISE_PROFILE_INIT; tracked_bins].into_boxed_slice(),
        }
    }

    pub fn tracked_bins(&self) -> usize {
        self.estimates.len()
    }

    /// Current estimate for `bin`. Panics when `bin` is outside the
    /// tracked range; that is a caller programming error.
    pub fn estimate(&self, bin: usize) -> f32 {
        assert!(bin < self.estimates.len(), "bin outside tracked range");
        self.estimates[bin]
    }

    fn set(&mut self, bin: usize, value: f32) {
        assert!(bin < self.estimates.len(), "bin outside tracked range");
        self.estimates[bin] = value.max(MAG_FLOOR);
    }

    /// Read-only view of all estimates, for diagnostics.
    pub fn as_slice(&self) -> &[f32] {
        &self.estimates
    }

    pub fn reset(&mut self) {
        self.estimates.fill(NOISE_PROFILE_INIT);
    }
}

/// Owns the persistent [`NoiseProfile`] and applies the minimum-statistics
/// update rule once per frame.
pub struct NoiseTracker {
    profile: NoiseProfile,
    alpha_decay: f32,
}

impl NoiseTracker {
    pub fn new(tracked_bins: usize, alpha_decay: f32) -> Self {
        Self {
            profile: NoiseProfile::new(tracked_bins),
            alpha_decay,
        }
    }

    pub fn profile(&self) -> &NoiseProfile {
        &self.profile
    }

    pub fn set_alpha_decay(&mut self, alpha_decay: f32) {
        self.alpha_decay = alpha_decay;
    }

    /// Update every tracked bin from the current frame's spectrum.
    ///
    /// Per-bin updates are independent of each other; the loop order is
    /// irrelevant and the body could run concurrently across bins.
    pub fn update(&mut self, spectrum: &[Complex<f32>]) {
        let tracked = self.profile.tracked_bins();
        assert!(tracked <= spectrum.len(), "tracked range exceeds spectrum size");

        let alpha = self.alpha_decay;
        for bin in 0..tracked {
            let m = spectrum[bin].norm();
            let est = self.profile.estimate(bin);
            let next = if m < est {
                m
            } else {
                est * (1.0 - alpha) + m * alpha
            };
            self.profile.set(bin, next);
        }
    }

    pub fn reset(&mut self) {
        self.profile.reset();
    }
}
