//! Pipeline parameters: validation, defaults and factory presets.
//!
//! A parameter bundle is immutable for the duration of a frame; it is only
//! swapped between frames through [`crate::dsp::NoiseReducer::configure`],
//! which rejects out-of-range values and keeps the previous bundle intact
//! on rejection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Speech-relevant tracking cutoff used for the default tracked range.
pub const DEFAULT_TRACKED_CUTOFF_HZ: f32 = 4000.0;
/// Reference sample rate for the default tracked range.
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;
/// Default FFT size.
pub const DEFAULT_FFT_SIZE: usize = 1024;

/// Parameter out of its valid range, rejected at configure time.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("alpha_decay must be in (0, 1), got {0}")]
    AlphaDecay(f32),
    #[error("suppression_factor must be >= 0, got {0}")]
    SuppressionFactor(f32),
    #[error("noise_floor_gain must be in [0, 1], got {0}")]
    NoiseFloorGain(f32),
    #[error("tracked_bins must be in 1..={fft_size}, got {tracked_bins}")]
    TrackedBins { tracked_bins: usize, fft_size: usize },
}

/// Configuration bundle for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DenoiseParams {
    /// Upward relaxation rate of the noise estimate, per frame. In (0, 1).
    pub alpha_decay: f32,
    /// Over-subtraction aggressiveness. 0 disables suppression entirely.
    pub suppression_factor: f32,
    /// Minimum allowed per-bin gain, in [0, 1].
    pub noise_floor_gain: f32,
    /// Number of low-frequency bins with a tracked noise estimate (M ≤ N).
    pub tracked_bins: usize,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            alpha_decay: 0.01,
            suppression_factor: 1.0,
            noise_floor_gain: 0.1,
            tracked_bins: tracked_bins_for_cutoff(
                DEFAULT_TRACKED_CUTOFF_HZ,
                DEFAULT_SAMPLE_RATE,
                DEFAULT_FFT_SIZE,
            ),
        }
    }
}

impl DenoiseParams {
    /// Validate every field against its range and the transform size.
    pub fn validate(&self, fft_size: usize) -> Result<(), ParamError> {
        if !(self.alpha_decay > 0.0 && self.alpha_decay < 1.0) {
            return Err(ParamError::AlphaDecay(self.alpha_decay));
        }
        if !(self.suppression_factor >= 0.0) {
            return Err(ParamError::SuppressionFactor(self.suppression_factor));
        }
        if !(0.0..=1.0).contains(&self.noise_floor_gain) {
            return Err(ParamError::NoiseFloorGain(self.noise_floor_gain));
        }
        if self.tracked_bins == 0 || self.tracked_bins > fft_size {
            return Err(ParamError::TrackedBins {
                tracked_bins: self.tracked_bins,
                fft_size,
            });
        }
        Ok(())
    }
}

/// Number of bins needed to cover `cutoff_hz` at the given sample rate and
/// transform size. 4000 Hz at 44.1 kHz with N = 1024 gives 93 bins (0..=92).
pub fn tracked_bins_for_cutoff(cutoff_hz: f32, sample_rate: f32, fft_size: usize) -> usize {
    assert!(sample_rate > 0.0, "sample_rate must be > 0");
    let bin_width = sample_rate / fft_size as f32;
    ((cutoff_hz / bin_width).ceil() as usize).clamp(1, fft_size)
}

/// Factory presets for common cleanup scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenoisePreset {
    #[serde(rename = "Gentle")]
    Gentle,
    #[serde(rename = "Standard")]
    Standard,
    #[serde(rename = "Aggressive")]
    Aggressive,
}

impl DenoisePreset {
    pub fn name(&self) -> &'static str {
        match self {
            DenoisePreset::Gentle => "Gentle",
            DenoisePreset::Standard => "Standard",
            DenoisePreset::Aggressive => "Aggressive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DenoisePreset::Gentle => "Light touch for mostly clean recordings",
            DenoisePreset::Standard => "Balanced suppression for typical room noise",
            DenoisePreset::Aggressive => "Heavy cleanup for noisy field recordings",
        }
    }

    pub fn params(&self) -> DenoiseParams {
        let base = DenoiseParams::default();
        match self {
            DenoisePreset::Gentle => DenoiseParams {
                alpha_decay: 0.02,
                suppression_factor: 0.7,
                noise_floor_gain: 0.25,
                ..base
            },
            DenoisePreset::Standard => base,
            DenoisePreset::Aggressive => DenoiseParams {
                alpha_decay: 0.005,
                suppression_factor: 2.0,
                noise_floor_gain: 0.02,
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        let params = DenoiseParams::default();
        assert!(params.validate(DEFAULT_FFT_SIZE).is_ok());
        assert_eq!(params.tracked_bins, 93);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let base = DenoiseParams::default();
        let n = DEFAULT_FFT_SIZE;

        assert!(matches!(
            DenoiseParams { alpha_decay: 0.0, ..base }.validate(n),
            Err(ParamError::AlphaDecay(_))
        ));
        assert!(matches!(
            DenoiseParams { alpha_decay: 1.0, ..base }.validate(n),
            Err(ParamError::AlphaDecay(_))
        ));
        assert!(matches!(
            DenoiseParams { suppression_factor: -0.1, ..base }.validate(n),
            Err(ParamError::SuppressionFactor(_))
        ));
        assert!(matches!(
            DenoiseParams { noise_floor_gain: 1.5, ..base }.validate(n),
            Err(ParamError::NoiseFloorGain(_))
        ));
        assert!(matches!(
            DenoiseParams { tracked_bins: 0, ..base }.validate(n),
            Err(ParamError::TrackedBins { .. })
        ));
        assert!(matches!(
            DenoiseParams { tracked_bins: n + 1, ..base }.validate(n),
            Err(ParamError::TrackedBins { .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let base = DenoiseParams::default();
        assert!(DenoiseParams { alpha_decay: f32::NAN, ..base }
            .validate(DEFAULT_FFT_SIZE)
            .is_err());
        assert!(DenoiseParams { suppression_factor: f32::NAN, ..base }
            .validate(DEFAULT_FFT_SIZE)
            .is_err());
    }

    #[test]
    fn test_presets_valid() {
        for preset in [
            DenoisePreset::Gentle,
            DenoisePreset::Standard,
            DenoisePreset::Aggressive,
        ] {
            assert!(preset.params().validate(DEFAULT_FFT_SIZE).is_ok(), "{}", preset.name());
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let params = DenoisePreset::Aggressive.params();
        let json = serde_json::to_string(&params).unwrap();
        let back: DenoiseParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
