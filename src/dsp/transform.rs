//! Spectral Transform
//!
//! Forward and inverse FFT of a fixed frame size, planned once and reused
//! every frame. `forward` applies no normalization; `inverse` applies the
//! reciprocal 1/N scaling so that `inverse(forward(x)) ≈ x` up to
//! floating-point rounding.
//!
//! Both directions run in preallocated scratch space, so per-frame
//! processing does not allocate.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Fixed-size forward/inverse FFT pair.
pub struct SpectralTransform {
    size: usize,
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    fft_scratch: Vec<Complex<f32>>,
    ifft_scratch: Vec<Complex<f32>>,
}

impl SpectralTransform {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "transform size must be > 0");
        assert!(size.is_power_of_two(), "transform size must be a power of two");

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);
        let fft_scratch = vec![Complex::default(); fft.get_inplace_scratch_len()];
        let ifft_scratch = vec![Complex::default(); ifft.get_inplace_scratch_len()];

        Self {
            size,
            fft,
            ifft,
            fft_scratch,
            ifft_scratch,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward transform of a real frame into `spectrum`.
    pub fn forward(&mut self, frame: &[f32], spectrum: &mut [Complex<f32>]) {
        assert!(frame.len() == self.size, "frame length must equal transform size");
        assert!(spectrum.len() == self.size, "spectrum length must equal transform size");

        for (out, &x) in spectrum.iter_mut().zip(frame.iter()) {
            *out = Complex::new(x, 0.0);
        }
        self.fft.process_with_scratch(spectrum, &mut self.fft_scratch);
    }

    /// Inverse transform of `spectrum` back into a real frame, with 1/N scaling.
    pub fn inverse(&mut self, spectrum: &mut [Complex<f32>], frame: &mut [f32]) {
        assert!(spectrum.len() == self.size, "spectrum length must equal transform size");
        assert!(frame.len() == self.size, "frame length must equal transform size");

        self.ifft.process_with_scratch(spectrum, &mut self.ifft_scratch);

        let norm = 1.0 / self.size as f32;
        for (out, c) in frame.iter_mut().zip(spectrum.iter()) {
            *out = c.re * norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip_error(n: usize) -> f32 {
        let mut transform = SpectralTransform::new(n);
        let frame: Vec<f32> = (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                0.6 * (2.0 * std::f32::consts::PI * 7.0 * t).sin()
                    + 0.3 * (2.0 * std::f32::consts::PI * 23.0 * t).cos()
            })
            .collect();

        let mut spectrum = vec![Complex::default(); n];
        let mut out = vec![0.0f32; n];
        transform.forward(&frame, &mut spectrum);
        transform.inverse(&mut spectrum, &mut out);

        frame
            .iter()
            .zip(out.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max)
    }

    #[test]
    fn test_round_trip_identity() {
        for n in [64, 256, 1024] {
            assert!(
                round_trip_error(n) < 1e-5,
                "round-trip error too large for N={}",
                n
            );
        }
    }

    #[test]
    fn test_dc_bin() {
        let n = 64;
        let mut transform = SpectralTransform::new(n);
        let frame = vec![0.25f32; n];
        let mut spectrum = vec![Complex::default(); n];
        transform.forward(&frame, &mut spectrum);
        // Unnormalized forward: DC bin carries N * mean
        assert!((spectrum[0].re - 0.25 * n as f32).abs() < 1e-4);
        assert!(spectrum[0].im.abs() < 1e-4);
    }

    #[test]
    #[should_panic(expected = "frame length must equal transform size")]
    fn test_wrong_frame_length_panics() {
        let mut transform = SpectralTransform::new(64);
        let frame = vec![0.0f32; 63];
        let mut spectrum = vec![Complex::default(); 64];
        transform.forward(&frame, &mut spectrum);
    }
}
