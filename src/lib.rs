//! clearwave — frame-based speech noise reduction.
//!
//! A real-time spectral-subtraction pipeline: fixed-size audio frames are
//! transformed to the frequency domain, a per-bin noise floor is tracked
//! with minimum statistics, each bin is attenuated by the estimated noise
//! magnitude, and the cleaned frame is reconstructed.
//!
//! ```
//! use clearwave::dsp::NoiseReducer;
//!
//! let mut reducer = NoiseReducer::with_defaults(1024);
//! let frame = vec![0.0f32; 1024];
//! let cleaned = reducer.process_frame(&frame);
//! assert_eq!(cleaned.len(), 1024);
//! ```
//!
//! The [`dataset`] module and the `make-dataset` / `denoise-wav` tools
//! generate and exercise test material (synthetic noise, SNR mixtures);
//! they are conveniences around the core, not part of the per-frame path.

pub mod dataset;
pub mod dsp;

pub use dsp::{DenoiseParams, DenoisePreset, NoiseReducer, ParamError, StreamingNoiseReducer};
