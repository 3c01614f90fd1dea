pub mod framer;
pub mod gain;
pub mod noise_tracker;
pub mod params;
pub mod pipeline;
pub mod transform;
pub mod utils;

pub use framer::Framer;
pub use gain::GainStage;
pub use noise_tracker::{NoiseProfile, NoiseTracker};
pub use params::{DenoiseParams, DenoisePreset, ParamError};
pub use pipeline::{NoiseReducer, StreamingNoiseReducer};
pub use transform::SpectralTransform;
