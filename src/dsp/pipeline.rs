//! Noise-reduction pipeline
//!
//! Runs the full per-frame state machine:
//!
//! ```text
//! Idle → Transformed → NoiseUpdated → GainApplied → Reconstructed → Idle
//! ```
//!
//! One [`NoiseReducer`] owns all persistent state: the FFT plans, the
//! noise profile and the last-gain snapshot. Frames are processed strictly
//! in order; a frame's transform + tracker update + gain application is an
//! atomic unit of work, and the gain stage reads the profile *after* the
//! same frame's tracker update (the frame contributes to, and is evaluated
//! against, the most current estimate).
//!
//! [`StreamingNoiseReducer`] wraps a reducer with ring buffers for
//! per-sample push/pop use by a capture/playback collaborator.

use ringbuf::{Consumer, Producer, RingBuffer};
use rustfft::num_complex::Complex;

use crate::dsp::framer::Framer;
use crate::dsp::gain::GainStage;
use crate::dsp::noise_tracker::NoiseTracker;
use crate::dsp::params::{DenoiseParams, ParamError};
use crate::dsp::transform::SpectralTransform;

// Ring buffer capacity multiplier relative to frame size.
const RINGBUF_CAP_MULT: usize = 4;

/// Frame-in, frame-out spectral noise reducer.
pub struct NoiseReducer {
    params: DenoiseParams,
    framer: Framer,
    transform: SpectralTransform,
    tracker: NoiseTracker,
    gain: GainStage,

    // Scratch owned by the frame currently in flight.
    spectrum: Vec<Complex<f32>>,
    frame_out: Vec<f32>,
}

impl NoiseReducer {
    pub fn new(fft_size: usize, params: DenoiseParams) -> Result<Self, ParamError> {
        params.validate(fft_size)?;
        Ok(Self {
            framer: Framer::new(fft_size),
            transform: SpectralTransform::new(fft_size),
            tracker: NoiseTracker::new(params.tracked_bins, params.alpha_decay),
            gain: GainStage::new(fft_size, params.suppression_factor, params.noise_floor_gain),
            spectrum: vec![Complex::default(); fft_size],
            frame_out: vec![0.0; fft_size],
            params,
        })
    }

    pub fn with_defaults(fft_size: usize) -> Self {
        // Default parameters are valid for any power-of-two size >= 93 bins;
        // clamp the tracked range to the transform size to keep that true.
        let mut params = DenoiseParams::default();
        params.tracked_bins = params.tracked_bins.min(fft_size);
        Self::new(fft_size, params).expect("default parameters are in range")
    }

    pub fn fft_size(&self) -> usize {
        self.transform.size()
    }

    pub fn params(&self) -> &DenoiseParams {
        &self.params
    }

    /// Validate and install a new parameter bundle.
    ///
    /// On rejection the previous configuration stays in effect. A change
    /// of `tracked_bins` resizes the noise profile and therefore forces a
    /// profile reset; all other changes leave the learned profile intact —
    /// callers decide when a new audio source warrants a [`reset`].
    ///
    /// [`reset`]: NoiseReducer::reset
    pub fn configure(&mut self, params: DenoiseParams) -> Result<(), ParamError> {
        params.validate(self.transform.size())?;

        if params.tracked_bins != self.params.tracked_bins {
            log::debug!(
                "tracked range changed ({} -> {} bins), noise profile reset",
                self.params.tracked_bins,
                params.tracked_bins
            );
            self.tracker = NoiseTracker::new(params.tracked_bins, params.alpha_decay);
        } else {
            self.tracker.set_alpha_decay(params.alpha_decay);
        }
        self.gain
            .set_params(params.suppression_factor, params.noise_floor_gain);
        self.params = params;
        Ok(())
    }

    /// Reinitialize the noise profile to its high-initial state and clear
    /// the last-gain snapshot. Use when a new audio source begins.
    pub fn reset(&mut self) {
        log::debug!("noise profile reset");
        self.tracker.reset();
        self.gain.reset();
    }

    /// Process one frame of exactly `fft_size` samples and return the
    /// reconstructed frame. The returned slice is valid until the next
    /// call. Always produces output for a well-formed frame.
    pub fn process_frame(&mut self, frame: &[f32]) -> &[f32] {
        assert!(
            frame.len() == self.transform.size(),
            "frame length must equal the configured FFT size"
        );

        self.transform.forward(frame, &mut self.spectrum);
        self.tracker.update(&self.spectrum);
        self.gain.apply(&mut self.spectrum, self.tracker.profile());
        self.transform.inverse(&mut self.spectrum, &mut self.frame_out);
        &self.frame_out
    }

    /// Frame an entire sample buffer and process it front to back. The
    /// final partial frame is zero-padded; output length is the padded
    /// length (a whole number of frames).
    pub fn process_stream(&mut self, samples: &[f32]) -> Vec<f32> {
        let n = self.transform.size();
        let mut out = Vec::with_capacity(self.framer.frame_count(samples.len()) * n);
        let framer = self.framer;
        for frame in framer.frames(samples) {
            out.extend_from_slice(self.process_frame(&frame));
        }
        out
    }

    /// Read-only snapshot of the tracked noise estimates, for external
    /// inspection or logging.
    pub fn noise_profile(&self) -> &[f32] {
        self.tracker.profile().as_slice()
    }

    /// Per-bin gains applied to the last frame, indices 0..=N/2.
    pub fn last_gains(&self) -> &[f32] {
        self.gain.last_gains()
    }
}

/// Sample-at-a-time wrapper around [`NoiseReducer`] for real-time
/// capture/playback collaborators.
///
/// Input samples accumulate in a ring until a full frame is available; the
/// frame is then processed as one unit and its output queued. The output
/// ring is primed with one frame of zeros, so `pop_output` always has a
/// sample to hand back at a fixed one-frame latency.
pub struct StreamingNoiseReducer {
    reducer: NoiseReducer,

    input_producer: Producer<f32>,
    input_consumer: Consumer<f32>,
    output_producer: Producer<f32>,
    output_consumer: Consumer<f32>,

    frame_in: Vec<f32>,
    frame_size: usize,
}

impl StreamingNoiseReducer {
    pub fn new(reducer: NoiseReducer) -> Self {
        let frame_size = reducer.fft_size();
        let buf_cap = frame_size * RINGBUF_CAP_MULT;
        let (in_prod, in_cons) = RingBuffer::<f32>::new(buf_cap).split();
        let (out_prod, out_cons) = RingBuffer::<f32>::new(buf_cap).split();

        // Prime output with zeros
        let mut out_prod = out_prod;
        for _ in 0..frame_size {
            let _ = out_prod.push(0.0);
        }

        Self {
            reducer,
            input_producer: in_prod,
            input_consumer: in_cons,
            output_producer: out_prod,
            output_consumer: out_cons,
            frame_in: vec![0.0; frame_size],
            frame_size,
        }
    }

    pub fn reducer(&self) -> &NoiseReducer {
        &self.reducer
    }

    pub fn reducer_mut(&mut self) -> &mut NoiseReducer {
        &mut self.reducer
    }

    /// Push one input sample and pop one cleaned sample, at one frame of
    /// latency.
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let _ = self.input_producer.push(input);

        if self.input_consumer.len() >= self.frame_size {
            for (i, v) in self
                .input_consumer
                .iter()
                .take(self.frame_size)
                .enumerate()
            {
                self.frame_in[i] = *v;
            }
            self.input_consumer.discard(self.frame_size);

            let out = self.reducer.process_frame(&self.frame_in);
            for &v in out {
                let _ = self.output_producer.push(v);
            }
        }

        self.output_consumer.pop().unwrap_or(0.0)
    }

    /// Drop buffered audio and re-prime the latency, keeping the learned
    /// noise profile. Use on transport stop/start.
    pub fn flush(&mut self) {
        while self.input_consumer.pop().is_some() {}
        while self.output_consumer.pop().is_some() {}
        for _ in 0..self.frame_size {
            let _ = self.output_producer.push(0.0);
        }
    }
}
