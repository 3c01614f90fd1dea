//! Framer
//!
//! Slices a continuous sample stream into fixed-length, non-overlapping
//! frames for the spectral transform. No windowing is applied here; the
//! pipeline operates on rectangular, hop == frame-size blocks.
//!
//! The final frame is zero-padded when the stream length is not a multiple
//! of the frame size. An empty stream yields an empty iterator, not an
//! error.

/// Produces fixed-size frames from a flat sample buffer.
///
/// The iterator returned by [`Framer::frames`] is lazy, finite and
/// restartable: calling `frames()` again starts over from the beginning of
/// the buffer.
#[derive(Debug, Clone, Copy)]
pub struct Framer {
    frame_size: usize,
}

impl Framer {
    pub fn new(frame_size: usize) -> Self {
        assert!(frame_size > 0, "frame_size must be > 0");
        Self { frame_size }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Iterate over non-overlapping frames of `samples`.
    pub fn frames<'a>(&self, samples: &'a [f32]) -> Frames<'a> {
        Frames {
            samples,
            frame_size: self.frame_size,
            pos: 0,
        }
    }

    /// Number of frames `frames()` will yield for a buffer of `len` samples.
    pub fn frame_count(&self, len: usize) -> usize {
        len.div_ceil(self.frame_size)
    }
}

/// Lazy frame iterator over a borrowed sample buffer.
pub struct Frames<'a> {
    samples: &'a [f32],
    frame_size: usize,
    pos: usize,
}

impl Iterator for Frames<'_> {
    type Item = Vec<f32>;

    fn next(&mut self) -> Option<Vec<f32>> {
        if self.pos >= self.samples.len() {
            return None;
        }
        let end = (self.pos + self.frame_size).min(self.samples.len());
        let mut frame = Vec::with_capacity(self.frame_size);
        frame.extend_from_slice(&self.samples[self.pos..end]);
        frame.resize(self.frame_size, 0.0);
        self.pos = end;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len() - self.pos.min(self.samples.len());
        let n = remaining.div_ceil(self.frame_size);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Frames<'_> {}
