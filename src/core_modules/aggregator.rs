// THEORY:
// The `aggregator` is the per-frame spatial stage. It makes a single O(W·H)
// pass over a raw RGBA frame buffer, classifies every pixel, and reduces the
// matches to two numbers the rest of the engine cares about: how many pixels
// matched, and the arithmetic mean of their positions (the raw centroid).
//
// Key architectural principles:
// 1.  **Flat-buffer addressing**: frame buffers are flat sequences of 4 bytes
//     (R, G, B, A) per pixel in row-major order. Pixel index i maps to
//     x = i mod W, y = i / W. No intermediate mask is materialized; the scan
//     accumulates sums directly.
// 2.  **Stateless utility**: the aggregator has no memory of previous frames.
//     Its output for a frame depends only on that frame and the classifier's
//     current tolerance.
// 3.  **Silent frame skipping**: a frame with zero dimensions or a buffer too
//     short for its claimed size is not an error. Cameras produce such frames
//     while warming up; the scan returns an empty summary and the caller's
//     state is left alone.

use crate::core_modules::classifier::RedClassifier;
use crate::core_modules::pixel::pixel::Pixel;

pub mod aggregator {
    use super::*;

    const BYTES_PER_PIXEL: usize = 4;

    /// The reduction of one frame: match count plus raw centroid.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct FrameSummary {
        /// The number of pixels classified as red in this frame.
        pub red_pixel_count: usize,
        /// The mean (x, y) position of all red pixels, in pixel coordinates.
        /// `None` when no pixel matched — the frame contributes nothing.
        pub raw_centroid: Option<(f64, f64)>,
    }

    /// Scans a flat RGBA buffer and reduces it to a `FrameSummary`.
    pub fn scan_frame(
        frame_buffer: &[u8],
        width: u32,
        height: u32,
        classifier: &RedClassifier,
    ) -> FrameSummary {
        let pixel_count = width as usize * height as usize;
        if pixel_count == 0 || frame_buffer.len() < pixel_count * BYTES_PER_PIXEL {
            // Not yet producing full frames; skip without touching anything.
            return FrameSummary::default();
        }

        let mut matched = 0usize;
        let mut sum_x = 0.0f64;
        let mut sum_y = 0.0f64;

        for (index, bytes) in frame_buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .take(pixel_count)
            .enumerate()
        {
            let pixel = Pixel::from(bytes);
            if classifier.classify(&pixel) {
                let x = (index % width as usize) as f64;
                let y = (index / width as usize) as f64;
                sum_x += x;
                sum_y += y;
                matched += 1;
            }
        }

        if matched == 0 {
            return FrameSummary::default();
        }

        FrameSummary {
            red_pixel_count: matched,
            raw_centroid: Some((sum_x / matched as f64, sum_y / matched as f64)),
        }
    }
}
