// THEORY:
// The `stabilizer` adds the only piece of temporal memory in the engine. Raw
// per-frame centroids jitter: per-pixel classification is noisy at the edges
// of a red region, so the centroid dances around even when the target holds
// still. A single-pole exponential low-pass filter suppresses that
// frame-to-frame jitter while staying O(1) and carrying no state beyond the
// two smoothed scalars.
//
// Lifecycle:
// - **Adoption**: the first raw centroid ever observed becomes the smoothed
//   point exactly. There is nothing sensible to blend it with.
// - **Tracking**: every later frame with a valid raw centroid applies
//   `s += (raw - s) * alpha` per axis.
// - **Hold**: frames with no matched pixels leave the point untouched. No
//   decay, no reset; the state lives as long as the stabilizer does.

/// The default smoothing factor: how far each frame pulls the smoothed point
/// toward the raw centroid.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.15;

/// Exponential moving average over the raw centroid stream.
#[derive(Debug, Clone)]
pub struct Stabilizer {
    /// The current smoothed point, absent until a first centroid is adopted.
    point: Option<(f64, f64)>,
    /// Per-frame blend factor in (0, 1]. Higher tracks faster, lower is smoother.
    alpha: f64,
}

impl Stabilizer {
    pub fn new(alpha: f64) -> Self {
        Self { point: None, alpha }
    }

    /// Folds one frame's raw centroid into the smoothed point and returns the
    /// updated value. `None` input (no matched pixels) holds the prior state.
    pub fn update(&mut self, raw_centroid: Option<(f64, f64)>) -> Option<(f64, f64)> {
        if let Some((raw_x, raw_y)) = raw_centroid {
            self.point = Some(match self.point {
                None => (raw_x, raw_y),
                Some((smoothed_x, smoothed_y)) => (
                    smoothed_x + (raw_x - smoothed_x) * self.alpha,
                    smoothed_y + (raw_y - smoothed_y) * self.alpha,
                ),
            });
        }
        self.point
    }

    /// The current smoothed point, if any centroid has ever been observed.
    pub fn point(&self) -> Option<(f64, f64)> {
        self.point
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_ALPHA)
    }
}
