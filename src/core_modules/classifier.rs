// THEORY:
// The `classifier` module is the analytical layer over the "dumb" `Pixel`
// container. It answers exactly one question per pixel: does this pixel read
// as "red" to the scanner?
//
// Key architectural principles:
// 1.  **Wrap-around hue band**: red sits at the seam of the HSV color wheel,
//     so the red band is the union of the low end (below the tolerance) and
//     the high end (above 360 minus the tolerance). Both halves form one
//     contiguous band of total angular width 2T.
// 2.  **Saturation/value floors**: washed-out or very dark pixels near the
//     hue boundary would otherwise register as red. Both floors are strict
//     inequalities: a pixel sitting exactly on a floor is rejected.
// 3.  **Live tolerance**: the tolerance is a plain mutable field read on
//     every classification, so a UI slider can retune the band between
//     frames without rebuilding the pipeline.

use crate::core_modules::pixel::pixel::{Hue, Pixel, SaturationHSV, ValueHSV};

/// The default half-width of the red hue band, in degrees.
pub const DEFAULT_TOLERANCE: Hue = 80.0;
/// Pixels at or below this saturation are too washed out to count as red.
const SATURATION_FLOOR: SaturationHSV = 0.4;
/// Pixels at or below this value are too dark to count as red.
const VALUE_FLOOR: ValueHSV = 0.2;

/// Classifies pixels as "red" based on a tunable hue tolerance.
#[derive(Debug, Clone)]
pub struct RedClassifier {
    /// Half-width of the red hue band in degrees. A tolerance of T accepts
    /// hues below T and above 360 - T. Values of 180 or more cover the whole
    /// wheel; that degenerate configuration is accepted, not rejected.
    tolerance: Hue,
}

impl RedClassifier {
    pub fn new(tolerance: Hue) -> Self {
        Self {
            tolerance: tolerance.clamp(0.0, 360.0),
        }
    }

    /// Retunes the hue tolerance. Takes effect on the next classification.
    pub fn set_tolerance(&mut self, tolerance: Hue) {
        self.tolerance = tolerance.clamp(0.0, 360.0);
    }

    pub fn tolerance(&self) -> Hue {
        self.tolerance
    }

    /// The classification rule over an HSV triple.
    pub fn is_red(&self, hue: Hue, saturation: SaturationHSV, value: ValueHSV) -> bool {
        (hue < self.tolerance || hue > 360.0 - self.tolerance)
            && saturation > SATURATION_FLOOR
            && value > VALUE_FLOOR
    }

    /// Convenience wrapper that decomposes a pixel and classifies it.
    pub fn classify(&self, pixel: &Pixel) -> bool {
        let (hue, saturation, value) = pixel.hsv();
        self.is_red(hue, saturation, value)
    }
}

impl Default for RedClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}
