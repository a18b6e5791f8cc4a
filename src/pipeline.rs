// THEORY:
// The `pipeline` module is the top-level API for the detection engine. It
// encapsulates the full per-frame stack — sample, classify, aggregate,
// stabilize — behind a single object, so a consumer hands it raw frame
// buffers and reads back high-level reports.
//
// Everything that used to be ambient state in the original scanner (the
// tolerance scalar, the smoothed centroid, the last match count) is an
// explicit field of this one object. That makes multiple independent scanner
// instances possible and keeps unit tests free of globals. The pipeline is
// the sole writer of the stabilizer's state; it runs synchronously inside
// whatever per-frame scheduling the host provides.

use crate::core_modules::aggregator::aggregator;
use crate::core_modules::classifier::RedClassifier;
use crate::core_modules::overlay;
use crate::core_modules::stabilizer::{DEFAULT_SMOOTHING_ALPHA, Stabilizer};
use serde::{Deserialize, Serialize};

// Re-export key data structures for the public API.
pub use crate::core_modules::aggregator::aggregator::FrameSummary;
pub use crate::core_modules::classifier::DEFAULT_TOLERANCE;

/// The default marker radius drawn at the stabilized centroid, in pixels.
pub const DEFAULT_MARKER_RADIUS: u32 = 6;

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Configuration for the ScannerPipeline, allowing for tunable behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Half-width of the red hue band in degrees (the tolerance slider).
    pub tolerance: f32,
    /// Per-frame blend factor for the centroid low-pass filter.
    pub smoothing_alpha: f64,
    /// Radius of the rendered marker circle, in pixels.
    pub marker_radius: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            tolerance: DEFAULT_TOLERANCE,
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

/// The primary output of the scanner for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// How many pixels in this frame classified as red.
    pub red_pixel_count: usize,
    /// This frame's mean red-pixel position, absent when nothing matched.
    pub raw_centroid: Option<Point>,
    /// The smoothed marker position, absent until a first centroid exists.
    pub stabilized: Option<Point>,
}

/// The main, top-level struct for the red scanner engine.
pub struct ScannerPipeline {
    config: ScannerConfig,
    classifier: RedClassifier,
    stabilizer: Stabilizer,
    last_red_pixel_count: usize,
}

impl ScannerPipeline {
    pub fn new(config: ScannerConfig) -> Self {
        let classifier = RedClassifier::new(config.tolerance);
        let stabilizer = Stabilizer::new(config.smoothing_alpha);
        Self {
            config,
            classifier,
            stabilizer,
            last_red_pixel_count: 0,
        }
    }

    /// Processes one RGBA frame buffer through the full stack.
    ///
    /// Runs synchronously; the caller's per-frame scheduler decides when the
    /// next frame is processed. Under-sized or zero-dimension buffers yield an
    /// empty summary and leave the stabilized point untouched.
    pub fn process_frame(&mut self, frame_buffer: &[u8]) -> FrameReport {
        // Stage 1: spatial reduction of this frame.
        let summary = aggregator::scan_frame(
            frame_buffer,
            self.config.image_width,
            self.config.image_height,
            &self.classifier,
        );

        // Stage 2: temporal smoothing across frames.
        let stabilized = self.stabilizer.update(summary.raw_centroid);

        self.last_red_pixel_count = summary.red_pixel_count;

        FrameReport {
            red_pixel_count: summary.red_pixel_count,
            raw_centroid: summary.raw_centroid.map(Point::from),
            stabilized: stabilized.map(Point::from),
        }
    }

    /// Redraws the marker overlay: a transparent clear, then a filled circle
    /// at the stabilized centroid when one exists.
    pub fn render_overlay(&self, overlay_buffer: &mut [u8]) {
        overlay::clear(overlay_buffer);
        if let Some(center) = self.stabilizer.point() {
            overlay::draw_marker(
                overlay_buffer,
                self.config.image_width,
                self.config.image_height,
                center,
                self.config.marker_radius,
            );
        }
    }

    /// Live tolerance control; read by the classifier on the next frame.
    pub fn set_tolerance(&mut self, tolerance: f32) {
        self.classifier.set_tolerance(tolerance);
        self.config.tolerance = self.classifier.tolerance();
    }

    pub fn tolerance(&self) -> f32 {
        self.classifier.tolerance()
    }

    /// The latest frame's matched-pixel count, for "Red pixels: N" readouts.
    pub fn red_pixel_count(&self) -> usize {
        self.last_red_pixel_count
    }

    /// The current smoothed marker position.
    pub fn stabilized(&self) -> Option<Point> {
        self.stabilizer.point().map(Point::from)
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }
}
