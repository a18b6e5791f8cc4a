// THEORY:
// The `session` module ties a `FrameSource` to a `ScannerPipeline` and runs
// the cooperative per-frame loop: pull a frame, process it synchronously
// through the full stack, redraw the overlay, yield, repeat. One step never
// overlaps the next, so the stabilizer has exactly one writer and no locking
// exists anywhere in the engine.
//
// Termination follows stream liveness: the loop ends when the source reports
// `Ok(None)` (the stream stopped producing frames) or surfaces a terminal
// camera error. There is no frame queue — a source that produces faster than
// the loop consumes simply has frames dropped at the source, never buffered.

use crate::camera::{CameraError, FrameSource};
use crate::pipeline::{FrameReport, ScannerPipeline};
use log::{debug, error, info};

/// Summary of a completed capture session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionStats {
    pub frames_processed: u64,
    pub last_report: Option<FrameReport>,
}

/// Drives a scanner pipeline from a frame source until the stream ends.
pub struct ScannerSession<S: FrameSource> {
    pipeline: ScannerPipeline,
    source: S,
    overlay: Vec<u8>,
}

impl<S: FrameSource> ScannerSession<S> {
    pub fn new(pipeline: ScannerPipeline, source: S) -> Self {
        let config = pipeline.config();
        let overlay = vec![0u8; (config.image_width * config.image_height * 4) as usize];
        Self {
            pipeline,
            source,
            overlay,
        }
    }

    /// Runs the capture loop to completion.
    ///
    /// Returns session statistics when the stream ends cleanly, or the
    /// camera error that terminated it. Errors are surfaced, not retried.
    pub async fn run(&mut self) -> Result<SessionStats, CameraError> {
        info!("scanner session started");
        let mut stats = SessionStats::default();

        loop {
            match self.source.next_frame().await {
                Ok(Some(frame)) => {
                    let report = self.pipeline.process_frame(&frame.data);
                    self.pipeline.render_overlay(&mut self.overlay);
                    stats.frames_processed += 1;
                    stats.last_report = Some(report);
                    debug!(
                        "frame {}: {} red pixels, marker at {:?}",
                        stats.frames_processed, report.red_pixel_count, report.stabilized
                    );
                }
                Ok(None) => {
                    info!(
                        "stream ended after {} frames; scanner session stopped",
                        stats.frames_processed
                    );
                    return Ok(stats);
                }
                Err(camera_error) => {
                    error!("camera stream failed: {camera_error}");
                    return Err(camera_error);
                }
            }
        }
    }

    /// The most recently rendered marker overlay (RGBA, frame-sized).
    pub fn overlay(&self) -> &[u8] {
        &self.overlay
    }

    pub fn pipeline(&self) -> &ScannerPipeline {
        &self.pipeline
    }

    /// Mutable access for live controls (e.g. the tolerance slider).
    pub fn pipeline_mut(&mut self) -> &mut ScannerPipeline {
        &mut self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{BufferSource, Frame};
    use crate::pipeline::{Point, ScannerConfig};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn config(width: u32, height: u32) -> ScannerConfig {
        ScannerConfig {
            image_width: width,
            image_height: height,
            ..ScannerConfig::default()
        }
    }

    fn solid_frame(width: u32, height: u32, pixel: [u8; 4]) -> Frame {
        let data: Vec<u8> = pixel
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Frame::from_rgba(width, height, data)
    }

    fn red_dot_frame(width: u32, height: u32, x: u32, y: u32) -> Frame {
        let mut frame = solid_frame(width, height, BLACK);
        let offset = ((y * width + x) * 4) as usize;
        frame.data[offset..offset + 4].copy_from_slice(&RED);
        frame
    }

    #[tokio::test]
    async fn session_processes_every_frame_then_stops() {
        let source = BufferSource::from_frames(vec![
            red_dot_frame(8, 8, 3, 3),
            red_dot_frame(8, 8, 4, 3),
            solid_frame(8, 8, BLACK),
        ]);
        let mut session = ScannerSession::new(ScannerPipeline::new(config(8, 8)), source);

        let stats = session.run().await.expect("session should end cleanly");
        assert_eq!(stats.frames_processed, 3);

        // The black tail frame matched nothing but held the marker.
        let last = stats.last_report.unwrap();
        assert_eq!(last.red_pixel_count, 0);
        assert!(last.stabilized.is_some());
        assert_eq!(session.pipeline().stabilized(), last.stabilized);
    }

    #[tokio::test]
    async fn session_with_no_frames_ends_immediately() {
        let source = BufferSource::default();
        let mut session = ScannerSession::new(ScannerPipeline::new(config(4, 4)), source);

        let stats = session.run().await.unwrap();
        assert_eq!(stats.frames_processed, 0);
        assert_eq!(stats.last_report, None);
        assert_eq!(session.pipeline().stabilized(), None);
    }

    #[tokio::test]
    async fn overlay_is_rendered_during_the_loop() {
        let source = BufferSource::from_frames(vec![red_dot_frame(16, 16, 8, 8)]);
        let mut session = ScannerSession::new(ScannerPipeline::new(config(16, 16)), source);

        session.run().await.unwrap();

        assert_eq!(
            session.pipeline().stabilized(),
            Some(Point { x: 8.0, y: 8.0 })
        );
        let offset = (8 * 16 + 8) * 4;
        assert_eq!(&session.overlay()[offset..offset + 4], &RED);
    }

    #[tokio::test]
    async fn warmup_frames_with_zero_dimensions_are_skipped() {
        let source = BufferSource::from_frames(vec![
            Frame::from_rgba(0, 0, Vec::new()),
            red_dot_frame(8, 8, 2, 2),
        ]);
        let mut session = ScannerSession::new(ScannerPipeline::new(config(8, 8)), source);

        let stats = session.run().await.unwrap();
        assert_eq!(stats.frames_processed, 2);
        assert_eq!(
            session.pipeline().stabilized(),
            Some(Point { x: 2.0, y: 2.0 })
        );
    }
}
