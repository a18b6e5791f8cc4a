// THEORY:
// The `camera` module is the seam between the detection engine and whatever
// actually produces frames. The engine never talks to hardware; it consumes
// the `FrameSource` trait, so a V4L2 device, a WebRTC track, or a canned
// buffer of test frames all look the same to the session loop.
//
// Key architectural principles:
// 1.  **Liveness in the signal**: `next_frame` returning `Ok(None)` means the
//     stream stopped producing frames. That is the loop's termination
//     condition — not a "playing" flag — so no per-frame callback can dangle
//     after teardown.
// 2.  **Facing-mode policy**: the scanner prefers the rear camera. Whether
//     that preference is a hard requirement or a soft fallback is an explicit
//     configuration (`FacingMode`), because both behaviors are legitimate and
//     a front-end must choose one.
// 3.  **Terminal errors**: acquisition failures (permission denied, no
//     camera, unsatisfiable facing constraint) are surfaced once and never
//     retried.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Which way a camera points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    /// The environment-facing (rear) camera.
    #[default]
    Rear,
    /// The user-facing (front) camera.
    Front,
}

/// How strictly the facing preference is applied during acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacingMode {
    /// Fail hard when no camera satisfies the requested facing.
    Required,
    /// Fall back to any available camera.
    #[default]
    Preferred,
}

/// Configuration for camera acquisition.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraConfig {
    pub facing: CameraFacing,
    pub facing_mode: FacingMode,
}

/// Errors surfaced by camera acquisition and streaming. All are terminal;
/// nothing in this module retries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera access was denied")]
    PermissionDenied,
    #[error("no camera is available")]
    NoCamera,
    #[error("no {0:?}-facing camera satisfies the required facing mode")]
    FacingUnsatisfied(CameraFacing),
    #[error("the camera stream closed unexpectedly")]
    StreamClosed,
}

/// A single captured frame: a flat RGBA buffer plus its dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Raw RGBA pixel buffer, 4 bytes per pixel, row-major.
    pub data: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl Frame {
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
            captured_at: Utc::now(),
        }
    }
}

/// Anything that can asynchronously yield camera frames.
pub trait FrameSource {
    /// The next frame, or `Ok(None)` once the stream has stopped producing.
    fn next_frame(
        &mut self,
    ) -> impl std::future::Future<Output = Result<Option<Frame>, CameraError>> + Send;
}

/// Applies the facing policy to the set of cameras a platform reports.
///
/// Returns the facing actually selected, or an error when the policy cannot
/// be satisfied.
pub fn select_camera(
    config: &CameraConfig,
    available: &[CameraFacing],
) -> Result<CameraFacing, CameraError> {
    if available.is_empty() {
        return Err(CameraError::NoCamera);
    }
    if available.contains(&config.facing) {
        return Ok(config.facing);
    }
    match config.facing_mode {
        FacingMode::Required => Err(CameraError::FacingUnsatisfied(config.facing)),
        FacingMode::Preferred => Ok(available[0]),
    }
}

/// A `FrameSource` backed by pre-made frames. Yields them in order, then
/// reports the stream as ended. This is the test and demo source.
#[derive(Debug, Default)]
pub struct BufferSource {
    frames: VecDeque<Frame>,
}

impl BufferSource {
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for BufferSource {
    async fn next_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        Ok(self.frames.pop_front())
    }
}
