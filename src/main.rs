// Example runner for the `crimson_vision` library: feeds a synthetic drifting
// red dot through a scanner session and prints what the engine saw. A real
// application would swap `BufferSource` for a platform camera source.

use crimson_vision::camera::{BufferSource, Frame};
use crimson_vision::pipeline::{ScannerConfig, ScannerPipeline};
use crimson_vision::session::ScannerSession;

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;
const FRAMES: u32 = 120;

/// A black frame with a small red square whose center drifts left to right.
fn synthetic_frame(step: u32) -> Frame {
    let mut data = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
    // Opaque black background.
    for pixel in data.chunks_exact_mut(4) {
        pixel[3] = 255;
    }

    let center_x = 8 + (step * (WIDTH - 16)) / FRAMES;
    let center_y = HEIGHT / 2;
    for y in center_y.saturating_sub(2)..center_y + 2 {
        for x in center_x.saturating_sub(2)..center_x + 2 {
            let offset = ((y * WIDTH + x) * 4) as usize;
            data[offset..offset + 4].copy_from_slice(&[220, 20, 20, 255]);
        }
    }
    Frame::from_rgba(WIDTH, HEIGHT, data)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = ScannerConfig {
        image_width: WIDTH,
        image_height: HEIGHT,
        ..ScannerConfig::default()
    };
    let pipeline = ScannerPipeline::new(config);
    let source = BufferSource::from_frames((0..FRAMES).map(synthetic_frame));
    let mut session = ScannerSession::new(pipeline, source);

    match session.run().await {
        Ok(stats) => {
            println!("Processed {} frames.", stats.frames_processed);
            if let Some(report) = stats.last_report {
                println!("Red pixels: {}", report.red_pixel_count);
                if let Some(marker) = report.stabilized {
                    println!("Marker settled at ({:.1}, {:.1}).", marker.x, marker.y);
                }
            }
        }
        Err(camera_error) => {
            eprintln!("Camera stream failed: {camera_error}");
            std::process::exit(1);
        }
    }
}
