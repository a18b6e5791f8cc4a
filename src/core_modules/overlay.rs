// THEORY:
// The `overlay` module is the rendering stage. It never touches the camera
// frame itself; it paints into a separate RGBA buffer that a front-end
// composites over the live feed. Each frame the overlay is cleared to fully
// transparent and, if the stabilizer has a point, a fixed-radius filled
// circle is drawn at it. Keeping the renderer as plain buffer writes means
// the same code serves a canvas front-end, a video compositor, or a PNG
// snapshot in tests.

use image::ImageEncoder;

const BYTES_PER_PIXEL: usize = 4;

/// The marker fill, an opaque red.
pub const MARKER_COLOR: [u8; 4] = [255, 0, 0, 255];

/// Resets an RGBA overlay buffer to fully transparent.
pub fn clear(overlay: &mut [u8]) {
    overlay.fill(0);
}

/// Draws a filled circle of the marker color centered on `center`.
///
/// Pixels outside the buffer bounds are skipped, so markers near an edge are
/// clipped rather than wrapped or panicking.
pub fn draw_marker(overlay: &mut [u8], width: u32, height: u32, center: (f64, f64), radius: u32) {
    if width == 0 || height == 0 {
        return;
    }

    let (center_x, center_y) = center;
    let radius = radius as f64;
    let min_x = (center_x - radius).floor() as i64;
    let max_x = (center_x + radius).ceil() as i64;
    let min_y = (center_y - radius).floor() as i64;
    let max_y = (center_y + radius).ceil() as i64;

    for y in min_y..=max_y {
        if y < 0 || y >= height as i64 {
            continue;
        }
        for x in min_x..=max_x {
            if x < 0 || x >= width as i64 {
                continue;
            }
            let dx = x as f64 - center_x;
            let dy = y as f64 - center_y;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let offset = (y as usize * width as usize + x as usize) * BYTES_PER_PIXEL;
            if offset + BYTES_PER_PIXEL <= overlay.len() {
                overlay[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&MARKER_COLOR);
            }
        }
    }
}

/// Encodes an RGBA overlay buffer as a PNG on disk. Handy for eyeballing the
/// marker placement without a live front-end.
pub fn save_snapshot(
    path: &str,
    width: u32,
    height: u32,
    overlay: &[u8],
) -> Result<(), image::error::ImageError> {
    let output = std::fs::File::create(path)?;
    let encoder = image::codecs::png::PngEncoder::new(output);
    encoder.write_image(overlay, width, height, image::ExtendedColorType::Rgba8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height) as usize * BYTES_PER_PIXEL]
    }

    fn pixel_at(overlay: &[u8], width: u32, x: u32, y: u32) -> &[u8] {
        let offset = (y as usize * width as usize + x as usize) * BYTES_PER_PIXEL;
        &overlay[offset..offset + BYTES_PER_PIXEL]
    }

    #[test]
    fn marker_fills_the_center_and_respects_the_radius() {
        let mut overlay = blank(32, 32);
        draw_marker(&mut overlay, 32, 32, (16.0, 16.0), 6);

        assert_eq!(pixel_at(&overlay, 32, 16, 16), &MARKER_COLOR);
        // On the axis at exactly the radius: inside.
        assert_eq!(pixel_at(&overlay, 32, 22, 16), &MARKER_COLOR);
        // One past the radius: untouched.
        assert_eq!(pixel_at(&overlay, 32, 23, 16), &[0, 0, 0, 0]);
        assert_eq!(pixel_at(&overlay, 32, 16, 23), &[0, 0, 0, 0]);
    }

    #[test]
    fn marker_near_an_edge_is_clipped() {
        let mut overlay = blank(16, 16);
        draw_marker(&mut overlay, 16, 16, (0.0, 0.0), 6);
        assert_eq!(pixel_at(&overlay, 16, 0, 0), &MARKER_COLOR);
        assert_eq!(pixel_at(&overlay, 16, 15, 15), &[0, 0, 0, 0]);
    }

    #[test]
    fn clear_resets_every_byte() {
        let mut overlay = blank(8, 8);
        draw_marker(&mut overlay, 8, 8, (4.0, 4.0), 3);
        assert!(overlay.iter().any(|&b| b != 0));
        clear(&mut overlay);
        assert!(overlay.iter().all(|&b| b == 0));
    }

    #[test]
    fn save_marker_snapshot() {
        let mut overlay = blank(64, 64);
        draw_marker(&mut overlay, 64, 64, (32.0, 32.0), 6);
        let path = std::env::temp_dir().join("crimson_marker_snapshot.png");
        save_snapshot(path.to_str().unwrap(), 64, 64, &overlay).expect("Error saving file.");
    }
}
