// THEORY:
// The `Pixel` module is the most fundamental unit of the vision system. It is a
// "dumb" data container for a single RGBA pixel plus the small set of
// single-pixel heuristics the red scanner needs: the HSV decomposition.
// Anything that needs more than one pixel (centroids, smoothing, history)
// belongs in higher-level modules like `aggregator` or `stabilizer`.
//
// What lives here (by design):
// - Raw channels (RGBA, 0..255) and their normalized (0..1 sRGB) forms.
// - Hue: angle on the color wheel in degrees [0, 360), via the standard
//   six-sector piecewise formula over the maximal channel.
// - Saturation (HSV): chroma / value, i.e. distance from gray relative to
//   the brightest channel. Zero for pure black, avoiding division by zero.
// - Value (HSV): brightness defined as max(R, G, B).
//
// Key principles:
// 1) Single-pixel scope: heuristics never read neighbors or history.
// 2) Purity: no side effects. These run once per pixel per frame, so the hot
//    path is a handful of comparisons and one division — no allocation, no
//    table lookups.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;
    pub type NormalizedChannel = f32;
    pub type Hue = f32;
    pub type SaturationHSV = f32;
    pub type ValueHSV = f32;

    const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// The RGB channels normalized into 0.0..1.0 sRGB space.
        #[inline]
        fn normalized(&self) -> (NormalizedChannel, NormalizedChannel, NormalizedChannel) {
            (
                self.red as NormalizedChannel / 255.0,
                self.green as NormalizedChannel / 255.0,
                self.blue as NormalizedChannel / 255.0,
            )
        }

        /// Hue angle in degrees [0, 360).
        ///
        /// - Achromatic pixels (chroma of zero) report a hue of 0.0.
        /// - Negative sector results are wrapped back into [0, 360).
        pub fn hue(&self) -> Hue {
            let (red, green, blue) = self.normalized();
            let maximum_channel = red.max(green.max(blue));
            let minimum_channel = red.min(green.min(blue));
            let chroma = maximum_channel - minimum_channel;

            if chroma <= 0.0 {
                return 0.0;
            }

            let (base_difference, sector_offset) = if maximum_channel == red {
                (green - blue, 0.0)
            } else if maximum_channel == green {
                (blue - red, 2.0)
            } else {
                (red - green, 4.0)
            };

            let mut hue_degrees = (base_difference / chroma + sector_offset) * 60.0;
            if hue_degrees < 0.0 {
                hue_degrees += 360.0;
            }
            hue_degrees
        }

        /// Saturation (HSV): S = chroma / value.
        ///
        /// - Measures distance from gray relative to Value (max channel).
        /// - Pure black has no defined saturation; reported as 0.0.
        pub fn saturation_hsv(&self) -> SaturationHSV {
            let (red, green, blue) = self.normalized();
            let maximum_channel = red.max(green.max(blue));
            if maximum_channel <= 0.0 {
                return 0.0;
            }
            let minimum_channel = red.min(green.min(blue));
            (maximum_channel - minimum_channel) / maximum_channel
        }

        /// HSV Value (V): brightness defined as max(R, G, B).
        pub fn value_hsv(&self) -> ValueHSV {
            let (red, green, blue) = self.normalized();
            red.max(green.max(blue))
        }

        /// The full HSV decomposition of this pixel as (hue, saturation, value).
        pub fn hsv(&self) -> (Hue, SaturationHSV, ValueHSV) {
            (self.hue(), self.saturation_hsv(), self.value_hsv())
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::Pixel;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn pure_red_is_hue_zero_fully_saturated() {
        let pixel = Pixel::new(255, 0, 0, 255);
        let (h, s, v) = pixel.hsv();
        assert_eq!(h, 0.0);
        assert_eq!(s, 1.0);
        assert_eq!(v, 1.0);
    }

    #[test]
    fn pure_black_is_all_zero() {
        let pixel = Pixel::new(0, 0, 0, 255);
        assert_eq!(pixel.hsv(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn pure_white_is_bright_and_achromatic() {
        let pixel = Pixel::new(255, 255, 255, 255);
        let (h, s, v) = pixel.hsv();
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 1.0);
    }

    #[test]
    fn primary_green_and_blue_hues() {
        let green = Pixel::new(0, 255, 0, 255);
        assert_close(green.hue(), 120.0);
        assert_close(green.saturation_hsv(), 1.0);
        assert_close(green.value_hsv(), 1.0);

        let blue = Pixel::new(0, 0, 255, 255);
        assert_close(blue.hue(), 240.0);
        assert_close(blue.saturation_hsv(), 1.0);
        assert_close(blue.value_hsv(), 1.0);
    }

    #[test]
    fn grays_are_achromatic() {
        for level in [1u8, 17, 85, 128, 200, 254] {
            let pixel = Pixel::new(level, level, level, 255);
            assert_eq!(pixel.hue(), 0.0, "gray level {level}");
            assert_eq!(pixel.saturation_hsv(), 0.0, "gray level {level}");
        }
    }

    #[test]
    fn magenta_leaning_red_wraps_below_360() {
        // More blue than green with red maximal lands in the 300..360 range.
        let pixel = Pixel::new(255, 0, 128, 255);
        let hue = pixel.hue();
        assert!(hue > 300.0 && hue < 360.0, "hue was {hue}");
    }

    #[test]
    fn pixel_from_byte_slice() {
        let bytes = [12u8, 34, 56, 78];
        let pixel = Pixel::from(&bytes[..]);
        assert_eq!(pixel, Pixel::new(12, 34, 56, 78));
    }
}
