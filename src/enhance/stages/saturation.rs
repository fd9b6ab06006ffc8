use crate::enhance::color::{hsv_to_rgb, rgb_to_hsv};
use image::RgbImage;

/// Saturation scaling in HSV space: S (0..255) is multiplied by the factor
/// and clamped; hue and value are untouched. Skipped at factor 1.0 so the
/// identity run avoids the lossy color-space round trip.
pub fn apply(img: RgbImage, saturation: f32) -> RgbImage {
    if saturation == 1.0 {
        return img;
    }

    let mut out = img;
    for pixel in out.pixels_mut() {
        let [r, g, b] = pixel.0;
        let (h, s, v) = rgb_to_hsv(r as f32, g as f32, b as f32);
        let scaled = (s * saturation).clamp(0.0, 255.0);
        let (nr, ng, nb) = hsv_to_rgb(h, scaled, v);
        pixel.0 = [
            nr.round().clamp(0.0, 255.0) as u8,
            ng.round().clamp(0.0, 255.0) as u8,
            nb.round().clamp(0.0, 255.0) as u8,
        ];
    }
    out
}
