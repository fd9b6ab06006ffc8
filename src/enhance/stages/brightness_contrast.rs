use image::RgbImage;

/// Linear brightness/contrast: `clamp(v * contrast + brightness, 0, 255)`
/// per pixel, per channel. At (contrast 1.0, brightness 0) the arithmetic
/// is exact, so no skip guard is needed.
pub fn apply(img: RgbImage, contrast: f32, brightness: i32) -> RgbImage {
    let offset = brightness as f32;
    let mut out = img;
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            let scaled = *channel as f32 * contrast + offset;
            *channel = scaled.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
