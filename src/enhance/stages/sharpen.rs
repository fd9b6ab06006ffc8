use image::RgbImage;
use imageproc::filter::gaussian_blur_f32;

/// Blur sigma for the unsharp mask; the kernel is auto-sized from it
const BLUR_SIGMA: f32 = 3.0;

/// Unsharp-mask sharpening: `out = in * sharpness + blurred * (1 - sharpness)`,
/// a linear extrapolation away from a Gaussian-blurred copy. Skipped at
/// strength 1.0, where the extrapolation is the identity.
pub fn apply(img: RgbImage, sharpness: f32) -> RgbImage {
    if sharpness == 1.0 {
        return img;
    }

    let blurred = gaussian_blur_f32(&img, BLUR_SIGMA);
    let blur_weight = 1.0 - sharpness;

    let mut out = img;
    for (pixel, blur_pixel) in out.pixels_mut().zip(blurred.pixels()) {
        for (channel, blur_channel) in pixel.0.iter_mut().zip(blur_pixel.0.iter()) {
            let v = *channel as f32 * sharpness + *blur_channel as f32 * blur_weight;
            *channel = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
