use crate::enhance::params::EnhanceParams;
use crate::enhance::stages;
use image::RgbImage;

/// Derive a suggested parameter vector from global luminance statistics.
///
/// The statistics are computed on the same 2x bicubic upscale the pipeline
/// works on, never the original resolution. Only brightness, contrast and
/// gamma are data-derived; the remaining fields are fixed defaults.
pub fn estimate(img: &RgbImage) -> EnhanceParams {
    let upscaled = stages::upscale::apply(img.clone());
    let luma = image::DynamicImage::ImageRgb8(upscaled).to_luma8();

    let (mean, stddev) = luma_stats(&luma);

    let brightness = (mean - 127.0).round().clamp(-100.0, 100.0) as i32;
    let contrast = ((stddev / 64.0) as f32).clamp(0.5, 3.0);

    // Solve for the gamma that maps the current mean to mid-gray:
    // 0.5 = mean_norm^(1/gamma)
    let mean_norm = mean / 255.0;
    let gamma = if mean_norm > 0.0 {
        ((0.5f64.ln() / mean_norm.ln()) as f32).clamp(0.1, 3.0)
    } else {
        1.0
    };

    EnhanceParams {
        brightness,
        contrast,
        sharpness: 1.5,
        saturation: 1.0,
        gamma,
        color_temp: 0,
        edge_mark: 0.0,
        denoise: 0,
    }
}

fn luma_stats(luma: &image::GrayImage) -> (f64, f64) {
    let count = (luma.width() * luma.height()) as f64;
    if count == 0.0 {
        return (0.0, 0.0);
    }

    let sum: f64 = luma.pixels().map(|p| p.0[0] as f64).sum();
    let mean = sum / count;

    let sq_sum: f64 = luma.pixels().map(|p| (p.0[0] as f64 - mean).powi(2)).sum();
    let stddev = (sq_sum / count).sqrt();

    (mean, stddev)
}
