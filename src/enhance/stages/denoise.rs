use image::RgbImage;

/// Patch half-width for similarity comparison (3x3 patches)
const PATCH_HALF: i64 = 1;
/// Search window radius for candidate patches
const SEARCH_RADIUS: i64 = 7;

/// Non-local-means color denoising. The filter strength for luminance and
/// chroma alike is `denoise * 5`; level 0 disables the stage.
///
/// Each pixel is replaced by a weighted average of the pixels in its search
/// window, weighted by patch similarity: `w = exp(-d / h^2)` where `d` is
/// the mean squared channel difference between the two 3x3 patches.
pub fn apply(img: RgbImage, denoise: u32) -> RgbImage {
    if denoise == 0 {
        return img;
    }

    let h = (denoise * 5) as f32;
    let h2 = h * h;
    let (width, height) = img.dimensions();
    let (w, ht) = (width as i64, height as i64);

    let mut out = RgbImage::new(width, height);
    for y in 0..ht {
        for x in 0..w {
            let mut sum = [0.0f32; 3];
            let mut weight_total = 0.0f32;

            for ny in (y - SEARCH_RADIUS).max(0)..(y + SEARCH_RADIUS + 1).min(ht) {
                for nx in (x - SEARCH_RADIUS).max(0)..(x + SEARCH_RADIUS + 1).min(w) {
                    let dist = patch_distance(&img, x, y, nx, ny, w, ht);
                    let weight = (-dist / h2).exp();

                    let neighbor = img.get_pixel(nx as u32, ny as u32).0;
                    for c in 0..3 {
                        sum[c] += neighbor[c] as f32 * weight;
                    }
                    weight_total += weight;
                }
            }

            let pixel = out.get_pixel_mut(x as u32, y as u32);
            for c in 0..3 {
                pixel.0[c] = (sum[c] / weight_total).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}

/// Mean squared channel difference between the patches centered on the two
/// coordinates; samples falling outside the image are skipped.
fn patch_distance(img: &RgbImage, x: i64, y: i64, nx: i64, ny: i64, w: i64, h: i64) -> f32 {
    let mut dist = 0.0f32;
    let mut samples = 0u32;

    for dy in -PATCH_HALF..=PATCH_HALF {
        for dx in -PATCH_HALF..=PATCH_HALF {
            let (ax, ay) = (x + dx, y + dy);
            let (bx, by) = (nx + dx, ny + dy);
            if ax < 0 || ay < 0 || ax >= w || ay >= h || bx < 0 || by < 0 || bx >= w || by >= h {
                continue;
            }

            let a = img.get_pixel(ax as u32, ay as u32).0;
            let b = img.get_pixel(bx as u32, by as u32).0;
            for c in 0..3 {
                let d = a[c] as f32 - b[c] as f32;
                dist += d * d;
            }
            samples += 1;
        }
    }

    if samples == 0 {
        return 0.0;
    }
    dist / (samples * 3) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn variance(img: &RgbImage) -> f64 {
        let values: Vec<f64> = img.pixels().map(|p| p.0[0] as f64).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
    }

    #[test]
    fn test_level_zero_is_identity() {
        let img = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 32) as u8, (y * 32) as u8, 9]));
        let result = apply(img.clone(), 0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_uniform_image_is_unchanged() {
        let img = RgbImage::from_pixel(12, 12, Rgb([77, 77, 77]));
        let result = apply(img.clone(), 2);
        assert_eq!(result, img);
    }

    #[test]
    fn test_reduces_salt_and_pepper_noise() {
        let mut img = RgbImage::from_pixel(16, 16, Rgb([128, 128, 128]));
        img.put_pixel(5, 5, Rgb([0, 0, 0]));
        img.put_pixel(10, 8, Rgb([255, 255, 255]));

        let before = variance(&img);
        let after = variance(&apply(img, 3));
        assert!(
            after < before,
            "expected variance drop: {} -> {}",
            before,
            after
        );
    }
}
