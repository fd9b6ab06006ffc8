use crate::enhance::color::{rgb_to_yuv, yuv_to_rgb};
use image::RgbImage;

/// CLAHE parameters, fixed by the pipeline contract
const CLIP_LIMIT: f32 = 2.0;
const TILES_X: u32 = 8;
const TILES_Y: u32 = 8;

/// Local-contrast enhancement: adaptive histogram equalization on the luma
/// plane only. The image is converted to YUV, the Y plane is equalized per
/// tile with a clip limit and bilinear blending between tile mappings, and
/// the untouched chroma planes are recombined.
///
/// This stage has no parameter and is applied on every pipeline run.
pub fn apply(img: RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();
    let count = (width * height) as usize;

    let mut luma = vec![0u8; count];
    let mut chroma_u = vec![0.0f32; count];
    let mut chroma_v = vec![0.0f32; count];

    for (i, pixel) in img.pixels().enumerate() {
        let [r, g, b] = pixel.0;
        let (y, u, v) = rgb_to_yuv(r as f32, g as f32, b as f32);
        luma[i] = y.round().clamp(0.0, 255.0) as u8;
        chroma_u[i] = u;
        chroma_v[i] = v;
    }

    let equalized = clahe(&luma, width, height);

    let mut out = RgbImage::new(width, height);
    for (i, pixel) in out.pixels_mut().enumerate() {
        let (r, g, b) = yuv_to_rgb(equalized[i] as f32, chroma_u[i], chroma_v[i]);
        pixel.0 = [
            r.round().clamp(0.0, 255.0) as u8,
            g.round().clamp(0.0, 255.0) as u8,
            b.round().clamp(0.0, 255.0) as u8,
        ];
    }
    out
}

/// Contrast-limited adaptive histogram equalization over a TILES_X x TILES_Y
/// grid. Each tile gets a clipped-histogram equalization LUT; pixels are
/// mapped by bilinearly interpolating the four surrounding tile LUTs.
fn clahe(luma: &[u8], width: u32, height: u32) -> Vec<u8> {
    let luts = tile_luts(luma, width, height);

    let mut out = vec![0u8; luma.len()];
    for y in 0..height {
        let (ty0, ty1, fy) = tile_blend(y, height, TILES_Y);

        for x in 0..width {
            let (tx0, tx1, fx) = tile_blend(x, width, TILES_X);

            let v = luma[(y * width + x) as usize] as usize;
            let top = (1.0 - fx) * luts[ty0 * TILES_X as usize + tx0][v] as f32
                + fx * luts[ty0 * TILES_X as usize + tx1][v] as f32;
            let bottom = (1.0 - fx) * luts[ty1 * TILES_X as usize + tx0][v] as f32
                + fx * luts[ty1 * TILES_X as usize + tx1][v] as f32;
            let mapped = (1.0 - fy) * top + fy * bottom;

            out[(y * width + x) as usize] = mapped.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Surrounding tile indices and blend fraction for a pixel coordinate.
/// Pixels outside the outermost tile centers clamp to the border tile.
fn tile_blend(coord: u32, extent: u32, tiles: u32) -> (usize, usize, f32) {
    let g = (coord as f32 + 0.5) * tiles as f32 / extent as f32 - 0.5;
    let i = g.floor() as i32;
    if i < 0 {
        (0, 0, 0.0)
    } else if i >= tiles as i32 - 1 {
        ((tiles - 1) as usize, (tiles - 1) as usize, 0.0)
    } else {
        (i as usize, i as usize + 1, g - g.floor())
    }
}

/// Build one equalization LUT per tile from its clipped histogram
fn tile_luts(luma: &[u8], width: u32, height: u32) -> Vec<[u8; 256]> {
    let mut luts = Vec::with_capacity((TILES_X * TILES_Y) as usize);

    for ty in 0..TILES_Y {
        let y0 = ty * height / TILES_Y;
        let y1 = (ty + 1) * height / TILES_Y;

        for tx in 0..TILES_X {
            let x0 = tx * width / TILES_X;
            let x1 = (tx + 1) * width / TILES_X;

            luts.push(equalization_lut(luma, width, x0, x1, y0, y1));
        }
    }
    luts
}

fn equalization_lut(luma: &[u8], width: u32, x0: u32, x1: u32, y0: u32, y1: u32) -> [u8; 256] {
    let area = ((x1.saturating_sub(x0)) * (y1.saturating_sub(y0))) as u32;
    if area == 0 {
        // Degenerate tile (image smaller than the grid): identity mapping
        let mut identity = [0u8; 256];
        for (i, entry) in identity.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return identity;
    }

    let mut hist = [0u32; 256];
    for y in y0..y1 {
        for x in x0..x1 {
            hist[luma[(y * width + x) as usize] as usize] += 1;
        }
    }

    // Clip the histogram and spread the excess evenly over all bins
    let clip = ((CLIP_LIMIT * area as f32 / 256.0) as u32).max(1);
    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > clip {
            excess += *bin - clip;
            *bin = clip;
        }
    }
    let bonus = excess / 256;
    for bin in hist.iter_mut() {
        *bin += bonus;
    }
    // Spread the remainder at an even stride so no value range is favored
    let residual = (excess % 256) as usize;
    if residual > 0 {
        let step = (256 / residual).max(1);
        let mut distributed = 0;
        let mut i = 0;
        while i < 256 && distributed < residual {
            hist[i] += 1;
            distributed += 1;
            i += step;
        }
    }

    let scale = 255.0 / area as f32;
    let mut lut = [0u8; 256];
    let mut cdf = 0u32;
    for i in 0..256 {
        cdf += hist[i];
        lut[i] = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn luma_stddev(img: &RgbImage) -> f64 {
        let values: Vec<f64> = img
            .pixels()
            .map(|p| 0.299 * p.0[0] as f64 + 0.587 * p.0[1] as f64 + 0.114 * p.0[2] as f64)
            .collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
    }

    #[test]
    fn test_preserves_dimensions() {
        let img = RgbImage::new(33, 17);
        let result = apply(img);
        assert_eq!(result.dimensions(), (33, 17));
    }

    #[test]
    fn test_uniform_image_stays_close_to_uniform() {
        // With the clip limit, a flat histogram redistributes into a ramp and
        // the mapping stays near identity for a uniform image.
        let img = RgbImage::from_pixel(64, 64, Rgb([127, 127, 127]));
        let result = apply(img);

        for pixel in result.pixels() {
            for channel in pixel.0 {
                let diff = (channel as i32 - 127).abs();
                assert!(diff <= 8, "uniform image drifted by {}", diff);
            }
        }
    }

    #[test]
    fn test_expands_low_contrast_ramp() {
        // Luma confined to [110, 140]; equalization should spread it out
        let img = RgbImage::from_fn(64, 64, |x, _| {
            let v = 110 + (x * 30 / 64) as u8;
            Rgb([v, v, v])
        });

        let before = luma_stddev(&img);
        let after = luma_stddev(&apply(img));
        assert!(
            after > before,
            "expected contrast expansion: {} -> {}",
            before,
            after
        );
    }

    #[test]
    fn test_gray_input_keeps_neutral_chroma() {
        let img = RgbImage::from_fn(48, 48, |x, y| {
            let v = ((x + y) * 2) as u8;
            Rgb([v, v, v])
        });

        let result = apply(img);
        for pixel in result.pixels() {
            let [r, g, b] = pixel.0;
            assert!((r as i32 - g as i32).abs() <= 2);
            assert!((g as i32 - b as i32).abs() <= 2);
        }
    }

    #[test]
    fn test_small_image_does_not_panic() {
        // Smaller than the tile grid in both dimensions
        let img = RgbImage::from_pixel(5, 3, Rgb([90, 90, 90]));
        let result = apply(img);
        assert_eq!(result.dimensions(), (5, 3));
    }
}
