use image::RgbImage;
use imageproc::edges::canny;

/// Canny thresholds for the edge detector
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;

/// Edge overlay: detect edges on the current image and composite them
/// additively, `out = img + edges * (edge_mark * 0.5)`, clamped. High
/// strengths can push edge pixels to full saturation; that is the intended
/// look. Skipped when the strength is zero or negative.
pub fn apply(img: RgbImage, edge_mark: f32) -> RgbImage {
    if edge_mark <= 0.0 {
        return img;
    }

    let gray = image::DynamicImage::ImageRgb8(img.clone()).to_luma8();
    let edges = canny(&gray, CANNY_LOW, CANNY_HIGH);
    let weight = edge_mark * 0.5;

    let mut out = img;
    for (pixel, edge) in out.pixels_mut().zip(edges.pixels()) {
        let boost = edge.0[0] as f32 * weight;
        if boost > 0.0 {
            for channel in pixel.0.iter_mut() {
                *channel = (*channel as f32 + boost).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn step_edge_image() -> RgbImage {
        RgbImage::from_fn(40, 40, |x, _| {
            if x < 20 {
                Rgb([20, 20, 20])
            } else {
                Rgb([230, 230, 230])
            }
        })
    }

    #[test]
    fn test_zero_strength_is_identity() {
        let img = step_edge_image();
        let result = apply(img.clone(), 0.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_negative_strength_is_identity() {
        let img = step_edge_image();
        let result = apply(img.clone(), -1.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_overlay_brightens_edge_pixels_only() {
        let img = step_edge_image();
        let result = apply(img.clone(), 1.0);

        // Far from the edge nothing changes
        assert_eq!(*result.get_pixel(2, 20), *img.get_pixel(2, 20));
        assert_eq!(*result.get_pixel(38, 20), *img.get_pixel(38, 20));

        // Somewhere along the vertical boundary a pixel got boosted
        let boosted = (18..22).any(|x| {
            (0..40).any(|y| result.get_pixel(x, y).0[0] > img.get_pixel(x, y).0[0])
        });
        assert!(boosted, "expected at least one boosted edge pixel");
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let img = RgbImage::from_pixel(32, 32, Rgb([128, 128, 128]));
        let result = apply(img.clone(), 2.0);
        assert_eq!(result, img);
    }
}
