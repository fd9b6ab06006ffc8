use image::{imageops::FilterType, DynamicImage, RgbImage};

/// Upscale 2x in both dimensions with bicubic interpolation.
///
/// Every consumer of "the image" downstream of decode works on this doubled
/// resolution; the estimator applies the same upscale independently.
pub fn apply(img: RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();
    DynamicImage::ImageRgb8(img)
        .resize_exact(width * 2, height * 2, FilterType::CatmullRom)
        .to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_upscale_doubles_dimensions() {
        let img = RgbImage::new(30, 20);
        let result = apply(img);
        assert_eq!(result.dimensions(), (60, 40));
    }

    #[test]
    fn test_upscale_preserves_uniform_color() {
        // Bicubic weights sum to one, so a flat image stays flat
        let img = RgbImage::from_pixel(16, 16, Rgb([127, 64, 200]));
        let result = apply(img);
        for pixel in result.pixels() {
            assert_eq!(*pixel, Rgb([127, 64, 200]));
        }
    }
}
