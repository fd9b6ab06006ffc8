use image::RgbImage;

/// Color-temperature shift. Positive values warm the image by adding to the
/// red channel; negative values cool it by adding the magnitude to the blue
/// channel. The shift is deliberately asymmetric: warm and cool touch
/// different single channels rather than trading red against blue.
pub fn apply(img: RgbImage, color_temp: i32) -> RgbImage {
    if color_temp == 0 {
        return img;
    }

    let (channel, shift) = if color_temp > 0 {
        (0usize, color_temp)
    } else {
        (2usize, -color_temp)
    };

    let mut out = img;
    for pixel in out.pixels_mut() {
        let shifted = pixel.0[channel] as i32 + shift;
        pixel.0[channel] = shifted.clamp(0, 255) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_zero_is_identity() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let result = apply(img.clone(), 0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_positive_warms_red_only() {
        let img = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        let result = apply(img, 25);
        assert_eq!(*result.get_pixel(0, 0), Rgb([125, 100, 100]));
    }

    #[test]
    fn test_negative_cools_blue_only() {
        let img = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        let result = apply(img, -25);
        assert_eq!(*result.get_pixel(0, 0), Rgb([100, 100, 125]));
    }

    #[test]
    fn test_shift_clamps_at_white() {
        let img = RgbImage::from_pixel(2, 2, Rgb([250, 0, 0]));
        let result = apply(img, 40);
        assert_eq!(result.get_pixel(0, 0).0[0], 255);
    }
}
