use image::RgbImage;

/// Gamma correction via a 256-entry lookup table.
///
/// `table[i] = ((i/255)^(1/gamma)) * 255`, applied per channel. Skipped
/// entirely at gamma 1.0, where the table would be the identity.
pub fn apply(img: RgbImage, gamma: f32) -> RgbImage {
    if gamma == 1.0 {
        return img;
    }

    let inv_gamma = 1.0 / gamma;
    let mut table = [0u8; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mapped = (i as f32 / 255.0).powf(inv_gamma) * 255.0;
        *entry = mapped.round().clamp(0.0, 255.0) as u8;
    }

    let mut out = img;
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = table[*channel as usize];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_gamma_one_is_identity() {
        let img = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 30) as u8, (y * 30) as u8, 77]));
        let result = apply(img.clone(), 1.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_gamma_preserves_black_and_white() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));

        for gamma in [0.5, 1.5, 2.2] {
            let result = apply(img.clone(), gamma);
            assert_eq!(*result.get_pixel(0, 0), Rgb([0, 0, 0]));
            assert_eq!(*result.get_pixel(1, 0), Rgb([255, 255, 255]));
        }
    }

    #[test]
    fn test_gamma_above_one_brightens_midtones() {
        let img = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        let result = apply(img, 2.0);
        // (100/255)^0.5 * 255 ~= 160
        assert!(result.get_pixel(0, 0).0[0] > 100);
    }

    #[test]
    fn test_gamma_round_trip_approximates_identity() {
        let img = RgbImage::from_fn(16, 16, |x, y| {
            let v = ((x + y * 16) % 256) as u8;
            Rgb([v, v, v])
        });

        let forward = apply(img.clone(), 1.6);
        let back = apply(forward, 1.0 / 1.6);

        for (original, recovered) in img.pixels().zip(back.pixels()) {
            let diff = (original.0[0] as i32 - recovered.0[0] as i32).abs();
            assert!(diff <= 3, "quantization drift too large: {}", diff);
        }
    }
}
