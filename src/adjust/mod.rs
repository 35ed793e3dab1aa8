//! Non-destructive image adjustments
//!
//! Every function here takes a bitmap by reference and returns a new one.
//! Brightness and contrast are always computed from a baseline image, never
//! from a previously adjusted result; see [`AdjustmentSession`] for the
//! stateful wrapper used by viewers.

mod session;

pub use session::AdjustmentSession;

use image::{DynamicImage, Pixel, Rgba, RgbaImage};

/// Rotate 90 degrees clockwise. The canvas grows to fit: width and height swap.
pub fn rotate_clockwise_90(image: &DynamicImage) -> DynamicImage {
    image.rotate90()
}

/// Apply brightness then contrast to `baseline`.
///
/// A factor of `1.0` leaves the image unchanged. Brightness scales each color
/// channel towards black; contrast scales each channel towards the image's
/// mean luminance. Alpha is left untouched and the output keeps the input's
/// alpha mode.
///
/// The mean comes from `imageops::grayscale`, which weights channels with the
/// Rec. 709 coefficients (0.2126, 0.7152, 0.0722), not the Rec. 601 ones.
/// Contrast results can differ by a level or two from tools using Rec. 601.
pub fn adjust_brightness_contrast(
    baseline: &DynamicImage,
    brightness: f32,
    contrast: f32,
) -> DynamicImage {
    let brightness = sanitize_factor(brightness);
    let contrast = sanitize_factor(contrast);

    if brightness == 1.0 && contrast == 1.0 {
        return baseline.clone();
    }

    let mut rgba = baseline.to_rgba8();
    if brightness != 1.0 {
        blend_towards(&mut rgba, 0.0, brightness);
    }
    if contrast != 1.0 {
        let mean = mean_luminance(&rgba);
        blend_towards(&mut rgba, mean, contrast);
    }

    if baseline.color().has_alpha() {
        DynamicImage::ImageRgba8(rgba)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8())
    }
}

/// Negative factors clamp to zero; NaN and infinities mean "no change".
fn sanitize_factor(factor: f32) -> f32 {
    if !factor.is_finite() {
        1.0
    } else {
        factor.max(0.0)
    }
}

/// Interpolate every color channel between a flat `degenerate` value and
/// the original: `degenerate + (value - degenerate) * factor`.
fn blend_towards(image: &mut RgbaImage, degenerate: f32, factor: f32) {
    for pixel in image.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let blend = |v: u8| -> u8 {
            let out = degenerate + (v as f32 - degenerate) * factor;
            out.round().clamp(0.0, 255.0) as u8
        };
        *pixel = Rgba([blend(r), blend(g), blend(b), a]);
    }
}

/// Mean Rec. 709 grayscale value, rounded to an integer level
fn mean_luminance(image: &RgbaImage) -> f32 {
    let pixel_count = image.width() as u64 * image.height() as u64;
    if pixel_count == 0 {
        return 0.0;
    }

    let gray = image::imageops::grayscale(image);
    let sum: u64 = gray.pixels().map(|p| p.channels()[0] as u64).sum();
    (sum as f64 / pixel_count as f64).round() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 40) as u8, (y * 30) as u8, ((x + y) * 10) as u8, 200])
        }))
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let image = gradient(4, 3);
        let rotated = rotate_clockwise_90(&image);
        assert_eq!(rotated.dimensions(), (3, 4));
    }

    #[test]
    fn test_rotate_is_clockwise() {
        let image = gradient(4, 3);
        let rotated = rotate_clockwise_90(&image);
        // The top-left pixel moves to the top-right corner
        assert_eq!(rotated.get_pixel(2, 0), image.get_pixel(0, 0));
        // The bottom-left pixel moves to the top-left corner
        assert_eq!(rotated.get_pixel(0, 0), image.get_pixel(0, 2));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let image = gradient(5, 2);
        let mut rotated = image.clone();
        for _ in 0..4 {
            rotated = rotate_clockwise_90(&rotated);
        }
        assert_eq!(rotated, image);
    }

    #[test]
    fn test_identity_factors() {
        let image = gradient(6, 6);
        assert_eq!(adjust_brightness_contrast(&image, 1.0, 1.0), image);
        assert_eq!(adjust_brightness_contrast(&image, f32::NAN, 1.0), image);
    }

    #[test]
    fn test_brightness_scales_channels() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([100, 50, 200, 77])));
        let brighter = adjust_brightness_contrast(&image, 1.5, 1.0);
        assert_eq!(brighter.get_pixel(1, 1), Rgba([150, 75, 255, 77]));

        let darker = adjust_brightness_contrast(&image, 0.5, 1.0);
        assert_eq!(darker.get_pixel(0, 0), Rgba([50, 25, 100, 77]));
    }

    #[test]
    fn test_contrast_on_flat_image_is_stable() {
        // Every pixel already equals the mean, so contrast cannot move it
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([128, 128, 128])));
        let adjusted = adjust_brightness_contrast(&image, 1.0, 2.0);
        assert_eq!(adjusted, image);
    }

    #[test]
    fn test_contrast_spreads_values() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([100, 100, 100])
            } else {
                Rgb([200, 200, 200])
            }
        }));
        let adjusted = adjust_brightness_contrast(&image, 1.0, 2.0);
        assert_eq!(adjusted.get_pixel(0, 0), Rgba([50, 50, 50, 255]));
        assert_eq!(adjusted.get_pixel(1, 0), Rgba([250, 250, 250, 255]));
    }

    #[test]
    fn test_adjust_keeps_alpha_mode() {
        let opaque = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([10, 20, 30])));
        assert!(!adjust_brightness_contrast(&opaque, 1.2, 0.8).color().has_alpha());
        assert!(adjust_brightness_contrast(&gradient(2, 2), 1.2, 0.8).color().has_alpha());
    }

    #[test]
    fn test_negative_factor_clamps_to_black() {
        let image = gradient(2, 2);
        let black = adjust_brightness_contrast(&image, -3.0, 1.0);
        assert_eq!(black.get_pixel(1, 1), Rgba([0, 0, 0, 200]));
    }

    #[test]
    fn test_mean_luminance_uses_rec709_weights() {
        // Rec. 709 puts 0.7152 on green: 200 * 0.7152 = 143 (Rec. 601 would give 117)
        let green = RgbaImage::from_pixel(2, 2, Rgba([0, 200, 0, 255]));
        assert_eq!(mean_luminance(&green), 143.0);

        let blue = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 250, 255]));
        assert_eq!(mean_luminance(&blue), 18.0);
    }

    #[test]
    fn test_adjust_empty_image() {
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert_eq!(adjust_brightness_contrast(&empty, 1.5, 1.5).dimensions(), (0, 0));
    }
}
