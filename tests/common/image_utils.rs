//! Image inspection utilities for testing.
//!
//! This module provides helper functions for decoding rendered figures
//! and checking what actually landed on the canvas.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::Path;

/// Maximum pixel difference tolerated by [`assert_images_approx_eq`]
pub const DEFAULT_PIXEL_DIFF: u8 = 1;

/// Load an image from a file
pub fn load_image(path: &Path) -> Result<DynamicImage, image::ImageError> {
    image::open(path)
}

/// Detect image format from bytes
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Check if an image has the expected dimensions
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (actual_width, actual_height) = image.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    Ok(())
}

/// Fraction of pixels that are not pure white.
///
/// Rendered figures start from a white fill, so this measures how much
/// of the canvas the figure actually covered.
pub fn non_white_fraction(image: &DynamicImage) -> f64 {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return 0.0;
    }

    let mut drawn = 0usize;
    for y in 0..height {
        for x in 0..width {
            let pixel = image.get_pixel(x, y);
            if pixel.0[0] != 255 || pixel.0[1] != 255 || pixel.0[2] != 255 {
                drawn += 1;
            }
        }
    }
    drawn as f64 / (width as f64 * height as f64)
}

/// Count the pixels whose RGB channels differ by more than `max_diff`
/// between two same-sized images.
pub fn count_differing_pixels(
    a: &DynamicImage,
    b: &DynamicImage,
    max_diff: u8,
) -> Result<usize, String> {
    let (aw, ah) = a.dimensions();
    let (bw, bh) = b.dimensions();
    if (aw, ah) != (bw, bh) {
        return Err(format!(
            "Image dimensions differ: {}x{} vs {}x{}",
            aw, ah, bw, bh
        ));
    }

    let mut differing = 0usize;
    for y in 0..ah {
        for x in 0..aw {
            let pa = a.get_pixel(x, y);
            let pb = b.get_pixel(x, y);
            let changed = pa.0[..3]
                .iter()
                .zip(pb.0[..3].iter())
                .any(|(&ca, &cb)| (ca as i16 - cb as i16).unsigned_abs() as u8 > max_diff);
            if changed {
                differing += 1;
            }
        }
    }
    Ok(differing)
}

/// Compare two images for approximate equality
///
/// # Returns
///
/// * `Ok(())` if no pixel differs by more than `max_diff` per channel
/// * `Err(String)` with an error message otherwise
pub fn assert_images_approx_eq(
    actual: &DynamicImage,
    expected: &DynamicImage,
    max_diff: Option<u8>,
) -> Result<(), String> {
    let max_diff = max_diff.unwrap_or(DEFAULT_PIXEL_DIFF);
    let differing = count_differing_pixels(actual, expected, max_diff)?;
    if differing > 0 {
        return Err(format!(
            "Images differ at {} pixels (tolerance {})",
            differing, max_diff
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(width, height, Rgb(color));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_detect_image_format() {
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::new(2, 2);
        let mut png_bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
            .unwrap();

        let format = detect_image_format(&png_bytes).unwrap();
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_assert_image_dimensions() {
        let img = DynamicImage::new_rgb8(10, 20);

        assert!(assert_image_dimensions(&img, 10, 20).is_ok());
        assert!(assert_image_dimensions(&img, 11, 20).is_err());
        assert!(assert_image_dimensions(&img, 10, 21).is_err());
    }

    #[test]
    fn test_non_white_fraction() {
        assert_eq!(non_white_fraction(&solid(4, 4, [255, 255, 255])), 0.0);
        assert_eq!(non_white_fraction(&solid(4, 4, [0, 0, 0])), 1.0);
    }

    #[test]
    fn test_assert_images_approx_eq() {
        let white = solid(3, 3, [255, 255, 255]);
        let near_white = solid(3, 3, [254, 255, 255]);
        let gray = solid(3, 3, [128, 128, 128]);

        assert!(assert_images_approx_eq(&white, &near_white, None).is_ok());
        assert!(assert_images_approx_eq(&white, &near_white, Some(0)).is_err());
        assert!(assert_images_approx_eq(&white, &gray, None).is_err());
        // Dimension mismatch is an error, not a panic.
        assert!(assert_images_approx_eq(&white, &solid(2, 2, [255, 255, 255]), None).is_err());
    }
}
