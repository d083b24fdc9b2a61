//! Materializing a resolved crop rectangle into a pixel buffer.

use crate::resolve::CropRect;

use super::{CropError, SourceImage};

/// Copy the pixels under `rect` out of `image`.
///
/// The rectangle is in source-pixel coordinates and may carry fractional
/// edges from the geometry resolution; edges are rounded to integer pixels
/// and clamped to the image bounds. The transform clamping upstream keeps the
/// rect inside the image, so clamping here only ever absorbs sub-pixel
/// rounding spill.
///
/// # Errors
///
/// Returns `CropError::ExtractionFailed` when the rectangle is degenerate,
/// non-finite, or rounds to an empty intersection with the image, or when
/// the pixel buffer does not back the declared dimensions.
pub fn extract_rect(image: &SourceImage, rect: &CropRect) -> Result<SourceImage, CropError> {
    if image.is_empty() {
        return Err(CropError::ExtractionFailed(
            "source image is empty".to_string(),
        ));
    }
    if image.pixels.len() != (image.width * image.height * 3) as usize {
        return Err(CropError::ExtractionFailed(
            "pixel buffer does not back the declared dimensions".to_string(),
        ));
    }
    if ![rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(CropError::ExtractionFailed(
            "rectangle is not finite".to_string(),
        ));
    }
    if rect.width < 0.5 || rect.height < 0.5 {
        return Err(CropError::ExtractionFailed(format!(
            "rectangle {:.1}x{:.1} rounds to an empty region",
            rect.width, rect.height
        )));
    }

    let left = (rect.x.round().max(0.0) as u64).min(image.width as u64) as u32;
    let top = (rect.y.round().max(0.0) as u64).min(image.height as u64) as u32;
    let right = ((rect.x + rect.width).round().max(0.0) as u64).min(image.width as u64) as u32;
    let bottom = ((rect.y + rect.height).round().max(0.0) as u64).min(image.height as u64) as u32;

    if right <= left || bottom <= top {
        return Err(CropError::ExtractionFailed(format!(
            "rectangle ({:.1}, {:.1}, {:.1}, {:.1}) lies outside the {}x{} image",
            rect.x, rect.y, rect.width, rect.height, image.width, image.height
        )));
    }

    let out_width = right - left;
    let out_height = bottom - top;
    let row_bytes = (out_width * 3) as usize;

    let mut output = vec![0u8; (out_width * out_height * 3) as usize];

    for y in 0..out_height {
        let src_start = (((top + y) * image.width + left) * 3) as usize;
        let dst_start = y as usize * row_bytes;
        output[dst_start..dst_start + row_bytes]
            .copy_from_slice(&image.pixels[src_start..src_start + row_bytes]);
    }

    Ok(SourceImage {
        width: out_width,
        height: out_height,
        pixels: output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test image where each pixel encodes its position.
    fn test_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        SourceImage {
            width,
            height,
            pixels,
        }
    }

    fn rect(x: f64, y: f64, width: f64, height: f64) -> CropRect {
        CropRect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_full_extract() {
        let img = test_image(100, 100);
        let result = extract_rect(&img, &rect(0.0, 0.0, 100.0, 100.0)).unwrap();

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 100);
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_interior_extract() {
        let img = test_image(10, 10);
        let result = extract_rect(&img, &rect(2.0, 2.0, 6.0, 6.0)).unwrap();

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // First pixel comes from (2, 2): value 2 * 10 + 2 = 22
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_fractional_edges_round() {
        let img = test_image(100, 100);
        // 24.6 rounds to 25, 24.6 + 50.1 rounds to 75
        let result = extract_rect(&img, &rect(24.6, 24.6, 50.1, 50.1)).unwrap();

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 50);
    }

    #[test]
    fn test_subpixel_spill_clamped() {
        let img = test_image(100, 100);
        // Rounds to (0, 0, 100, 100) despite spilling 0.4px past each edge
        let result = extract_rect(&img, &rect(-0.4, -0.4, 100.8, 100.8)).unwrap();

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 100);
    }

    #[test]
    fn test_rect_outside_image_fails() {
        let img = test_image(10, 10);
        let result = extract_rect(&img, &rect(50.0, 50.0, 5.0, 5.0));
        assert!(matches!(result, Err(CropError::ExtractionFailed(_))));

        let result = extract_rect(&img, &rect(-50.0, 0.0, 5.0, 5.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_rect_fails() {
        let img = test_image(10, 10);
        assert!(extract_rect(&img, &rect(2.0, 2.0, 0.0, 5.0)).is_err());
        assert!(extract_rect(&img, &rect(2.0, 2.0, 5.0, 0.2)).is_err());
        assert!(extract_rect(&img, &rect(2.0, 2.0, -5.0, 5.0)).is_err());
    }

    #[test]
    fn test_non_finite_rect_fails() {
        let img = test_image(10, 10);
        assert!(extract_rect(&img, &rect(f64::NAN, 2.0, 5.0, 5.0)).is_err());
        assert!(extract_rect(&img, &rect(2.0, 2.0, f64::INFINITY, 5.0)).is_err());
    }

    #[test]
    fn test_empty_source_fails() {
        let img = SourceImage::new(0, 0, vec![]);
        assert!(extract_rect(&img, &rect(0.0, 0.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_mismatched_buffer_fails() {
        let broken = SourceImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 30], // far too short for 10x10
        };
        let result = extract_rect(&broken, &rect(0.0, 0.0, 5.0, 5.0));
        assert!(matches!(result, Err(CropError::ExtractionFailed(_))));
    }

    #[test]
    fn test_pixel_values_preserved() {
        let img = test_image(10, 10);
        let result = extract_rect(&img, &rect(3.0, 3.0, 4.0, 4.0)).unwrap();

        // First pixel from (3, 3): value 3 * 10 + 3 = 33
        assert_eq!(result.pixels[0], 33);
        assert_eq!(result.pixels[1], 33);
        assert_eq!(result.pixels[2], 33);
    }

    #[test]
    fn test_rectangular_strip() {
        let img = test_image(200, 100);
        let result = extract_rect(&img, &rect(0.0, 0.0, 50.0, 100.0)).unwrap();

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 100);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
