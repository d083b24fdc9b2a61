//! Decoding encoded image bytes into [`SourceImage`].
//!
//! Hosts that already hold decoded pixels can skip this module entirely and
//! construct a [`SourceImage`] directly; it exists so embeddings can hand the
//! widget the raw file bytes they got from a picker.

use std::io::Cursor;

use image::ImageReader;

use super::orient::orientation_from_bytes;
use super::{normalize_orientation, CropError, Orientation, SourceImage};

/// Decode JPEG or PNG bytes, baking the EXIF orientation into the pixels.
///
/// # Errors
///
/// Returns `CropError::Decode` if the bytes are not a supported image or are
/// corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, CropError> {
    let orientation = orientation_from_bytes(bytes);
    let decoded = decode_image_unoriented(bytes)?;

    if orientation == Orientation::Normal {
        return Ok(decoded);
    }
    // The buffer came straight out of the decoder, so re-rendering it cannot
    // fail on a size mismatch; map the error anyway rather than unwrapping.
    normalize_orientation(&decoded, orientation)
}

/// Decode JPEG or PNG bytes without applying EXIF orientation.
///
/// Use this when the host applies orientation itself, or when passing the
/// orientation separately into the crop pipeline.
pub fn decode_image_unoriented(bytes: &[u8]) -> Result<SourceImage, CropError> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| CropError::Decode(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CropError::Decode(e.to_string()))?;

    Ok(SourceImage::from_rgb_image(img.into_rgb8()))
}
