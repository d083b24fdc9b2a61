//! EXIF orientation handling.
//!
//! Capture-time orientation is baked into pixel data before any geometry is
//! measured, so the resolver only ever sees an upright image.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

use super::{CropError, Orientation, SourceImage};

/// Read the EXIF orientation tag from encoded image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or the tag cannot
/// be read.
pub fn orientation_from_bytes(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Re-render `image` in "up" orientation.
///
/// # Errors
///
/// Returns `CropError::OrientationNormalization` when the pixel buffer does
/// not match the declared dimensions and the image cannot be re-rendered.
pub fn normalize_orientation(
    image: &SourceImage,
    orientation: Orientation,
) -> Result<SourceImage, CropError> {
    // The buffer is validated even for Normal: a crop must never be computed
    // against dimensions the pixel data does not back.
    let rgb = image
        .to_rgb_image()
        .ok_or(CropError::OrientationNormalization)?;

    if orientation == Orientation::Normal {
        return Ok(SourceImage::from_rgb_image(rgb));
    }

    let upright = bake_orientation(DynamicImage::ImageRgb8(rgb), orientation);
    Ok(SourceImage::from_rgb_image(upright.into_rgb8()))
}

/// Apply the transform an EXIF orientation value describes.
fn bake_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
