//! Raster side of the crop pipeline.
//!
//! This module provides the pixel-level primitives the session needs:
//! - Decoding JPEG/PNG bytes into RGB buffers
//! - Baking EXIF orientation into pixel data ("normalize to up")
//! - Free-angle rotation with bilinear/Lanczos3 resampling
//! - Extracting a resolved crop rectangle into a new buffer
//!
//! Everything is synchronous and single-threaded; a failed step aborts the
//! crop with a [`CropError`], never a partial image.

mod decode;
mod extract;
mod orient;
mod rotate;
mod types;

pub use decode::{decode_image, decode_image_unoriented};
pub use extract::extract_rect;
pub use orient::{normalize_orientation, orientation_from_bytes};
pub use rotate::{rotate, rotated_bounds, ResampleFilter};
pub use types::{CropError, Orientation, SourceImage};
