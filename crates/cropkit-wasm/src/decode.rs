//! Image decoding WASM bindings.
//!
//! Embeddings that hold raw file bytes (from a picker or drag-and-drop) can
//! decode them here instead of shipping their own decoder.

use cropkit_core::raster;
use wasm_bindgen::prelude::*;

use crate::types::JsSourceImage;

/// Decode JPEG or PNG bytes, baking the EXIF orientation into the pixels.
///
/// # Arguments
///
/// * `bytes` - the encoded file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsSourceImage` with upright RGB pixel data, or an error if the bytes
/// are not a supported image or are corrupted.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// const session = new JsCropSession(image.width, image.height, 0, 5.0, false, 4.0);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    raster::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode JPEG or PNG bytes without applying EXIF orientation.
///
/// Pair this with [`get_orientation`] when the orientation should be handed
/// to `JsCropSession.crop` instead of baked in up front.
#[wasm_bindgen]
pub fn decode_image_unoriented(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    raster::decode_image_unoriented(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation value (1-8) from encoded image bytes.
///
/// Returns 1 (upright) when no EXIF data is present or readable.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u32 {
    raster::orientation_from_bytes(bytes) as u32
}
