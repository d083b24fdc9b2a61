//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Cropkit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use cropkit_core::{AspectRatio, SourceImage};
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// Wraps the core `SourceImage` type: RGB8 pixel data, three bytes per
/// pixel, row-major.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`; `free()` releases the WASM side explicitly, though
/// wasm-bindgen's finalizer will also handle cleanup automatically.
#[wasm_bindgen]
pub struct JsSourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourceImage {
    /// Create a JsSourceImage from a core SourceImage.
    pub(crate) fn from_source(img: SourceImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core SourceImage. Clones the pixel data.
    pub(crate) fn to_source(&self) -> SourceImage {
        SourceImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 aspect-ratio code to the core AspectRatio enum.
///
/// Values:
/// - 0 = Square (1:1)
/// - 1 = FourThree (4:3)
/// - 2 = ThreeFour (3:4)
/// - 3 = SixteenNine (16:9)
/// - 4 = NineSixteen (9:16)
///
/// Any other value defaults to Square.
pub(crate) fn aspect_from_u8(value: u8) -> AspectRatio {
    match value {
        1 => AspectRatio::FourThree,
        2 => AspectRatio::ThreeFour,
        3 => AspectRatio::SixteenNine,
        4 => AspectRatio::NineSixteen,
        _ => AspectRatio::Square,
    }
}
