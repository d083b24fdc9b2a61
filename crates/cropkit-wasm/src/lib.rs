//! Cropkit WASM - WebAssembly bindings for the Cropkit crop widget
//!
//! This crate exposes the cropkit-core session and pipeline to
//! JavaScript/TypeScript embeddings.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `session` - The stateful crop session (gestures, layout, crop)
//! - `decode` - Image decoding bindings (JPEG/PNG with EXIF orientation)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsCropSession } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//!
//! const session = new JsCropSession(image.width, image.height, 0, 5.0, false, 4.0);
//! session.on_mask_resize(view.width, view.height);
//! // ...forward gestures, then:
//! const cropped = session.crop(image, 1);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod session;
mod types;

// Re-export public types
pub use decode::{decode_image, decode_image_unoriented, get_orientation};
pub use session::JsCropSession;
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
