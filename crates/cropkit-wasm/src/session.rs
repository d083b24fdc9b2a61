//! WASM bindings for the crop session.
//!
//! The session is the stateful object an embedding drives: construct it with
//! the source pixel size and configuration, forward layout and gesture
//! events, then call `crop` once on confirmation.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession(4000, 3000, AspectRatio.Square, 5.0, false, 4.0);
//! session.on_mask_resize(400, 300);
//!
//! // forwarded from the host's gesture recognizers
//! session.on_magnify(pinch.magnitude);
//! session.on_magnify_end();
//!
//! const cropped = session.crop(image, orientation);
//! if (cropped === undefined) {
//!   // the crop failed; prompt the user to retry with a new session
//! }
//! ```

use cropkit_core::{CropConfig, CropSession, Orientation, SessionPhase, Size, Vec2};
use wasm_bindgen::prelude::*;

use crate::types::{aspect_from_u8, JsSourceImage};

/// One crop session over one image, driven from JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start a session for an image of the given pixel size.
    ///
    /// # Arguments
    ///
    /// * `original_width`, `original_height` - source image pixel size
    /// * `aspect_ratio` - ratio code (0 = 1:1, 1 = 4:3, 2 = 3:4, 3 = 16:9, 4 = 9:16)
    /// * `max_magnification_scale` - upper bound on zoom (must be positive)
    /// * `rotate_image` - enables the rotation gesture and pre-crop rotation
    /// * `zoom_sensitivity` - magnification responsiveness (must be positive)
    #[wasm_bindgen(constructor)]
    pub fn new(
        original_width: f64,
        original_height: f64,
        aspect_ratio: u8,
        max_magnification_scale: f64,
        rotate_image: bool,
        zoom_sensitivity: f64,
    ) -> JsCropSession {
        let config = CropConfig {
            max_magnification_scale,
            rotate_image,
            zoom_sensitivity,
        };
        JsCropSession {
            inner: CropSession::new(
                Size::new(original_width, original_height),
                aspect_from_u8(aspect_ratio),
                config,
            ),
        }
    }

    /// Report the available layout area. Must be called whenever the
    /// container resizes; gestures are ignored until the first call.
    pub fn on_mask_resize(&mut self, width: f64, height: f64) {
        self.inner.on_mask_resize(Size::new(width, height));
    }

    /// Switch the mask to a different ratio code.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: u8) {
        self.inner.set_aspect_ratio(aspect_from_u8(aspect_ratio));
    }

    /// Handle a magnification delta (1.0 = no change). Returns the scale.
    pub fn on_magnify(&mut self, raw_magnitude: f64) -> f64 {
        self.inner.on_magnify(raw_magnitude)
    }

    /// Commit the magnification gesture.
    pub fn on_magnify_end(&mut self) {
        self.inner.on_magnify_end();
    }

    /// Handle a drag translation measured from the gesture's start.
    pub fn on_drag(&mut self, x: f64, y: f64) {
        self.inner.on_drag(Vec2::new(x, y));
    }

    /// Commit the drag gesture.
    pub fn on_drag_end(&mut self) {
        self.inner.on_drag_end();
    }

    /// Handle a rotation update in radians (positive = counter-clockwise).
    /// Ignored unless rotation was enabled at construction.
    pub fn on_rotate(&mut self, angle: f64) -> f64 {
        self.inner.on_rotate(angle)
    }

    /// Commit the rotation gesture.
    pub fn on_rotate_end(&mut self) {
        self.inner.on_rotate_end();
    }

    /// Current magnification.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.scale()
    }

    /// Current pan offset, x component.
    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.offset().x
    }

    /// Current pan offset, y component.
    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.offset().y
    }

    /// Current rotation angle in radians.
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.angle()
    }

    /// On-screen mask width for the current layout.
    #[wasm_bindgen(getter)]
    pub fn mask_width(&self) -> f64 {
        self.inner.geometry().mask_size.width
    }

    /// On-screen mask height for the current layout.
    #[wasm_bindgen(getter)]
    pub fn mask_height(&self) -> f64 {
        self.inner.geometry().mask_size.height
    }

    /// True once the crop has run, successfully or not.
    #[wasm_bindgen(getter)]
    pub fn is_finished(&self) -> bool {
        matches!(
            self.inner.phase(),
            SessionPhase::Done | SessionPhase::Failed
        )
    }

    /// The full display geometry as `{ image_size_in_view, mask_size }`.
    pub fn geometry(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.geometry()).unwrap_or(JsValue::NULL)
    }

    /// The live and committed transform values.
    pub fn transform(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.transform()).unwrap_or(JsValue::NULL)
    }

    /// Materialize the crop. Terminal: the session accepts no gestures
    /// afterwards.
    ///
    /// `orientation` is the EXIF orientation value (1-8) of the source
    /// pixels; pass 1 for already-upright data.
    ///
    /// # Returns
    ///
    /// The cropped image, or `undefined` if any pipeline step failed. There
    /// is no partial result; retrying means constructing a new session.
    pub fn crop(&mut self, image: &JsSourceImage, orientation: u32) -> Option<JsSourceImage> {
        let source = image.to_source();
        self.inner
            .crop(&source, Orientation::from(orientation))
            .ok()
            .map(JsSourceImage::from_source)
    }
}
