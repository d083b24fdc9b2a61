//! The crop session: gesture-to-transform reducer and crop entry point.
//!
//! A session owns one image's transform state for its whole lifetime. Gesture
//! streams feed it continuous deltas through `on_*` handlers; each stream's
//! `on_*_end` commits the live value as the base for the next delta. The
//! final `crop` call consumes the committed transform exactly once.
//!
//! # Clamping Order
//!
//! When the scale changes, the offset bounds are recomputed from the *new*
//! scale before the offset is re-clamped. A zoom-out therefore pulls an
//! off-center image back just far enough that the mask never exposes area
//! outside it.

use serde::{Deserialize, Serialize};

use crate::geometry::{AspectRatio, DisplayGeometry, Size, Vec2};
use crate::raster::{
    extract_rect, normalize_orientation, rotate, CropError, Orientation, ResampleFilter,
    SourceImage,
};
use crate::resolve::resolve_crop_rect;
use crate::CropConfig;

/// Committed angles smaller than this skip the pre-crop rotation pass.
const ANGLE_EPSILON: f64 = 1e-4;

/// Live and committed transform values for one session.
///
/// `scale`, `offset`, and `angle` track the in-flight gesture; the `last_*`
/// snapshots hold the values committed when the previous gesture ended and
/// serve as the base for the next incremental delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub scale: f64,
    pub offset: Vec2,
    /// Radians, positive = counter-clockwise.
    pub angle: f64,
    pub last_scale: f64,
    pub last_offset: Vec2,
    pub last_angle: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::default(),
            angle: 0.0,
            last_scale: 1.0,
            last_offset: Vec2::default(),
            last_angle: 0.0,
        }
    }
}

/// Where a session is in its life cycle.
///
/// `Resolving` is entered exactly once, on the crop call, and immediately
/// gives way to one of the two terminal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, no gesture received yet.
    #[default]
    Idle,
    /// A gesture stream is delivering deltas.
    Interacting,
    /// The last gesture ended; the transform is stable.
    Committed,
    /// The crop call is running.
    Resolving,
    /// Crop produced an image.
    Done,
    /// Crop failed; no image was produced.
    Failed,
}

/// One crop session over one image.
pub struct CropSession {
    config: CropConfig,
    aspect: AspectRatio,
    original_size: Size,
    available: Size,
    geometry: DisplayGeometry,
    transform: TransformState,
    phase: SessionPhase,
}

impl CropSession {
    /// Start a session for an image of `original_size` pixels.
    ///
    /// The session is not usable for gestures until the host reports its
    /// layout through [`CropSession::on_mask_resize`].
    pub fn new(original_size: Size, aspect: AspectRatio, config: CropConfig) -> Self {
        debug_assert!(
            config.max_magnification_scale > 0.0,
            "max_magnification_scale must be positive"
        );
        debug_assert!(
            config.zoom_sensitivity > 0.0,
            "zoom_sensitivity must be positive"
        );
        Self {
            config,
            aspect,
            original_size,
            available: Size::default(),
            geometry: DisplayGeometry::default(),
            transform: TransformState::default(),
            phase: SessionPhase::Idle,
        }
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.transform.offset
    }

    pub fn angle(&self) -> f64 {
        self.transform.angle
    }

    fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Done | SessionPhase::Failed)
    }

    fn accepts_gestures(&self) -> bool {
        self.geometry.is_ready() && !self.is_finished()
    }

    /// Recompute the display geometry for a new available area.
    ///
    /// Must be called whenever the container size or the aspect ratio
    /// changes. The rendered-image size is re-derived as the uniform fit of
    /// the source into the area, and the current transform is pulled back
    /// inside the new bounds.
    pub fn on_mask_resize(&mut self, available: Size) {
        self.available = available;
        self.geometry = DisplayGeometry::compute(self.original_size, self.aspect, available);
        self.reclamp();
    }

    /// Switch the mask to a different ratio, reusing the last reported area.
    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
        self.on_mask_resize(self.available);
    }

    /// Pull scale and offset (live and committed) back inside the bounds the
    /// current geometry permits.
    fn reclamp(&mut self) {
        if !self.geometry.is_ready() {
            return;
        }
        let min = self.geometry.min_scale();
        let max = self.config.max_magnification_scale;
        // min wins over the ceiling: a mask wider than the rendered image can
        // push min_scale past the configured maximum, and the covering
        // invariant takes precedence.
        self.transform.scale = self.transform.scale.min(max).max(min);
        self.transform.last_scale = self.transform.last_scale.min(max).max(min);

        let limit = self.geometry.max_offset(self.transform.scale);
        self.transform.offset = self.transform.offset.clamp_abs(limit);
        self.transform.last_offset = self.transform.last_offset.clamp_abs(limit);
    }

    /// Handle a magnification delta. `raw_magnitude` of 1.0 means no change.
    ///
    /// Returns the resulting scale. No-op until the layout is measured.
    pub fn on_magnify(&mut self, raw_magnitude: f64) -> f64 {
        if !self.accepts_gestures() {
            return self.transform.scale;
        }
        self.phase = SessionPhase::Interacting;

        let damped = (raw_magnitude - 1.0) * (0.1 * self.config.zoom_sensitivity) + 1.0;
        let scale = (damped * self.transform.last_scale)
            .min(self.config.max_magnification_scale)
            .max(self.geometry.min_scale());
        self.transform.scale = scale;

        // A smaller scale shrinks the valid pan range; re-clamp against the
        // bounds of the new scale.
        let limit = self.geometry.max_offset(scale);
        self.transform.offset = self.transform.offset.clamp_abs(limit);

        scale
    }

    /// Commit the magnification gesture.
    pub fn on_magnify_end(&mut self) {
        if self.is_finished() {
            return;
        }
        self.transform.last_scale = self.transform.scale;
        self.transform.last_offset = self.transform.offset;
        self.phase = SessionPhase::Committed;
    }

    /// Handle a drag delta measured from the gesture's start.
    ///
    /// Returns the resulting offset. No-op until the layout is measured.
    pub fn on_drag(&mut self, translation: Vec2) -> Vec2 {
        if !self.accepts_gestures() {
            return self.transform.offset;
        }
        self.phase = SessionPhase::Interacting;

        let limit = self.geometry.max_offset(self.transform.scale);
        let proposed = Vec2::new(
            translation.x + self.transform.last_offset.x,
            translation.y + self.transform.last_offset.y,
        );
        self.transform.offset = proposed.clamp_abs(limit);
        self.transform.offset
    }

    /// Commit the drag gesture.
    pub fn on_drag_end(&mut self) {
        if self.is_finished() {
            return;
        }
        self.transform.last_offset = self.transform.offset;
        self.phase = SessionPhase::Committed;
    }

    /// Handle a rotation update, radians, positive = counter-clockwise.
    ///
    /// Unclamped direct assignment. No-op unless rotation is enabled in the
    /// configuration.
    pub fn on_rotate(&mut self, angle: f64) -> f64 {
        if !self.config.rotate_image || !self.accepts_gestures() {
            return self.transform.angle;
        }
        self.phase = SessionPhase::Interacting;
        self.transform.angle = angle;
        angle
    }

    /// Commit the rotation gesture.
    pub fn on_rotate_end(&mut self) {
        if self.is_finished() {
            return;
        }
        self.transform.last_angle = self.transform.angle;
        self.phase = SessionPhase::Committed;
    }

    /// Materialize the crop the committed transform describes.
    ///
    /// `image` is the source raster; `orientation` its capture-time EXIF tag
    /// (pass `Orientation::Normal` for already-upright pixels). The pipeline
    /// normalizes orientation, applies the committed rotation when enabled,
    /// resolves the pixel rectangle, and extracts it.
    ///
    /// This is terminal: the session moves to `Done` or `Failed` and accepts
    /// no further gestures. Retrying means opening a new session.
    ///
    /// # Errors
    ///
    /// Any [`CropError`]; the caller never receives a partial image.
    pub fn crop(
        &mut self,
        image: &SourceImage,
        orientation: Orientation,
    ) -> Result<SourceImage, CropError> {
        debug_assert!(!self.is_finished(), "crop called on a finished session");
        debug_assert!(
            self.geometry.is_ready(),
            "crop called before layout was measured"
        );
        self.phase = SessionPhase::Resolving;

        let result = self.run_crop(image, orientation);
        self.phase = if result.is_ok() {
            SessionPhase::Done
        } else {
            SessionPhase::Failed
        };
        result
    }

    fn run_crop(
        &self,
        image: &SourceImage,
        orientation: Orientation,
    ) -> Result<SourceImage, CropError> {
        let upright = normalize_orientation(image, orientation)?;

        // The committed angle is negated so the extracted pixels match the
        // rotation direction the user saw on screen.
        let source = if self.config.rotate_image && self.transform.last_angle.abs() > ANGLE_EPSILON
        {
            rotate(&upright, -self.transform.last_angle, ResampleFilter::Lanczos3)?
        } else {
            upright
        };

        let rect = resolve_crop_rect(
            Size::new(source.width as f64, source.height as f64),
            self.geometry.image_size_in_view,
            self.geometry.mask_size,
            self.transform.last_scale,
            self.transform.last_offset,
        );

        extract_rect(&source, &rect)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
