//! Cropkit Core - crop widget engine
//!
//! This crate provides the engine behind the Cropkit crop widget: the
//! gesture-to-transform reducer, the crop geometry resolver, and the raster
//! operations that materialize the final image.
//!
//! # Data Flow
//!
//! Gesture events feed a [`session::CropSession`], which keeps the visible
//! transform within bounds that guarantee the mask is always covered by
//! image content. When the user confirms, the session resolves the committed
//! transform into a source-pixel rectangle ([`resolve`]) and extracts it
//! ([`raster`]), optionally rotating first.

pub mod geometry;
pub mod raster;
pub mod resolve;
pub mod session;

pub use geometry::{AspectRatio, DisplayGeometry, Size, Vec2};
pub use raster::{CropError, Orientation, ResampleFilter, SourceImage};
pub use resolve::{resolve_crop_rect, CropRect};
pub use session::{CropSession, SessionPhase, TransformState};

/// Behavioral configuration for a crop session.
///
/// Only behavior lives here; colors, typography, and other cosmetic options
/// belong to the embedding presentation layer. Values must be positive -
/// malformed configuration is a caller contract violation checked with debug
/// assertions, not validated at runtime.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropConfig {
    /// Upper bound on zoom.
    pub max_magnification_scale: f64,
    /// Enables the rotation gesture and the pre-crop rotation pass.
    pub rotate_image: bool,
    /// Scales how strongly a magnification gesture changes the zoom.
    pub zoom_sensitivity: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            max_magnification_scale: 5.0,
            rotate_image: false,
            zoom_sensitivity: 4.0,
        }
    }
}

impl CropConfig {
    /// Create a new CropConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CropConfig::new();
        assert_eq!(config.max_magnification_scale, 5.0);
        assert!(!config.rotate_image);
        assert_eq!(config.zoom_sensitivity, 4.0);
    }

    #[test]
    fn test_config_override() {
        let config = CropConfig {
            max_magnification_scale: 3.0,
            rotate_image: true,
            ..Default::default()
        };
        assert_eq!(config.max_magnification_scale, 3.0);
        assert!(config.rotate_image);
        assert_eq!(config.zoom_sensitivity, 4.0);
    }
}
