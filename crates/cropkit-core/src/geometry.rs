//! Display-space geometry: sizes, offsets, aspect ratios, and mask layout.
//!
//! All values here are measured in display points (the coordinate space the
//! host renders in), not source pixels. Mapping into source-pixel space
//! happens in [`crate::resolve`].

use serde::{Deserialize, Serialize};

/// A width/height pair in display points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is missing. Layout that has not been
    /// measured yet reports a zero size.
    pub fn is_zero(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Uniformly scale `self` so it fits inside `bounds` while preserving
    /// its own width/height ratio. At least one dimension of the result
    /// touches the corresponding bound.
    pub fn scale_to_fit(&self, bounds: Size) -> Size {
        if self.is_zero() || bounds.is_zero() {
            return Size::default();
        }
        let scale = (bounds.width / self.width).min(bounds.height / self.height);
        Size::new(self.width * scale, self.height * scale)
    }
}

/// A 2D offset in display points. Positive x moves right, positive y moves
/// down, matching the host view's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp each component into `[-limit, limit]` per axis.
    pub fn clamp_abs(self, limit: Vec2) -> Vec2 {
        Vec2 {
            x: self.x.clamp(-limit.x, limit.x),
            y: self.y.clamp(-limit.y, limit.y),
        }
    }
}

/// The selectable mask shapes, each a fixed width:height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1
    #[default]
    Square,
    /// 4:3 landscape
    FourThree,
    /// 3:4 portrait
    ThreeFour,
    /// 16:9 landscape
    SixteenNine,
    /// 9:16 portrait
    NineSixteen,
}

impl AspectRatio {
    /// The (width, height) ratio pair for this variant.
    pub fn ratio(self) -> (f64, f64) {
        match self {
            AspectRatio::Square => (1.0, 1.0),
            AspectRatio::FourThree => (4.0, 3.0),
            AspectRatio::ThreeFour => (3.0, 4.0),
            AspectRatio::SixteenNine => (16.0, 9.0),
            AspectRatio::NineSixteen => (9.0, 16.0),
        }
    }

    /// Width divided by height.
    pub fn value(self) -> f64 {
        let (w, h) = self.ratio();
        w / h
    }

    /// The largest size with this ratio that fits inside `available`.
    ///
    /// One dimension is clamped to the available space, the other derived,
    /// so the ratio holds exactly rather than within rounding of two clamps.
    pub fn fit_within(self, available: Size) -> Size {
        if available.is_zero() {
            return Size::default();
        }
        let ratio = self.value();
        if available.width / available.height > ratio {
            // Height-limited: derive width from the full available height
            Size::new(available.height * ratio, available.height)
        } else {
            Size::new(available.width, available.width / ratio)
        }
    }
}

/// Derived layout for one crop session: how large the image renders on
/// screen and how large the mask window is.
///
/// Recomputed as a whole whenever the available area or the aspect ratio
/// changes; never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// On-screen size of the rendered image at scale 1 (uniform fit of the
    /// source pixel size into the available area).
    pub image_size_in_view: Size,
    /// On-screen size of the crop window.
    pub mask_size: Size,
}

impl DisplayGeometry {
    /// Derive the geometry for a source image of `original` pixels shown in
    /// an `available` area with a mask of the given ratio.
    pub fn compute(original: Size, aspect: AspectRatio, available: Size) -> Self {
        Self {
            image_size_in_view: original.scale_to_fit(available),
            mask_size: aspect.fit_within(available),
        }
    }

    /// False until the host has reported a measured layout. Gesture handling
    /// must be gated on this to keep the scale/offset bounds well defined.
    pub fn is_ready(&self) -> bool {
        !self.image_size_in_view.is_zero() && !self.mask_size.is_zero()
    }

    /// The smallest magnification at which the image still fully covers the
    /// mask in both dimensions. Zero while the layout is unmeasured.
    pub fn min_scale(&self) -> f64 {
        if self.image_size_in_view.is_zero() {
            return 0.0;
        }
        let sx = self.mask_size.width / self.image_size_in_view.width;
        let sy = self.mask_size.height / self.image_size_in_view.height;
        sx.max(sy)
    }

    /// How far the image center may move from the mask center at the given
    /// magnification without the mask leaving the scaled image, per axis.
    pub fn max_offset(&self, scale: f64) -> Vec2 {
        Vec2 {
            x: ((self.image_size_in_view.width / 2.0) * scale - self.mask_size.width / 2.0)
                .max(0.0),
            y: ((self.image_size_in_view.height / 2.0) * scale - self.mask_size.height / 2.0)
                .max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_RATIOS: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::FourThree,
        AspectRatio::ThreeFour,
        AspectRatio::SixteenNine,
        AspectRatio::NineSixteen,
    ];

    #[test]
    fn test_scale_to_fit_landscape_into_landscape() {
        let fitted = Size::new(4000.0, 3000.0).scale_to_fit(Size::new(400.0, 300.0));
        assert_eq!(fitted, Size::new(400.0, 300.0));
    }

    #[test]
    fn test_scale_to_fit_touches_one_bound() {
        let fitted = Size::new(2000.0, 1000.0).scale_to_fit(Size::new(400.0, 400.0));
        assert_eq!(fitted.width, 400.0);
        assert_eq!(fitted.height, 200.0);
    }

    #[test]
    fn test_scale_to_fit_zero_input() {
        assert!(Size::default().scale_to_fit(Size::new(100.0, 100.0)).is_zero());
        assert!(Size::new(100.0, 100.0).scale_to_fit(Size::default()).is_zero());
    }

    #[test]
    fn test_clamp_abs_symmetric() {
        let limit = Vec2::new(50.0, 30.0);
        assert_eq!(Vec2::new(80.0, -80.0).clamp_abs(limit), Vec2::new(50.0, -30.0));
        assert_eq!(Vec2::new(-10.0, 10.0).clamp_abs(limit), Vec2::new(-10.0, 10.0));
    }

    #[test]
    fn test_square_mask_in_landscape_area() {
        // 400x300 area, 1:1 mask: height-limited
        let mask = AspectRatio::Square.fit_within(Size::new(400.0, 300.0));
        assert_eq!(mask, Size::new(300.0, 300.0));
    }

    #[test]
    fn test_wide_mask_in_landscape_area() {
        // 400x300 area, 16:9 mask: width-limited
        let mask = AspectRatio::SixteenNine.fit_within(Size::new(400.0, 300.0));
        assert_eq!(mask.width, 400.0);
        assert!((mask.height - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_portrait_mask_in_landscape_area() {
        let mask = AspectRatio::NineSixteen.fit_within(Size::new(400.0, 300.0));
        assert_eq!(mask.height, 300.0);
        assert!((mask.width - 300.0 * 9.0 / 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_within_zero_area() {
        for ratio in ALL_RATIOS {
            assert!(ratio.fit_within(Size::default()).is_zero());
        }
    }

    #[test]
    fn test_geometry_compute_reference_layout() {
        // The reference layout used throughout the resolver tests
        let geometry = DisplayGeometry::compute(
            Size::new(4000.0, 3000.0),
            AspectRatio::Square,
            Size::new(400.0, 300.0),
        );
        assert_eq!(geometry.image_size_in_view, Size::new(400.0, 300.0));
        assert_eq!(geometry.mask_size, Size::new(300.0, 300.0));
        assert!(geometry.is_ready());
    }

    #[test]
    fn test_min_scale_covers_mask() {
        let geometry = DisplayGeometry {
            image_size_in_view: Size::new(400.0, 300.0),
            mask_size: Size::new(300.0, 300.0),
        };
        assert_eq!(geometry.min_scale(), 1.0);

        // A wider mask than the rendered image forces upscaling
        let geometry = DisplayGeometry {
            image_size_in_view: Size::new(200.0, 300.0),
            mask_size: Size::new(300.0, 300.0),
        };
        assert_eq!(geometry.min_scale(), 1.5);
    }

    #[test]
    fn test_min_scale_unmeasured_layout() {
        let geometry = DisplayGeometry::default();
        assert_eq!(geometry.min_scale(), 0.0);
        assert!(!geometry.is_ready());
    }

    #[test]
    fn test_max_offset_at_min_scale() {
        let geometry = DisplayGeometry {
            image_size_in_view: Size::new(400.0, 300.0),
            mask_size: Size::new(300.0, 300.0),
        };
        // At scale 1 only the x axis has slack: (400/2)*1 - 300/2 = 50
        let limit = geometry.max_offset(1.0);
        assert_eq!(limit, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_max_offset_grows_with_scale() {
        let geometry = DisplayGeometry {
            image_size_in_view: Size::new(400.0, 300.0),
            mask_size: Size::new(300.0, 300.0),
        };
        let limit = geometry.max_offset(2.0);
        assert_eq!(limit, Vec2::new(250.0, 150.0));
    }

    #[test]
    fn test_max_offset_never_negative() {
        // Mask larger than the scaled image in one dimension clamps to 0
        let geometry = DisplayGeometry {
            image_size_in_view: Size::new(200.0, 300.0),
            mask_size: Size::new(300.0, 300.0),
        };
        let limit = geometry.max_offset(1.0);
        assert_eq!(limit.x, 0.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
