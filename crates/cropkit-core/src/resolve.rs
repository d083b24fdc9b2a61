//! Mapping a finalized transform into source-pixel coordinates.
//!
//! The resolver is pure geometry: given the committed transform, the mask and
//! rendered-image sizes in display space, and the source's pixel size, it
//! produces the exact rectangle to extract. There is no per-ratio branching;
//! the mask size already encodes the aspect ratio.

use serde::{Deserialize, Serialize};

use crate::geometry::{Size, Vec2};

/// A crop region in source-pixel coordinates.
///
/// Edges stay fractional here; rounding to whole pixels is the extraction
/// step's concern.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Resolve the source-pixel rectangle a committed transform selects.
///
/// `original` is the pixel size of the (orientation-normalized, possibly
/// pre-rotated) source. `view` and `mask` are the rendered-image and mask
/// sizes in display space, `scale` and `offset` the committed transform.
///
/// The mapping: `factor` converts display measurements into source pixels
/// (uniform scale-to-fit is assumed, so one factor covers both axes); the
/// mask inflated by `factor / scale` is the selected region, and the pan
/// offset moves the region the opposite way from the image, anchored at the
/// image center.
pub fn resolve_crop_rect(original: Size, view: Size, mask: Size, scale: f64, offset: Vec2) -> CropRect {
    debug_assert!(!view.is_zero(), "resolving against an unmeasured layout");
    debug_assert!(scale > 0.0, "scale must be positive");

    let factor = (original.width / view.width).min(original.height / view.height);

    let width = mask.width * factor / scale;
    let height = mask.height * factor / scale;

    let pixel_offset = Vec2::new(offset.x * factor / scale, offset.y * factor / scale);

    let x = original.width / 2.0 - width / 2.0 - pixel_offset.x;
    let y = original.height / 2.0 - height / 2.0 - pixel_offset.y;

    CropRect {
        x,
        y,
        width,
        height,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{AspectRatio, DisplayGeometry};
    use proptest::prelude::*;

    fn ratio_strategy() -> impl Strategy<Value = AspectRatio> {
        prop_oneof![
            Just(AspectRatio::Square),
            Just(AspectRatio::FourThree),
            Just(AspectRatio::ThreeFour),
            Just(AspectRatio::SixteenNine),
            Just(AspectRatio::NineSixteen),
        ]
    }

    proptest! {
        /// Property: at min_scale with no offset the resolved rect stays
        /// inside the source (up to float noise) and keeps the mask ratio.
        #[test]
        fn prop_min_scale_rect_in_bounds(
            ratio in ratio_strategy(),
            (ow, oh) in (500.0f64..=6000.0, 500.0f64..=6000.0),
            (aw, ah) in (100.0f64..=800.0, 100.0f64..=800.0),
        ) {
            let original = Size::new(ow, oh);
            let available = Size::new(aw, ah);
            let geometry = DisplayGeometry::compute(original, ratio, available);
            prop_assume!(geometry.is_ready());

            let rect = resolve_crop_rect(
                original,
                geometry.image_size_in_view,
                geometry.mask_size,
                geometry.min_scale(),
                Vec2::default(),
            );

            prop_assert!(rect.x >= -1e-6);
            prop_assert!(rect.y >= -1e-6);
            prop_assert!(rect.x + rect.width <= ow + 1e-6);
            prop_assert!(rect.y + rect.height <= oh + 1e-6);
            prop_assert!((rect.width / rect.height - ratio.value()).abs() < 1e-9);
        }

        /// Property: any offset within max_offset keeps the rect inside the
        /// source for any scale in range.
        #[test]
        fn prop_clamped_offset_rect_in_bounds(
            ratio in ratio_strategy(),
            (ow, oh) in (500.0f64..=6000.0, 500.0f64..=6000.0),
            (aw, ah) in (100.0f64..=800.0, 100.0f64..=800.0),
            scale_t in 0.0f64..=1.0,
            off_x in -1.0f64..=1.0,
            off_y in -1.0f64..=1.0,
        ) {
            let original = Size::new(ow, oh);
            let geometry = DisplayGeometry::compute(original, ratio, Size::new(aw, ah));
            prop_assume!(geometry.is_ready());

            let min = geometry.min_scale();
            let scale = min + scale_t * (5.0 - min).max(0.0);
            let limit = geometry.max_offset(scale);
            let offset = Vec2::new(off_x * limit.x, off_y * limit.y);

            let rect = resolve_crop_rect(
                original,
                geometry.image_size_in_view,
                geometry.mask_size,
                scale,
                offset,
            );

            // The uniform-fit factor never exceeds either per-axis ratio, so
            // the display-space clamp guarantees pixel-space containment.
            prop_assert!(rect.x >= -1e-6, "x = {}", rect.x);
            prop_assert!(rect.y >= -1e-6, "y = {}", rect.y);
            prop_assert!(rect.x + rect.width <= ow + 1e-6);
            prop_assert!(rect.y + rect.height <= oh + 1e-6);
        }
    }
}
