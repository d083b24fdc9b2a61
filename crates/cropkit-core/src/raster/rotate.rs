//! Free-angle image rotation with bilinear and Lanczos3 resampling.
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel(s) contribute to it and interpolate
//! their values. The output canvas is expanded to the bounding box of the
//! rotated content, so nothing is clipped.
//!
//! Angles are radians, positive = counter-clockwise, matching the session's
//! transform state.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{CropError, SourceImage};

/// Angles closer to an axis-aligned rotation than this are snapped to the
/// exact fast path.
const SNAP_EPSILON: f64 = 1e-5;

/// Resampling filter for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Fast bilinear resampling - good for preview rendering.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 resampling - good for the final output.
    Lanczos3,
}

/// Compute the bounding-box dimensions of an image rotated by `angle` radians.
pub fn rotated_bounds(width: u32, height: u32, angle: f64) -> (u32, u32) {
    let angle = normalize_angle(angle);

    if angle.abs() < SNAP_EPSILON || (TAU - angle).abs() < SNAP_EPSILON {
        return (width, height);
    }
    if (angle - FRAC_PI_2).abs() < SNAP_EPSILON || (angle - 3.0 * FRAC_PI_2).abs() < SNAP_EPSILON {
        return (height, width);
    }
    if (angle - PI).abs() < SNAP_EPSILON {
        return (width, height);
    }

    let cos = angle.cos().abs();
    let sin = angle.sin().abs();
    let w = width as f64;
    let h = height as f64;

    // Bounding box of a rotated rectangle
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image around its center by `angle` radians.
///
/// # Errors
///
/// Returns `CropError::RotationFailed` when the source is empty or the
/// resampled output would be degenerate.
pub fn rotate(
    image: &SourceImage,
    angle: f64,
    filter: ResampleFilter,
) -> Result<SourceImage, CropError> {
    if image.is_empty() {
        return Err(CropError::RotationFailed);
    }
    if !angle.is_finite() {
        return Err(CropError::RotationFailed);
    }
    if normalize_angle(angle).abs() < SNAP_EPSILON {
        return Ok(image.clone());
    }

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = rotated_bounds(image.width, image.height, angle);
    if dst_w == 0 || dst_h == 0 {
        return Err(CropError::RotationFailed);
    }

    // Inverse mapping runs the transform backwards: walking output pixels
    // with the negated angle lands on the source positions that feed them.
    let inverse = -angle;
    let cos = inverse.cos();
    let sin = inverse.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w * dst_h * 3) as usize];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 - dst_cx;
            let dy = dst_y as f64 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let dst_idx = ((dst_y * dst_w + dst_x) * 3) as usize;

            let pixel = match filter {
                ResampleFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                ResampleFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };

            output[dst_idx] = pixel[0];
            output[dst_idx + 1] = pixel[1];
            output[dst_idx + 2] = pixel[2];
        }
    }

    Ok(SourceImage {
        width: dst_w,
        height: dst_h,
        pixels: output,
    })
}

/// Map an angle into [0, 2π).
fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped < 0.0 {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[inline]
fn get_pixel_f64(image: &SourceImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation over the 4 nearest pixels.
fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    // Out-of-bounds samples fill with black
    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample a pixel using Lanczos3 over a 6x6 neighborhood.
///
/// Falls back to bilinear near the image edges where the kernel would run
/// out of support.
fn sample_lanczos3(image: &SourceImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            if px >= 0 && px < w && py >= 0 && py < h {
                let dx = x - px as f64;
                let dy = y - py as f64;
                let weight = lanczos_weight(dx, 3.0) * lanczos_weight(dy, 3.0);

                let pixel = get_pixel_f64(image, px as usize, py as usize);
                sum[0] += pixel[0] * weight;
                sum[1] += pixel[1] * weight;
                sum[2] += pixel[2] * weight;
                weight_sum += weight;
            }
        }
    }

    let mut result = [0u8; 3];
    if weight_sum > 0.0 {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel: L(x) = sinc(x) * sinc(x/a) for |x| < a, else 0.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
