use imaug_image::{ImageError, ImageSize};

use super::matrix::{invert, Matrix4};
use crate::interpolation::grid::{meshgrid_from_fn, CoordinateMap};
use crate::rect::RectF;

/// Perspective divisors below this (relative to the depth) are rejected.
const MIN_DIVISOR: f64 = 1e-9;

/// Largest destination area accepted, as a multiple of the source area.
///
/// In-plane turns grow the area by at most a factor of two. Larger ratios only come from planes
/// seen close to edge-on, where the magnification diverges.
pub const MAX_AREA_RATIO: f64 = 64.0;

/// Build the coordinate maps that pull a rotated view back onto the source image.
///
/// Every destination pixel `(dx, dy)` of `dst_rect` is lifted to the 3D point
/// `(dst_rect.x + dx, dst_rect.y + dy, z)`, where `z` is the depth stored in `rotation[2][3]`.
/// The ray through that point is intersected with the source plane using the inverse of
/// `rotation` and the result is shifted by half the source size, since the rotation pivots about
/// the image center.
///
/// # Arguments
///
/// * `src_size` - The size of the source image.
/// * `dst_rect` - The destination rectangle; its extent is rounded to whole pixels.
/// * `rotation` - The homogeneous 4x4 rotation with the depth in its translation column.
///
/// # Returns
///
/// The x and y coordinate maps, both with the extent of `dst_rect`. Values may lie outside of the
/// source image. The computation is deterministic: equal inputs give bit-identical maps.
///
/// # Errors
///
/// * [`ImageError::InvalidInput`] if the source size or the destination extent is empty.
/// * [`ImageError::DegenerateTransform`] if `rotation` is singular, a destination ray is
///   (nearly) parallel to the source plane, or the destination area exceeds
///   [`MAX_AREA_RATIO`] times the source area. The area is checked before any allocation.
///
/// # Example
///
/// ```
/// use imaug_image::ImageSize;
/// use imaug_imgproc::rect::RectF;
/// use imaug_imgproc::warp::{build_inverse_map, compose_extrinsic};
///
/// let rotation = compose_extrinsic(0.0, 0.0, 0.0, 0.0, 0.0, 1000.0).to_homogeneous();
/// let src_size = ImageSize { width: 4, height: 2 };
/// let dst_rect = RectF::new(-2.0, -1.0, 4.0, 2.0);
///
/// let (map_x, map_y) = build_inverse_map(src_size, &dst_rect, &rotation).unwrap();
/// assert_eq!(map_x.as_slice(), &[0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(map_y.as_slice(), &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
/// ```
pub fn build_inverse_map(
    src_size: ImageSize,
    dst_rect: &RectF,
    rotation: &Matrix4,
) -> Result<(CoordinateMap, CoordinateMap), ImageError> {
    if src_size.is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "source size must be positive, got {src_size}"
        )));
    }

    let dst_size = dst_rect.pixel_size().ok_or_else(|| {
        ImageError::InvalidInput(format!(
            "destination rectangle has no pixels: {dst_rect:?}"
        ))
    })?;

    let dst_area = dst_size.width as f64 * dst_size.height as f64;
    let max_area = src_size.area() as f64 * MAX_AREA_RATIO;
    if dst_area > max_area {
        return Err(ImageError::DegenerateTransform(format!(
            "destination {}x{} exceeds {MAX_AREA_RATIO} times the source area ({src_size})",
            dst_size.width, dst_size.height
        )));
    }

    let z = rotation[2][3];
    let inv = invert(rotation)?;
    let min_divisor = MIN_DIVISOR * z.abs().max(1.0);

    let half_w = src_size.width as f64 / 2.0;
    let half_h = src_size.height as f64 / 2.0;

    meshgrid_from_fn(dst_size.width, dst_size.height, |dx, dy| {
        let p = [dst_rect.x + dx as f64, dst_rect.y + dy as f64, z];

        let divisor = inv[2][0] * p[0] + inv[2][1] * p[1] + inv[2][2] * p[2];
        if divisor.is_nan() || divisor.abs() < min_divisor {
            return Err(ImageError::DegenerateTransform(format!(
                "ray through ({}, {}) is parallel to the source plane (divisor {divisor:e})",
                p[0], p[1]
            )));
        }

        // perspective divide: where the ray hits the z = 0 source plane
        let scale = -inv[2][3] / divisor;

        let x = (inv[0][0] * p[0] + inv[0][1] * p[1] + inv[0][2] * p[2]) * scale + inv[0][3];
        let y = (inv[1][0] * p[0] + inv[1][1] * p[1] + inv[1][2] * p[2]) * scale + inv[1][3];

        Ok(((x + half_w) as f32, (y + half_h) as f32))
    })
}
