use imaug_image::{ImageError, ImageSize};

use super::matrix::{matvec, Matrix3};
use crate::rect::{Rect, RectF};

/// Homogeneous coordinates below this (relative to the transform scale) are rejected.
const MIN_HOMOGENEOUS: f64 = 1e-9;

/// How the destination rectangle is derived from the four projected corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsMode {
    /// Minimum and maximum over all four projected corners.
    #[default]
    Corners,
    /// Left bound from the left corners, right bound from the right corners, top bound from the
    /// top corners and bottom bound from the bottom corners.
    ///
    /// Kept for compatibility with outputs produced by earlier versions. It under-bounds the
    /// projected region for rotations that swap the corner order (e.g. an in-plane turn past 90°).
    CornerPairs,
}

/// The corners of a rectangle as homogeneous points, ordered top-left, top-right, bottom-right,
/// bottom-left.
pub fn rect_corners(rect: &Rect) -> [[f64; 3]; 4] {
    let (x0, y0) = (rect.x as f64, rect.y as f64);
    let (x1, y1) = (rect.right() as f64, rect.bottom() as f64);
    [
        [x0, y0, 1.0],
        [x1, y0, 1.0],
        [x1, y1, 1.0],
        [x0, y1, 1.0],
    ]
}

/// Project the corners of `rect` through a 3x3 projective transform.
///
/// # Returns
///
/// The perspective divided corners in the order of [`rect_corners`].
///
/// # Errors
///
/// Returns [`ImageError::DegenerateTransform`] if a corner projects onto or behind the viewpoint
/// (non-positive homogeneous coordinate) or to a non-finite position.
pub fn project_corners(rect: &Rect, transform: &Matrix3) -> Result<[[f64; 2]; 4], ImageError> {
    let scale = transform[2]
        .iter()
        .fold(0.0f64, |acc, v| acc.max(v.abs()))
        .max(1.0);

    let mut projected = [[0.0; 2]; 4];
    for (dst, corner) in projected.iter_mut().zip(rect_corners(rect).iter()) {
        let [u, v, w] = matvec(transform, corner);
        if w.is_nan() || w <= MIN_HOMOGENEOUS * scale {
            return Err(ImageError::DegenerateTransform(format!(
                "corner ({}, {}) projects to homogeneous coordinate {w:e}",
                corner[0], corner[1]
            )));
        }
        let (x, y) = (u / w, v / w);
        if !(x.is_finite() && y.is_finite()) {
            return Err(ImageError::DegenerateTransform(format!(
                "corner ({}, {}) projects to a non-finite position",
                corner[0], corner[1]
            )));
        }
        *dst = [x, y];
    }

    Ok(projected)
}

/// Compute the axis-aligned rectangle circumscribing an image under a projective transform.
///
/// # Arguments
///
/// * `size` - The size of the source image.
/// * `transform` - The 3x3 projective transform from source pixels to destination space.
/// * `mode` - How the bounds are derived from the projected corners.
///
/// # Returns
///
/// The real-valued bounding rectangle in destination space. It may have a non-positive extent
/// with [`BoundsMode::CornerPairs`].
pub fn circumscribe_rect(
    size: ImageSize,
    transform: &Matrix3,
    mode: BoundsMode,
) -> Result<RectF, ImageError> {
    let [c0, c1, c2, c3] = project_corners(&Rect::from_size(size), transform)?;

    let (min_x, max_x, min_y, max_y) = match mode {
        BoundsMode::Corners => {
            let corners = [c0, c1, c2, c3];
            let xs = corners.map(|c| c[0]);
            let ys = corners.map(|c| c[1]);
            (
                xs.iter().copied().fold(f64::INFINITY, f64::min),
                xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                ys.iter().copied().fold(f64::INFINITY, f64::min),
                ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        }
        BoundsMode::CornerPairs => (
            c0[0].min(c3[0]),
            c1[0].max(c2[0]),
            c0[1].min(c1[1]),
            c2[1].max(c3[1]),
        ),
    };

    Ok(RectF::new(min_x, min_y, max_x - min_x, max_y - min_y))
}
