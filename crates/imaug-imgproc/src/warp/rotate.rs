use std::borrow::Cow;

use imaug_image::{Image, ImageError, ImageSize};

use super::extrinsic::compose_extrinsic;
use super::inverse_map::build_inverse_map;
use super::matrix::{matmul, Matrix3, Matrix3x4, Matrix4};
use super::projection::{circumscribe_rect, BoundsMode};
use crate::crop::crop_image;
use crate::interpolation::{remap, BorderMode, InterpolationMode};
use crate::rect::{expand_rect_for_rotate, truncate_rect_keep_center, Rect};

/// Default distance between the virtual camera and the image plane.
pub const DEFAULT_DEPTH: f64 = 1000.0;

/// The rotation of the virtual camera, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationAngles {
    /// In-plane rotation.
    pub yaw: f64,
    /// Tilt about the image y-axis.
    pub pitch: f64,
    /// Tilt about the image x-axis.
    pub roll: f64,
}

impl RotationAngles {
    /// Create a new angle triple.
    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }
}

/// Parameters of [`rotate`].
#[derive(Debug, Clone, PartialEq)]
pub struct RotateConfig<const C: usize> {
    /// Distance between the virtual camera and the image plane. Must be finite and positive.
    pub depth: f64,
    /// Interpolation used when gathering source pixels.
    pub interpolation: InterpolationMode,
    /// How destination pixels without source coverage are filled.
    pub border_mode: BorderMode,
    /// Fill value for [`BorderMode::Constant`].
    pub border_value: [f32; C],
    /// How the output extent is derived from the projected corners.
    pub bounds: BoundsMode,
    /// Region to rotate. `None`, or a rectangle with a non-positive extent, selects the whole image.
    pub roi: Option<Rect>,
    /// Crop the rotated image back to the size of the region around its center.
    pub crop_to_roi: bool,
}

impl<const C: usize> Default for RotateConfig<C> {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            interpolation: InterpolationMode::Bilinear,
            border_mode: BorderMode::Constant,
            border_value: [0.0; C],
            bounds: BoundsMode::Corners,
            roi: None,
            crop_to_roi: false,
        }
    }
}

/// The homogeneous camera pose for the given angles, looking at the image plane from `depth`.
pub fn rotation_matrix(angles: &RotationAngles, depth: f64) -> Matrix4 {
    compose_extrinsic(angles.yaw, angles.pitch, angles.roll, 0.0, 0.0, depth).to_homogeneous()
}

/// The projective transform taking source pixels to the rotated view.
///
/// Pixels are lifted onto the z = 0 plane centered on the image, moved by the camera pose and
/// projected back with a focal length equal to `depth`:
///
/// `T = P · R · A` with `A` the 4x3 lift, `R` the 4x4 pose and `P` the 3x4 projection.
///
/// # Example
///
/// ```
/// use imaug_image::ImageSize;
/// use imaug_imgproc::warp::{perspective_transform, RotationAngles};
///
/// let size = ImageSize { width: 4, height: 2 };
/// let t = perspective_transform(size, &RotationAngles::default(), 10.0);
/// assert_eq!(t, [[10.0, 0.0, -20.0], [0.0, 10.0, -10.0], [0.0, 0.0, 10.0]]);
/// ```
pub fn perspective_transform(size: ImageSize, angles: &RotationAngles, depth: f64) -> Matrix3 {
    let (half_w, half_h) = (size.width as f64 / 2.0, size.height as f64 / 2.0);

    #[rustfmt::skip]
    let lift: [[f64; 3]; 4] = [
        [1.0, 0.0, -half_w],
        [0.0, 1.0, -half_h],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
    ];

    #[rustfmt::skip]
    let projection: Matrix3x4 = [
        [depth, 0.0, 0.0, 0.0],
        [0.0, depth, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ];

    let rotation = rotation_matrix(angles, depth);
    matmul(&matmul(&projection, &rotation), &lift)
}

/// Synthesize the view of an image seen by a rotated camera.
///
/// The image is treated as a flat plane at distance `config.depth` from a pinhole camera. The
/// camera is rotated by `angles` about the image center and the plane is re-rendered. The output
/// is sized to the rectangle circumscribing the projected image, so it is generally larger than
/// the input; pixels with no source coverage are filled according to `config.border_mode`.
///
/// When `config.roi` selects a region, it is first expanded to a square that contains any
/// rotation of it, clipped to the image and cropped. With `config.crop_to_roi` the result is cut
/// back to the size of the requested region around its center.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `angles` - Yaw, pitch and roll in degrees. Any real values are accepted.
/// * `config` - Depth, resampling and region parameters.
///
/// # Returns
///
/// The rotated image.
///
/// # Errors
///
/// * [`ImageError::InvalidInput`] for an empty image, a non-positive depth, a region outside of
///   the image or an empty output extent.
/// * [`ImageError::DegenerateTransform`] when the rotated plane is (nearly) edge-on or behind
///   the camera, or when the output would exceed [`MAX_AREA_RATIO`](super::MAX_AREA_RATIO)
///   times the area of the rotated region.
///
/// # Example
///
/// ```
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::warp::{rotate, RotateConfig, RotationAngles};
///
/// let image = Image::<f32, 3>::from_size_val(ImageSize { width: 100, height: 100 }, 1.0).unwrap();
///
/// let rotated = rotate(&image, &RotationAngles::new(45.0, 0.0, 0.0), &RotateConfig::default()).unwrap();
///
/// assert_eq!(rotated.size(), ImageSize { width: 141, height: 141 });
/// ```
pub fn rotate<const C: usize>(
    src: &Image<f32, C>,
    angles: &RotationAngles,
    config: &RotateConfig<C>,
) -> Result<Image<f32, C>, ImageError> {
    if src.size().is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "cannot rotate an empty image ({})",
            src.size()
        )));
    }

    if !(config.depth.is_finite() && config.depth > 0.0) {
        return Err(ImageError::InvalidInput(format!(
            "depth must be finite and positive, got {}",
            config.depth
        )));
    }

    let region = match config.roi {
        Some(roi) if !roi.is_empty() => Some((roi, capture_region(&roi, src.size())?)),
        _ => None,
    };

    let source = match region {
        Some((_, capture)) => Cow::Owned(crop_image(src, &capture)?),
        None => Cow::Borrowed(src),
    };

    let size = source.size();
    let transform = perspective_transform(size, angles, config.depth);
    log::trace!("projective transform for {size}: {transform:?}");

    let dst_rect = circumscribe_rect(size, &transform, config.bounds)?;
    log::debug!("rotating {size} by {angles:?}: destination rect {dst_rect:?}");

    let rotation = rotation_matrix(angles, config.depth);
    let (map_x, map_y) = build_inverse_map(size, &dst_rect, &rotation)?;

    let rotated = remap(
        &source,
        &map_x,
        &map_y,
        config.interpolation,
        config.border_mode,
        config.border_value,
    )?;

    if !config.crop_to_roi {
        return Ok(rotated);
    }

    let target = region.map_or_else(|| Rect::from_size(src.size()), |(roi, _)| roi);
    let centered = Rect::new(
        (rotated.width() as i32 - target.width) / 2,
        (rotated.height() as i32 - target.height) / 2,
        target.width,
        target.height,
    );
    let crop = truncate_rect_keep_center(&centered, rotated.size());
    log::debug!("cropping rotated {} to {crop:?}", rotated.size());

    crop_image(&rotated, &crop)
}

/// The part of the image captured for rotating `roi`.
fn capture_region(roi: &Rect, size: ImageSize) -> Result<Rect, ImageError> {
    let expanded = expand_rect_for_rotate(roi);
    let capture = truncate_rect_keep_center(&expanded, size);

    if capture.is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "region {roi:?} does not intersect the image ({size})"
        )));
    }

    if capture != expanded {
        log::warn!("rotation region {expanded:?} clipped to {capture:?} by the image bounds");
    }

    Ok(capture)
}
