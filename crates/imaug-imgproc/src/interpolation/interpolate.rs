use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::border::BorderMode;
use super::nearest::nearest_neighbor_interpolation;
use imaug_image::Image;

/// Coordinates farther than this from the origin are treated as outside of any image.
const MAX_COORD: f32 = 1.0e9;

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Bicubic interpolation
    Bicubic,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - How taps outside of the image are resolved.
/// * `border_value` - The fill value used by [`BorderMode::Constant`].
///
/// # Returns
///
/// The interpolated pixel values. Non-finite coordinates yield `border_value`.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    border: BorderMode,
    border_value: &[f32; C],
) -> [f32; C] {
    if !(u.is_finite() && v.is_finite()) || u.abs() > MAX_COORD || v.abs() > MAX_COORD {
        return *border_value;
    }

    match interpolation {
        InterpolationMode::Nearest => {
            nearest_neighbor_interpolation(image, u, v, border, border_value)
        }
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, border, border_value),
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v, border, border_value),
    }
}
