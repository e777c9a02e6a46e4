use imaug_image::{Image, ImageError};
use rand::{Rng, RngCore};

use super::Augmentation;
use crate::deform::{deform, DeformParams};
use crate::filter::{filter2d, kernels};
use crate::flip::{horizontal_flip, vertical_flip};
use crate::slide::slide;

/// Mirror the image left to right with probability `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomHorizontalFlip {
    /// Probability of flipping.
    pub p: f64,
}

impl Default for RandomHorizontalFlip {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl<const C: usize> Augmentation<C> for RandomHorizontalFlip {
    fn apply(
        &self,
        src: &Image<f32, C>,
        rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError> {
        if self.p > rng.random::<f64>() {
            horizontal_flip(src)
        } else {
            Ok(src.clone())
        }
    }
}

/// Mirror the image top to bottom with probability `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomVerticalFlip {
    /// Probability of flipping.
    pub p: f64,
}

impl Default for RandomVerticalFlip {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl<const C: usize> Augmentation<C> for RandomVerticalFlip {
    fn apply(
        &self,
        src: &Image<f32, C>,
        rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError> {
        if self.p > rng.random::<f64>() {
            vertical_flip(src)
        } else {
            Ok(src.clone())
        }
    }
}

/// Slide the image with wrap-around with probability `p`.
///
/// The shift is drawn uniformly from `[-W, W) x [-H, H)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomSlide {
    /// Probability of sliding.
    pub p: f64,
}

impl Default for RandomSlide {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl<const C: usize> Augmentation<C> for RandomSlide {
    fn apply(
        &self,
        src: &Image<f32, C>,
        rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError> {
        if self.p <= rng.random::<f64>() || src.size().is_empty() {
            return Ok(src.clone());
        }

        let (cols, rows) = (src.cols() as i64, src.rows() as i64);
        let x_shift = rng.random_range(-cols..cols);
        let y_shift = rng.random_range(-rows..rows);
        log::trace!("sliding by ({x_shift}, {y_shift})");

        slide(src, x_shift, y_shift)
    }
}

/// Sinusoidal deformation with randomly drawn waves.
///
/// Each field is a `(low, high)` range expressed as a fraction of the image extent. The horizontal
/// wave scales with the number of rows and the vertical wave with the number of columns. Drawn
/// values are truncated to whole pixels and periods are raised to at least one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomDeform {
    /// Range of the horizontal amplitude, relative to the height.
    pub x_amp: (f64, f64),
    /// Range of the vertical amplitude, relative to the width.
    pub y_amp: (f64, f64),
    /// Range of the horizontal period, relative to the height.
    pub x_freq: (f64, f64),
    /// Range of the vertical period, relative to the width.
    pub y_freq: (f64, f64),
}

impl Default for RandomDeform {
    fn default() -> Self {
        Self {
            x_amp: (0.01, 0.05),
            y_amp: (0.01, 0.05),
            x_freq: (0.2, 0.4),
            y_freq: (0.2, 0.4),
        }
    }
}

impl RandomDeform {
    /// Draw concrete deformation parameters for an image of `cols` x `rows` pixels.
    pub fn sample_params(
        &self,
        cols: usize,
        rows: usize,
        rng: &mut dyn RngCore,
    ) -> Result<DeformParams, ImageError> {
        let (cols, rows) = (cols as f64, rows as f64);

        let x_amp = uniform(rng, self.x_amp.0 * rows, self.x_amp.1 * rows)?.trunc();
        let x_freq = uniform(rng, self.x_freq.0 * rows, self.x_freq.1 * rows)?.trunc();
        let y_amp = uniform(rng, self.y_amp.0 * cols, self.y_amp.1 * cols)?.trunc();
        let y_freq = uniform(rng, self.y_freq.0 * cols, self.y_freq.1 * cols)?.trunc();

        Ok(DeformParams {
            x_amp,
            y_amp,
            x_freq: x_freq.max(1.0),
            y_freq: y_freq.max(1.0),
        })
    }
}

impl<const C: usize> Augmentation<C> for RandomDeform {
    fn apply(
        &self,
        src: &Image<f32, C>,
        rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError> {
        let params = self.sample_params(src.cols(), src.rows(), rng)?;
        log::debug!("deforming {} with {params:?}", src.size());
        deform(src, &params)
    }
}

/// Draw from `[low, high)`, or return `low` for an empty range.
fn uniform(rng: &mut dyn RngCore, low: f64, high: f64) -> Result<f64, ImageError> {
    if !(low.is_finite() && high.is_finite()) || low > high {
        return Err(ImageError::InvalidInput(format!(
            "invalid sampling range [{low}, {high})"
        )));
    }
    if low == high {
        return Ok(low);
    }
    Ok(rng.random_range(low..high))
}

/// A fixed 2D filter, see [`filter2d`].
#[derive(Debug, Clone, PartialEq)]
pub struct Blur {
    /// The kernel, applied to every channel.
    pub kernel: Image<f32, 1>,
    /// The kernel cell aligned with the output pixel, the kernel center when `None`.
    pub anchor: Option<(usize, usize)>,
    /// Value added to every output sample.
    pub delta: f32,
}

impl Blur {
    /// A normalized box filter of the given (width, height).
    pub fn box_filter(kernel_size: (usize, usize)) -> Result<Self, ImageError> {
        Ok(Self {
            kernel: kernels::box_kernel_2d(kernel_size)?,
            anchor: None,
            delta: 0.0,
        })
    }

    /// A normalized gaussian filter of the given (width, height) and (sigma_x, sigma_y).
    pub fn gaussian(kernel_size: (usize, usize), sigma: (f32, f32)) -> Result<Self, ImageError> {
        Ok(Self {
            kernel: kernels::gaussian_kernel_2d(kernel_size, sigma)?,
            anchor: None,
            delta: 0.0,
        })
    }
}

impl<const C: usize> Augmentation<C> for Blur {
    fn apply(
        &self,
        src: &Image<f32, C>,
        _rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError> {
        filter2d(src, &self.kernel, self.anchor, self.delta)
    }
}
