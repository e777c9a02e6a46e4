use imaug_image::{Image, ImageDtype, ImageError};
use rand::RngCore;
use rand_distr::{Distribution, Normal};

use super::Augmentation;

/// Value range of 8-bit samples, the default clamp of [`RandomNoise`].
pub const U8_VALUE_RANGE: (f32, f32) = (0.0, 255.0);

/// Add gaussian noise to every sample, independently per channel.
///
/// Channel `c` receives noise drawn from `N(mean[c], std_dev[c])`. The result is clamped to
/// `range` before converting back to `T`; pass `(0.0, 1.0)` for normalized images.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `mean` - Mean of the noise per channel.
/// * `std_dev` - Standard deviation of the noise per channel.
/// * `range` - Inclusive `(min, max)` bounds of the output samples.
/// * `rng` - The random source.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] for a non-finite mean, a negative or non-finite standard
/// deviation, or a range that is not finite or has `min > max`.
pub fn add_noise<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    mean: &[f32; C],
    std_dev: &[f32; C],
    range: (f32, f32),
    rng: &mut dyn RngCore,
) -> Result<Image<T, C>, ImageError> {
    let (min, max) = range;
    if !(min.is_finite() && max.is_finite()) || min > max {
        return Err(ImageError::InvalidInput(format!(
            "noise range must be finite with min <= max, got ({min}, {max})"
        )));
    }

    let mut distributions = Vec::with_capacity(C);
    for (&m, &s) in mean.iter().zip(std_dev) {
        if !m.is_finite() {
            return Err(ImageError::InvalidInput(format!(
                "noise mean must be finite, got {m}"
            )));
        }
        let normal = Normal::new(m, s).map_err(|e| {
            ImageError::InvalidInput(format!("invalid noise parameters ({m}, {s}): {e}"))
        })?;
        distributions.push(normal);
    }

    let mut dst = src.clone();

    // sequential so that a seeded generator gives reproducible output
    for pixel in dst.as_slice_mut().chunks_exact_mut(C) {
        for (value, normal) in pixel.iter_mut().zip(&distributions) {
            let noisy = (*value).into() + normal.sample(&mut *rng);
            *value = T::from_f32(noisy.clamp(min, max));
        }
    }

    Ok(dst)
}

/// Additive gaussian noise with per-channel mean and standard deviation.
///
/// Samples are clamped to `range`, which defaults to the 8-bit range [`U8_VALUE_RANGE`].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomNoise<const C: usize> {
    /// Mean of the noise per channel.
    pub mean: [f32; C],
    /// Standard deviation of the noise per channel.
    pub std_dev: [f32; C],
    /// Inclusive `(min, max)` bounds of the output samples.
    pub range: (f32, f32),
}

impl<const C: usize> RandomNoise<C> {
    /// Create a new noise augmentation for 8-bit valued images.
    pub fn new(mean: [f32; C], std_dev: [f32; C]) -> Self {
        Self {
            mean,
            std_dev,
            range: U8_VALUE_RANGE,
        }
    }

    /// Clamp the output to `(min, max)` instead, e.g. `(0.0, 1.0)` for normalized images.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.range = (min, max);
        self
    }
}

impl<const C: usize> Augmentation<C> for RandomNoise<C> {
    fn apply(
        &self,
        src: &Image<f32, C>,
        rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError> {
        add_noise(src, &self.mean, &self.std_dev, self.range, rng)
    }
}
