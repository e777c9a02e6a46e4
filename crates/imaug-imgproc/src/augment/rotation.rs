use imaug_image::{Image, ImageError};
use rand::RngCore;
use rand_distr::{Distribution, Normal};

use super::Augmentation;
use crate::warp::{rotate, RotateConfig, RotationAngles};

/// Default bound on the magnitude of every sampled angle, in degrees.
pub const DEFAULT_MAX_ANGLE: f64 = 60.0;

/// Perspective rotation with randomly drawn angles.
///
/// Each angle is drawn from a zero-mean normal distribution with its own standard deviation and
/// clamped to `[-max_angle, max_angle]`. The rotation itself is configured by `config`.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomRotation<const C: usize> {
    /// Standard deviation of the yaw, in degrees.
    pub yaw_sigma: f64,
    /// Standard deviation of the pitch, in degrees.
    pub pitch_sigma: f64,
    /// Standard deviation of the roll, in degrees.
    pub roll_sigma: f64,
    /// Bound on the magnitude of every angle, in degrees.
    pub max_angle: f64,
    /// Parameters of the rotation.
    pub config: RotateConfig<C>,
}

impl<const C: usize> Default for RandomRotation<C> {
    fn default() -> Self {
        Self {
            yaw_sigma: 15.0,
            pitch_sigma: 15.0,
            roll_sigma: 15.0,
            max_angle: DEFAULT_MAX_ANGLE,
            config: RotateConfig::default(),
        }
    }
}

impl<const C: usize> RandomRotation<C> {
    /// Create a random rotation with the given standard deviations and default parameters.
    pub fn new(yaw_sigma: f64, pitch_sigma: f64, roll_sigma: f64) -> Self {
        Self {
            yaw_sigma,
            pitch_sigma,
            roll_sigma,
            ..Default::default()
        }
    }

    /// Draw an angle triple.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidInput`] for a negative or non-finite standard deviation, or a
    /// negative `max_angle`.
    pub fn sample_angles(&self, rng: &mut dyn RngCore) -> Result<RotationAngles, ImageError> {
        if !(self.max_angle >= 0.0) {
            return Err(ImageError::InvalidInput(format!(
                "max angle must not be negative, got {}",
                self.max_angle
            )));
        }

        let mut draw = |sigma: f64| -> Result<f64, ImageError> {
            let normal = Normal::new(0.0, sigma).map_err(|e| {
                ImageError::InvalidInput(format!("invalid angle deviation {sigma}: {e}"))
            })?;
            Ok(normal
                .sample(&mut *rng)
                .clamp(-self.max_angle, self.max_angle))
        };

        let yaw = draw(self.yaw_sigma)?;
        let pitch = draw(self.pitch_sigma)?;
        let roll = draw(self.roll_sigma)?;

        Ok(RotationAngles::new(yaw, pitch, roll))
    }
}

impl<const C: usize> Augmentation<C> for RandomRotation<C> {
    fn apply(
        &self,
        src: &Image<f32, C>,
        rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError> {
        let angles = self.sample_angles(rng)?;
        log::debug!("sampled rotation {angles:?}");
        rotate(src, &angles, &self.config)
    }
}
