//! Random augmentations.
//!
//! Every augmentation draws its randomness from a caller supplied generator, so a seeded
//! [`rand::rngs::StdRng`] reproduces the same sequence of images. The [`Augmentation`] trait lets
//! heterogeneous augmentations be stored side by side:
//!
//! ```
//! use imaug_image::Image;
//! use imaug_imgproc::augment::{Augmentation, RandomHorizontalFlip, RandomNoise};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let augmentations: Vec<Box<dyn Augmentation<3>>> = vec![
//!     Box::new(RandomHorizontalFlip::default()),
//!     Box::new(RandomNoise::new([0.0; 3], [4.0; 3])),
//! ];
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let image = Image::<f32, 3>::from_size_val([8, 8].into(), 128.0).unwrap();
//!
//! for augmentation in &augmentations {
//!     let out = augmentation.apply(&image, &mut rng).unwrap();
//!     assert_eq!(out.size(), image.size());
//! }
//! ```

mod noise;
mod random;
mod rotation;

pub use noise::{add_noise, RandomNoise, U8_VALUE_RANGE};
pub use random::{Blur, RandomDeform, RandomHorizontalFlip, RandomSlide, RandomVerticalFlip};
pub use rotation::{RandomRotation, DEFAULT_MAX_ANGLE};

use imaug_image::{Image, ImageError};
use rand::RngCore;

/// An image transform that may draw random numbers.
pub trait Augmentation<const C: usize>: Send + Sync {
    /// Apply the augmentation to `src`, drawing any randomness from `rng`.
    fn apply(
        &self,
        src: &Image<f32, C>,
        rng: &mut dyn RngCore,
    ) -> Result<Image<f32, C>, ImageError>;
}
