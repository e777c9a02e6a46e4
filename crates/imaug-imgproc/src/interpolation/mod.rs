//! Pixel interpolation methods for image transformations.
//!
//! This module provides the resampling primitive used by the geometric augmentations: a
//! [`remap`] that gathers source pixels through a pair of coordinate maps.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Bicubic**: Cubic convolution over a 4x4 neighbourhood
//!
//! Taps falling outside the source image are resolved with a [`BorderMode`].

mod bicubic;
mod bilinear;

/// Border handling for out-of-range taps.
mod border;

/// Coordinate map containers and generation utilities.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use border::BorderMode;
pub use grid::CoordinateMap;
pub use interpolate::{interpolate_pixel, InterpolationMode};
pub use remap::remap;
