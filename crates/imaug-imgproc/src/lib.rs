#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// random augmentation wrappers and photometric perturbations.
pub mod augment;

/// image cropping module.
pub mod crop;

/// image sinusoidal deformation module.
pub mod deform;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// rectangle geometry used to pick the region to rotate.
pub mod rect;

/// toroidal image translation module.
pub mod slide;

/// image geometric transformations module.
pub mod warp;
