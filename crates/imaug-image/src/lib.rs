#![deny(missing_docs)]
//! Image types and traits shared by the augmentation crates.

/// image representation for augmentation purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
