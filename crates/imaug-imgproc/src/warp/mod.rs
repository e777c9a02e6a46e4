//! Perspective rotation of flat images.
//!
//! The image is modelled as a plane seen by a pinhole camera at a fixed depth. Rotating the
//! camera by yaw, pitch and roll and re-projecting gives the appearance of a 3D pose change
//! without any scene geometry:
//!
//! 1. [`compose_extrinsic`] builds the camera pose from the angles.
//! 2. [`perspective_transform`] chains lift, pose and projection into a 3x3 transform.
//! 3. [`circumscribe_rect`] bounds the projected image.
//! 4. [`build_inverse_map`] resolves every output pixel back to a source coordinate.
//! 5. [`remap`](crate::interpolation::remap) gathers the pixels.
//!
//! [`rotate`] runs the whole pipeline.

mod extrinsic;
mod inverse_map;
mod matrix;
mod projection;
mod rotate;

pub use extrinsic::{compose_extrinsic, ExtrinsicMatrix};
pub use inverse_map::{build_inverse_map, MAX_AREA_RATIO};
pub use matrix::{identity, invert, matmul, matvec, Matrix3, Matrix3x4, Matrix4};
pub use projection::{circumscribe_rect, project_corners, rect_corners, BoundsMode};
pub use rotate::{
    perspective_transform, rotate, rotation_matrix, RotateConfig, RotationAngles, DEFAULT_DEPTH,
};
