use super::matrix::{Matrix3, Matrix3x4, Matrix4};

/// A virtual camera pose: a 3x3 rotation and a translation column, stored as a 3x4 matrix.
///
/// The rotation block is the product of three elementary rotations and therefore orthonormal.
/// The z component of the translation conventionally carries the viewing depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrinsicMatrix(pub Matrix3x4);

impl ExtrinsicMatrix {
    /// The leading 3x3 rotation block.
    pub fn rotation(&self) -> Matrix3 {
        let m = &self.0;
        [
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ]
    }

    /// The translation column.
    pub fn translation(&self) -> [f64; 3] {
        [self.0[0][3], self.0[1][3], self.0[2][3]]
    }

    /// Embed the pose into a 4x4 homogeneous matrix with `[0, 0, 0, 1]` as the last row.
    pub fn to_homogeneous(&self) -> Matrix4 {
        let m = &self.0;
        [m[0], m[1], m[2], [0.0, 0.0, 0.0, 1.0]]
    }
}

/// Compose the extrinsic matrix of a camera rotated by yaw, pitch and roll.
///
/// # Arguments
///
/// * `yaw` - Rotation angle in degrees. With the other angles at zero it turns the image in its
///   own plane.
/// * `pitch` - Rotation angle in degrees, tilts the plane about the image y-axis.
/// * `roll` - Rotation angle in degrees, tilts the plane about the image x-axis.
/// * `tx`, `ty`, `tz` - The translation column.
///
/// The function is total over all real inputs; a pitch of ±90° produces a valid gimbal-locked
/// matrix.
///
/// # Example
///
/// ```
/// use imaug_imgproc::warp::compose_extrinsic;
///
/// let m = compose_extrinsic(0.0, 0.0, 0.0, 1.0, 2.0, 1000.0);
/// assert_eq!(m.rotation(), [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// assert_eq!(m.translation(), [1.0, 2.0, 1000.0]);
/// ```
pub fn compose_extrinsic(
    yaw: f64,
    pitch: f64,
    roll: f64,
    tx: f64,
    ty: f64,
    tz: f64,
) -> ExtrinsicMatrix {
    let (sin_yaw, cos_yaw) = yaw.to_radians().sin_cos();
    let (sin_pitch, cos_pitch) = pitch.to_radians().sin_cos();
    let (sin_roll, cos_roll) = roll.to_radians().sin_cos();

    #[rustfmt::skip]
    let m = [
        [
            cos_pitch * cos_yaw,
            -cos_pitch * sin_yaw,
            sin_pitch,
            tx,
        ],
        [
            cos_roll * sin_yaw + sin_roll * sin_pitch * cos_yaw,
            cos_roll * cos_yaw - sin_roll * sin_pitch * sin_yaw,
            -sin_roll * cos_pitch,
            ty,
        ],
        [
            sin_roll * sin_yaw - cos_roll * sin_pitch * cos_yaw,
            sin_roll * cos_yaw + cos_roll * sin_pitch * sin_yaw,
            cos_roll * cos_pitch,
            tz,
        ],
    ];

    ExtrinsicMatrix(m)
}
