use imaug_image::ImageError;

/// A 3x3 matrix stored row-major.
pub type Matrix3 = [[f64; 3]; 3];

/// A 3x4 matrix stored row-major.
pub type Matrix3x4 = [[f64; 4]; 3];

/// A 4x4 matrix stored row-major.
pub type Matrix4 = [[f64; 4]; 4];

/// Pivots smaller than this are treated as zero when inverting.
const SINGULAR_EPS: f64 = 1e-12;

/// Multiply two row-major matrices of compatible shapes.
///
/// # Example
///
/// ```
/// use imaug_imgproc::warp::matmul;
///
/// let a = [[1.0, 2.0], [3.0, 4.0]];
/// let b = [[0.0, 1.0], [1.0, 0.0]];
/// assert_eq!(matmul(&a, &b), [[2.0, 1.0], [4.0, 3.0]]);
/// ```
pub fn matmul<const N: usize, const K: usize, const M: usize>(
    a: &[[f64; K]; N],
    b: &[[f64; M]; K],
) -> [[f64; M]; N] {
    let mut out = [[0.0; M]; N];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = (0..K).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Multiply a row-major matrix with a column vector.
pub fn matvec<const N: usize, const K: usize>(a: &[[f64; K]; N], v: &[f64; K]) -> [f64; N] {
    let mut out = [0.0; N];
    for (i, val) in out.iter_mut().enumerate() {
        *val = (0..K).map(|k| a[i][k] * v[k]).sum();
    }
    out
}

/// Identity matrix of size `N`.
pub fn identity<const N: usize>() -> [[f64; N]; N] {
    let mut out = [[0.0; N]; N];
    for (i, row) in out.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    out
}

/// Invert a square matrix with Gauss-Jordan elimination and partial pivoting.
///
/// # Errors
///
/// Returns [`ImageError::DegenerateTransform`] when the matrix is singular or contains
/// non-finite values.
pub fn invert<const N: usize>(m: &[[f64; N]; N]) -> Result<[[f64; N]; N], ImageError> {
    if m.iter().flatten().any(|v| !v.is_finite()) {
        return Err(ImageError::DegenerateTransform(
            "matrix contains non-finite values".to_string(),
        ));
    }

    // scale the pivot threshold with the magnitude of the input
    let scale = m.iter().flatten().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let eps = SINGULAR_EPS * scale.max(1.0);

    let mut a = *m;
    let mut inv = identity::<N>();

    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        if a[pivot_row][col].abs() < eps {
            return Err(ImageError::DegenerateTransform(format!(
                "matrix is singular (pivot {:e} in column {col})",
                a[pivot_row][col]
            )));
        }

        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for k in 0..N {
            a[col][k] /= pivot;
            inv[col][k] /= pivot;
        }

        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in 0..N {
                a[row][k] -= factor * a[col][k];
                inv[row][k] -= factor * inv[col][k];
            }
        }
    }

    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn invert_identity_is_exact() -> Result<(), ImageError> {
        let eye = identity::<4>();
        assert_eq!(invert(&eye)?, eye);
        Ok(())
    }

    #[test]
    fn invert_rigid_transform() -> Result<(), ImageError> {
        let (s, c) = 0.3f64.sin_cos();
        let m: Matrix4 = [
            [c, -s, 0.0, 1.0],
            [s, c, 0.0, -2.0],
            [0.0, 0.0, 1.0, 1000.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let inv = invert(&m)?;
        let prod = matmul(&m, &inv);
        let eye = identity::<4>();
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(prod[i][j], eye[i][j], epsilon = 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn invert_needs_pivoting() -> Result<(), ImageError> {
        let m: Matrix3 = [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 2.0]];
        let inv = invert(&m)?;
        assert_eq!(inv, [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.5]]);
        Ok(())
    }

    #[test]
    fn invert_singular() {
        let m: Matrix3 = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            invert(&m),
            Err(ImageError::DegenerateTransform(_))
        ));

        let mut m = identity::<3>();
        m[1][1] = f64::NAN;
        assert!(matches!(
            invert(&m),
            Err(ImageError::DegenerateTransform(_))
        ));
    }

    #[test]
    fn matmul_rectangular() {
        let a: Matrix3x4 = [
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 7.0],
        ];
        let b: [[f64; 1]; 4] = [[1.0], [2.0], [3.0], [1.0]];
        assert_eq!(matmul(&a, &b), [[6.0], [8.0], [10.0]]);
        assert_eq!(matvec(&a, &[1.0, 2.0, 3.0, 1.0]), [6.0, 8.0, 10.0]);
    }
}
