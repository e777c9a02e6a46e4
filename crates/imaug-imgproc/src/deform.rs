use std::f64::consts::PI;

use imaug_image::{Image, ImageError};

use crate::parallel;

/// Parameters of the sinusoidal deformation.
///
/// Both waves are indexed by the row, so every row is shifted as a whole: horizontally by the
/// sine wave and vertically by the cosine wave.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeformParams {
    /// Amplitude of the horizontal wave in pixels.
    pub x_amp: f64,
    /// Amplitude of the vertical wave in pixels.
    pub y_amp: f64,
    /// Period of the horizontal wave in rows. Must not be zero.
    pub x_freq: f64,
    /// Period of the vertical wave in rows. Must not be zero.
    pub y_freq: f64,
}

impl Default for DeformParams {
    fn default() -> Self {
        Self {
            x_amp: 0.0,
            y_amp: 0.0,
            x_freq: 1.0,
            y_freq: 1.0,
        }
    }
}

impl DeformParams {
    /// Horizontal and vertical offsets of row `row`.
    pub fn offsets(&self, row: usize) -> (i64, i64) {
        let phase = 2.0 * PI * row as f64;
        let x_offset = (self.x_amp * (phase / self.x_freq).sin()).round() as i64;
        let y_offset = (self.y_amp * (phase / self.y_freq).cos()).round() as i64;
        (x_offset, y_offset)
    }
}

/// Warp an image along sine and cosine waves.
///
/// Destination pixel `(x, y)` takes source pixel `((x + dx) mod W, (y + dy) mod H)` where
/// `(dx, dy)` are the [`DeformParams::offsets`] of row `y`. Pixels whose shifted position passes
/// the right or bottom edge are left at the default value; shifts past the left or top edge wrap
/// around.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `params` - Amplitudes and periods of the two waves.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] if a period is zero or any parameter is not finite.
///
/// # Example
///
/// ```
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::deform::{deform, DeformParams};
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
///
/// // a single row sits on the zero crossing of the sine wave
/// let params = DeformParams { x_amp: 5.0, y_amp: 0.0, x_freq: 4.0, y_freq: 4.0 };
/// assert_eq!(deform(&image, &params).unwrap().as_slice(), &[1, 2, 3]);
/// ```
pub fn deform<T, const C: usize>(
    src: &Image<T, C>,
    params: &DeformParams,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    if params.x_freq == 0.0 || params.y_freq == 0.0 {
        return Err(ImageError::InvalidInput(format!(
            "deformation periods must not be zero, got {} and {}",
            params.x_freq, params.y_freq
        )));
    }

    let values = [params.x_amp, params.y_amp, params.x_freq, params.y_freq];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ImageError::InvalidInput(format!(
            "deformation parameters must be finite, got {params:?}"
        )));
    }

    let (cols, rows) = (src.cols() as i64, src.rows() as i64);
    let mut dst = Image::<T, C>::from_size_val(src.size(), T::default())?;
    if cols == 0 || rows == 0 {
        return Ok(dst);
    }

    parallel::par_iter_rows_indexed(&mut dst, |col, row, dst_pixel| {
        let (dx, dy) = params.offsets(row);
        // offsets saturate for huge amplitudes, and so do the shifted positions
        let (x, y) = ((col as i64).saturating_add(dx), (row as i64).saturating_add(dy));
        if x < cols && y < rows {
            let src_pixel = src.pixel(x.rem_euclid(cols) as usize, y.rem_euclid(rows) as usize);
            dst_pixel.copy_from_slice(src_pixel);
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imaug_image::ImageSize;

    fn ramp(width: usize, height: usize) -> Result<Image<u8, 1>, ImageError> {
        Image::new(
            ImageSize { width, height },
            (0..width * height).map(|v| v as u8).collect(),
        )
    }

    #[test]
    fn zero_amplitude_is_identity() -> Result<(), ImageError> {
        let image = ramp(5, 4)?;
        let params = DeformParams {
            x_amp: 0.0,
            y_amp: 0.0,
            x_freq: 3.0,
            y_freq: 7.0,
        };
        assert_eq!(deform(&image, &params)?, image);
        Ok(())
    }

    #[test]
    fn offsets_follow_the_waves() {
        let params = DeformParams {
            x_amp: 2.0,
            y_amp: 3.0,
            x_freq: 4.0,
            y_freq: 4.0,
        };
        assert_eq!(params.offsets(0), (0, 3));
        assert_eq!(params.offsets(1), (2, 0));
        assert_eq!(params.offsets(2), (0, -3));
        assert_eq!(params.offsets(3), (-2, 0));
    }

    #[test]
    fn horizontal_wave() -> Result<(), ImageError> {
        // rows are shifted by 0, 1, 0, -1 columns
        let image = ramp(4, 4)?;
        let params = DeformParams {
            x_amp: 1.0,
            y_amp: 0.0,
            x_freq: 4.0,
            y_freq: 1.0,
        };
        let deformed = deform(&image, &params)?;

        #[rustfmt::skip]
        let expected = [
            0, 1, 2, 3,
            5, 6, 7, 0,
            8, 9, 10, 11,
            15, 12, 13, 14,
        ];
        assert_eq!(deformed.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn vertical_wave_leaves_bottom_rows_empty() -> Result<(), ImageError> {
        // every row samples one row further down: cos(2 * pi * i) = 1
        let image = ramp(2, 3)?;
        let params = DeformParams {
            x_amp: 0.0,
            y_amp: 1.0,
            x_freq: 1.0,
            y_freq: 1.0,
        };
        let deformed = deform(&image, &params)?;
        assert_eq!(deformed.as_slice(), &[2, 3, 4, 5, 0, 0]);
        Ok(())
    }

    #[test]
    fn negative_shift_wraps() -> Result<(), ImageError> {
        // cos(0) = 1 with a negative amplitude moves row 0 to the last row
        let image = ramp(2, 3)?;
        let params = DeformParams {
            x_amp: 0.0,
            y_amp: -1.0,
            x_freq: 1.0,
            y_freq: 1.0,
        };
        let deformed = deform(&image, &params)?;
        assert_eq!(deformed.as_slice(), &[4, 5, 0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn huge_amplitude_saturates() -> Result<(), ImageError> {
        let image = ramp(4, 4)?;
        let params = DeformParams {
            x_amp: 1e300,
            y_amp: 0.0,
            x_freq: 4.0,
            y_freq: 4.0,
        };
        assert_eq!(params.offsets(1), (i64::MAX, 0));

        let deformed = deform(&image, &params)?;
        // row 0 sits on the zero crossing, row 1 is pushed past the right edge
        assert_eq!(&deformed.as_slice()[..4], &[0, 1, 2, 3]);
        assert_eq!(&deformed.as_slice()[4..8], &[0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn zero_period_is_rejected() -> Result<(), ImageError> {
        let image = ramp(2, 2)?;
        for params in [
            DeformParams {
                x_freq: 0.0,
                ..Default::default()
            },
            DeformParams {
                y_freq: 0.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                deform(&image, &params),
                Err(ImageError::InvalidInput(_))
            ));
        }
        Ok(())
    }
}
