use imaug_image::{Image, ImageError};

use crate::parallel;

/// Translate an image with wrap-around.
///
/// Pixels pushed past one edge re-enter on the opposite edge, so the output has the size of the
/// input and contains every source pixel exactly once.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `x_shift` - Horizontal shift in pixels, positive to the right. Any integer is accepted.
/// * `y_shift` - Vertical shift in pixels, positive downwards. Any integer is accepted.
///
/// # Returns
///
/// The image with pixel `(x, y)` moved to `((x + x_shift) mod W, (y + y_shift) mod H)`.
///
/// # Example
///
/// ```
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::slide::slide;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 4, height: 1 }, vec![1, 2, 3, 4]).unwrap();
///
/// assert_eq!(slide(&image, 1, 0).unwrap().as_slice(), &[4, 1, 2, 3]);
/// assert_eq!(slide(&image, -1, 0).unwrap().as_slice(), &[2, 3, 4, 1]);
/// ```
pub fn slide<T, const C: usize>(
    src: &Image<T, C>,
    x_shift: i64,
    y_shift: i64,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let (cols, rows) = (src.cols() as i64, src.rows() as i64);
    let mut dst = Image::<T, C>::from_size_val(src.size(), T::default())?;
    if cols == 0 || rows == 0 {
        return Ok(dst);
    }

    parallel::par_iter_rows_indexed(&mut dst, |col, row, dst_pixel| {
        let src_col = (col as i64 - x_shift).rem_euclid(cols) as usize;
        let src_row = (row as i64 - y_shift).rem_euclid(rows) as usize;
        dst_pixel.copy_from_slice(src.pixel(src_col, src_row));
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imaug_image::ImageSize;

    fn grid() -> Result<Image<u8, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )
    }

    #[test]
    fn slide_both_axes() -> Result<(), ImageError> {
        let slid = slide(&grid()?, 1, 1)?;
        assert_eq!(slid.as_slice(), &[5, 3, 4, 2, 0, 1]);
        Ok(())
    }

    #[test]
    fn full_period_is_identity() -> Result<(), ImageError> {
        let image = grid()?;
        assert_eq!(slide(&image, 3, 2)?, image);
        assert_eq!(slide(&image, -6, 4)?, image);
        assert_eq!(slide(&image, 0, 0)?, image);
        Ok(())
    }

    #[test]
    fn negative_shift_wraps() -> Result<(), ImageError> {
        let image = grid()?;
        assert_eq!(slide(&image, -1, -1)?, slide(&image, 2, 1)?);
        assert_eq!(slide(&image, -7, 0)?, slide(&image, 2, 0)?);
        Ok(())
    }

    #[test]
    fn multichannel_pixels_move_together() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            [2, 1].into(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )?;
        let slid = slide(&image, 1, 0)?;
        assert_eq!(slid.as_slice(), &[4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
        Ok(())
    }
}
