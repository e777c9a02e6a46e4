use imaug_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

/// Flip the input image horizontally.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The mirrored image, pixel (x, y) holding source pixel (W - 1 - x, y).
///
/// # Example
///
/// ```
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::flip::horizontal_flip;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 1,
///     },
///     vec![1, 2, 3],
/// )
/// .unwrap();
///
/// let flipped = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[3, 2, 1]);
/// ```
pub fn horizontal_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.clone();
    let cols = src.cols();
    if cols == 0 {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .for_each(|row| {
            let mut i = 0;
            let mut j = cols - 1;
            while i < j {
                for c in 0..C {
                    row.swap(i * C + c, j * C + c);
                }
                i += 1;
                j -= 1;
            }
        });

    Ok(dst)
}

/// Flip the input image vertically.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The mirrored image, pixel (x, y) holding source pixel (x, H - 1 - y).
///
/// # Example
///
/// ```
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::flip::vertical_flip;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 1,
///         height: 3,
///     },
///     vec![1, 2, 3],
/// )
/// .unwrap();
///
/// let flipped = vertical_flip(&image).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[3, 2, 1]);
/// ```
pub fn vertical_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.clone();
    let stride = src.cols() * C;
    if stride == 0 {
        return Ok(dst);
    }

    // row i of the output is row (H - 1 - i) of the input
    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .zip(src.as_slice().par_chunks_exact(stride).rev())
        .for_each(|(dst_row, src_row)| dst_row.copy_from_slice(src_row));

    Ok(dst)
}
