use imaug_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::rect::Rect;

/// Copy a sub-rectangle of an image into a new image.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `rect` - The region to copy, in pixel coordinates of `src`.
///
/// # Returns
///
/// A new image with the size of `rect`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] if `rect` is empty or does not lie inside `src`.
///
/// # Examples
///
/// ```rust
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::crop::crop_image;
/// use imaug_imgproc::rect::Rect;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let cropped = crop_image(&image, &Rect::new(1, 1, 2, 2)).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    rect: &Rect,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let size = rect
        .size()
        .ok_or_else(|| ImageError::InvalidInput(format!("cannot crop an empty region {rect:?}")))?;

    if !Rect::from_size(src.size()).contains_rect(rect) {
        return Err(ImageError::InvalidInput(format!(
            "crop region {rect:?} exceeds the image bounds {}",
            src.size()
        )));
    }

    let mut dst = Image::<T, C>::from_size_val(size, T::default())?;

    let (x, y) = (rect.x as usize, rect.y as usize);
    let src_stride = src.cols() * C;
    let row_len = size.width * C;

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src_stride + x * C;
            dst_row.copy_from_slice(&src.as_slice()[offset..offset + row_len]);
        });

    Ok(dst)
}
