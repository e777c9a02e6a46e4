use imaug_image::{Image, ImageError};

use super::kernels;
use crate::interpolation::BorderMode;
use crate::parallel;

/// Correlate an image with a 2D kernel.
///
/// Samples outside of the image are mirrored without repeating the edge pixel (reflect-101), so
/// the output has the size of the input.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The kernel, applied identically to every channel.
/// * `anchor` - The kernel cell aligned with the output pixel as (x, y). Defaults to the kernel
///   center.
/// * `delta` - A value added to every output sample.
///
/// # Returns
///
/// The filtered image where `dst(x, y) = sum(kernel(i, j) * src(x + i - ax, y + j - ay)) + delta`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] for an empty image or kernel, or an anchor outside of the
/// kernel.
///
/// # Example
///
/// ```
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::filter::filter2d;
///
/// let image = Image::<f32, 1>::new(ImageSize { width: 3, height: 1 }, vec![1.0, 2.0, 3.0]).unwrap();
/// let kernel = Image::<f32, 1>::new(ImageSize { width: 2, height: 1 }, vec![1.0, 1.0]).unwrap();
///
/// let filtered = filter2d(&image, &kernel, Some((0, 0)), 0.5).unwrap();
///
/// // the last sample mirrors back onto the second pixel
/// assert_eq!(filtered.as_slice(), &[3.5, 5.5, 5.5]);
/// ```
pub fn filter2d<const C: usize>(
    src: &Image<f32, C>,
    kernel: &Image<f32, 1>,
    anchor: Option<(usize, usize)>,
    delta: f32,
) -> Result<Image<f32, C>, ImageError> {
    if src.size().is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "cannot filter an empty image ({})",
            src.size()
        )));
    }

    let (kernel_cols, kernel_rows) = (kernel.cols(), kernel.rows());
    if kernel_cols == 0 || kernel_rows == 0 {
        return Err(ImageError::InvalidInput(format!(
            "kernel must not be empty ({})",
            kernel.size()
        )));
    }

    let (anchor_x, anchor_y) = anchor.unwrap_or((kernel_cols / 2, kernel_rows / 2));
    if anchor_x >= kernel_cols || anchor_y >= kernel_rows {
        return Err(ImageError::InvalidInput(format!(
            "anchor ({anchor_x}, {anchor_y}) lies outside of the {} kernel",
            kernel.size()
        )));
    }

    let (cols, rows) = (src.cols(), src.rows());
    let kernel_data = kernel.as_slice();
    let mut dst = Image::<f32, C>::from_size_val(src.size(), 0.0)?;

    parallel::par_iter_rows_indexed(&mut dst, |col, row, dst_pixel| {
        let mut acc = [delta; C];
        for (ky, kernel_row) in kernel_data.chunks_exact(kernel_cols).enumerate() {
            let y = row as isize + ky as isize - anchor_y as isize;
            let Some(iy) = BorderMode::Reflect101.map_index(y, rows) else {
                continue;
            };
            for (kx, &weight) in kernel_row.iter().enumerate() {
                let x = col as isize + kx as isize - anchor_x as isize;
                let Some(ix) = BorderMode::Reflect101.map_index(x, cols) else {
                    continue;
                };
                for (a, &v) in acc.iter_mut().zip(src.pixel(ix, iy)) {
                    *a += weight * v;
                }
            }
        }
        dst_pixel.copy_from_slice(&acc);
    });

    Ok(dst)
}

/// Blur an image using a box blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
pub fn box_blur<const C: usize>(
    src: &Image<f32, C>,
    kernel_size: (usize, usize),
) -> Result<Image<f32, C>, ImageError> {
    let kernel = kernels::box_kernel_2d(kernel_size)?;
    filter2d(src, &kernel, None, 0.0)
}

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel, xy-ordered.
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<Image<f32, C>, ImageError> {
    let kernel = kernels::gaussian_kernel_2d(kernel_size, sigma)?;
    filter2d(src, &kernel, None, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imaug_image::ImageSize;

    #[test]
    fn test_box_blur() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        #[rustfmt::skip]
        let img = Image::new(
            size,
            vec![
                0f32, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 9.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )?;

        let dst = box_blur::<1>(&img, (3, 3))?;

        #[rustfmt::skip]
        let expected = [
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ];

        for (a, b) in dst.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }

        Ok(())
    }

    #[test]
    fn test_identity_kernel() -> Result<(), ImageError> {
        let img = Image::<f32, 2>::new([3, 2].into(), (0..12).map(|v| v as f32).collect())?;
        let kernel = Image::<f32, 1>::new([3, 3].into(), vec![0., 0., 0., 0., 1., 0., 0., 0., 0.])?;
        let dst = filter2d(&img, &kernel, None, 0.0)?;
        assert_eq!(dst, img);
        Ok(())
    }

    #[test]
    fn test_reflect101_borders() -> Result<(), ImageError> {
        // a shift kernel reads one pixel to the left; column -1 mirrors onto column 1
        let img = Image::<f32, 1>::new([4, 1].into(), vec![1.0, 2.0, 3.0, 4.0])?;
        let kernel = Image::<f32, 1>::new([3, 1].into(), vec![1.0, 0.0, 0.0])?;
        let dst = filter2d(&img, &kernel, None, 0.0)?;
        assert_eq!(dst.as_slice(), &[2.0, 1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_anchor_and_delta() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::new([3, 1].into(), vec![1.0, 2.0, 3.0])?;
        let kernel = Image::<f32, 1>::new([2, 1].into(), vec![1.0, 1.0])?;

        let dst = filter2d(&img, &kernel, Some((1, 0)), 1.0)?;
        // column -1 mirrors onto column 1
        assert_eq!(dst.as_slice(), &[4.0, 4.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_preserves_constant() -> Result<(), ImageError> {
        let img = Image::<f32, 3>::from_size_pixel([7, 5].into(), [10.0, 20.0, 30.0])?;
        let dst = gaussian_blur(&img, (5, 3), (1.2, 0.7))?;
        for pixel in dst.as_slice().chunks_exact(3) {
            assert_relative_eq!(pixel[0], 10.0, epsilon = 1e-4);
            assert_relative_eq!(pixel[1], 20.0, epsilon = 1e-4);
            assert_relative_eq!(pixel[2], 30.0, epsilon = 1e-4);
        }
        Ok(())
    }

    #[test]
    fn test_single_pixel_image() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::new([1, 1].into(), vec![5.0])?;
        let dst = box_blur(&img, (3, 3))?;
        assert_relative_eq!(dst.as_slice()[0], 5.0, epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn test_invalid_arguments() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::from_size_val([3, 3].into(), 1.0)?;
        let kernel = Image::<f32, 1>::from_size_val([3, 3].into(), 1.0)?;
        assert!(matches!(
            filter2d(&img, &kernel, Some((3, 0)), 0.0),
            Err(ImageError::InvalidInput(_))
        ));

        let empty = Image::<f32, 1>::new([0, 0].into(), vec![])?;
        assert!(filter2d(&empty, &kernel, None, 0.0).is_err());
        assert!(filter2d(&img, &empty, None, 0.0).is_err());
        Ok(())
    }
}
