use rayon::prelude::*;

use crate::interpolation::CoordinateMap;
use imaug_image::Image;

/// Apply a function to each pixel of the destination image in parallel.
///
/// The closure receives the column, the row and the channel values of the pixel.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(row, dst_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(col, dst_pixel)| f(col, row, dst_pixel));
        });
}

/// Apply a function to each pixel for grid sampling in parallel.
///
/// PRECONDITION: `dst`, `map_x` and `map_y` share the same size.
pub fn par_iter_rows_resample<const C: usize>(
    dst: &mut Image<f32, C>,
    map_x: &CoordinateMap,
    map_y: &CoordinateMap,
    f: impl Fn(&f32, &f32, &mut [f32]) + Send + Sync,
) {
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    let dst_slice = dst.as_slice_mut();
    let map_x_slice = map_x.as_slice();
    let map_y_slice = map_y.as_slice();

    dst_slice
        .par_chunks_exact_mut(C * cols)
        .zip(map_x_slice.par_chunks_exact(cols))
        .zip(map_y_slice.par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    f(x, y, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use imaug_image::{ImageError, ImageSize};

    #[test]
    fn indexed_visits_every_pixel() -> Result<(), ImageError> {
        let mut image = Image::<usize, 2>::from_size_val([3, 2].into(), 0)?;
        par_iter_rows_indexed(&mut image, |x, y, px| {
            px[0] = x;
            px[1] = y;
        });
        assert_eq!(image.as_slice(), &[0, 0, 1, 0, 2, 0, 0, 1, 1, 1, 2, 1]);
        Ok(())
    }

    #[test]
    fn resample_reads_both_maps() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let mut image = Image::<f32, 1>::from_size_val(size, 0.0)?;
        let map_x = CoordinateMap::new(size, vec![1.0, 2.0, 3.0, 4.0])?;
        let map_y = CoordinateMap::new(size, vec![10.0, 20.0, 30.0, 40.0])?;
        par_iter_rows_resample(&mut image, &map_x, &map_y, |x, y, px| px[0] = x + y);
        assert_eq!(image.as_slice(), &[11.0, 22.0, 33.0, 44.0]);
        Ok(())
    }
}
