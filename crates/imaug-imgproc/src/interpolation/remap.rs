use crate::parallel;

use super::border::BorderMode;
use super::grid::CoordinateMap;
use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use imaug_image::{Image, ImageError};

/// Apply generic geometric transformation to an image.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to interpolate.
/// * `map_y` - The y coordinates of the pixels to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - How samples outside of `src` are resolved.
/// * `border_value` - The fill value used by [`BorderMode::Constant`].
///
/// # Returns
///
/// A new image with the extent of the maps.
///
/// # Errors
///
/// * The mapx and mapy must have the same size.
/// * The source image and the maps must not be empty.
///
/// # Example
///
/// ```
/// use imaug_image::{Image, ImageSize};
/// use imaug_imgproc::interpolation::{remap, BorderMode, CoordinateMap, InterpolationMode};
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![10.0, 20.0],
/// ).unwrap();
///
/// let size = ImageSize { width: 3, height: 1 };
/// let map_x = CoordinateMap::new(size, vec![1.0, 0.5, 5.0]).unwrap();
/// let map_y = CoordinateMap::from_size_val(size, 0.0);
///
/// let out = remap(
///     &image,
///     &map_x,
///     &map_y,
///     InterpolationMode::Bilinear,
///     BorderMode::Constant,
///     [0.0],
/// ).unwrap();
///
/// assert_eq!(out.as_slice(), &[20.0, 15.0, 0.0]);
/// ```
pub fn remap<const C: usize>(
    src: &Image<f32, C>,
    map_x: &CoordinateMap,
    map_y: &CoordinateMap,
    interpolation: InterpolationMode,
    border: BorderMode,
    border_value: [f32; C],
) -> Result<Image<f32, C>, ImageError> {
    if map_x.size() != map_y.size() {
        return Err(ImageError::InvalidImageSize(
            map_x.width(),
            map_x.height(),
            map_y.width(),
            map_y.height(),
        ));
    }

    if src.size().is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "cannot resample an empty source image ({})",
            src.size()
        )));
    }

    if map_x.size().is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "cannot resample into an empty grid ({})",
            map_x.size()
        )));
    }

    let mut dst = Image::from_size_val(map_x.size(), 0.0f32)?;

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(&mut dst, map_x, map_y, |&x, &y, dst_pixel| {
        let pixel = interpolate_pixel(src, x, y, interpolation, border, &border_value);
        dst_pixel.copy_from_slice(&pixel);
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imaug_image::ImageSize;

    fn ramp() -> Result<Image<f32, 1>, ImageError> {
        Image::<_, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )
    }

    #[test]
    fn remap_smoke() -> Result<(), ImageError> {
        let image = ramp()?;

        let new_size: ImageSize = [2, 2].into();

        let map_x = CoordinateMap::new(new_size, vec![0.0, 2.0, 0.0, 2.0])?;
        let map_y = CoordinateMap::new(new_size, vec![0.0, 0.0, 2.0, 2.0])?;

        let expected = [0.0, 2.0, 6.0, 8.0];

        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
        ] {
            let image_transformed =
                remap(&image, &map_x, &map_y, mode, BorderMode::Constant, [0.0])?;

            assert_eq!(image_transformed.num_channels(), 1);
            assert_eq!(image_transformed.size(), new_size);

            for (a, b) in image_transformed.as_slice().iter().zip(expected.iter()) {
                assert!((a - b).abs() < 1e-6, "{mode:?}: {a} != {b}");
            }
        }

        Ok(())
    }

    #[test]
    fn remap_bilinear_midpoint() -> Result<(), ImageError> {
        let image = ramp()?;
        let size: ImageSize = [1, 1].into();
        let map_x = CoordinateMap::from_size_val(size, 0.5);
        let map_y = CoordinateMap::from_size_val(size, 0.5);

        let out = remap(
            &image,
            &map_x,
            &map_y,
            InterpolationMode::Bilinear,
            BorderMode::Constant,
            [0.0],
        )?;
        // (0 + 1 + 3 + 4) / 4
        assert_eq!(out.as_slice(), &[2.0]);

        let out = remap(
            &image,
            &map_x,
            &map_y,
            InterpolationMode::Nearest,
            BorderMode::Constant,
            [0.0],
        )?;
        // 0.5 rounds away from zero
        assert_eq!(out.as_slice(), &[4.0]);

        Ok(())
    }

    #[test]
    fn remap_border_modes() -> Result<(), ImageError> {
        let image = ramp()?;
        let size: ImageSize = [2, 1].into();
        let map_x = CoordinateMap::new(size, vec![-1.0, 3.0])?;
        let map_y = CoordinateMap::from_size_val(size, 1.0);

        let sample = |border| {
            remap(
                &image,
                &map_x,
                &map_y,
                InterpolationMode::Nearest,
                border,
                [-1.0],
            )
        };

        assert_eq!(sample(BorderMode::Constant)?.as_slice(), &[-1.0, -1.0]);
        assert_eq!(sample(BorderMode::Replicate)?.as_slice(), &[3.0, 5.0]);
        assert_eq!(sample(BorderMode::Reflect)?.as_slice(), &[3.0, 5.0]);
        assert_eq!(sample(BorderMode::Reflect101)?.as_slice(), &[4.0, 4.0]);
        assert_eq!(sample(BorderMode::Wrap)?.as_slice(), &[5.0, 3.0]);

        Ok(())
    }

    #[test]
    fn remap_non_finite_coordinates() -> Result<(), ImageError> {
        let image = ramp()?;
        let size: ImageSize = [2, 1].into();
        let map_x = CoordinateMap::new(size, vec![f32::NAN, f32::INFINITY])?;
        let map_y = CoordinateMap::from_size_val(size, 0.0);

        let out = remap(
            &image,
            &map_x,
            &map_y,
            InterpolationMode::Bilinear,
            BorderMode::Replicate,
            [9.0],
        )?;
        assert_eq!(out.as_slice(), &[9.0, 9.0]);

        Ok(())
    }

    #[test]
    fn remap_size_mismatch() -> Result<(), ImageError> {
        let image = ramp()?;
        let map_x = CoordinateMap::from_size_val([2, 2].into(), 0.0);
        let map_y = CoordinateMap::from_size_val([2, 3].into(), 0.0);

        let res = remap(
            &image,
            &map_x,
            &map_y,
            InterpolationMode::Bilinear,
            BorderMode::Constant,
            [0.0],
        );
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 2, 3)));

        let empty = CoordinateMap::from_size_val([0, 2].into(), 0.0);
        let res = remap(
            &image,
            &empty,
            &empty,
            InterpolationMode::Bilinear,
            BorderMode::Constant,
            [0.0],
        );
        assert!(matches!(res, Err(ImageError::InvalidInput(_))));

        Ok(())
    }
}
