use imaug_image::{Image, ImageError, ImageSize};

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);
    if kernel_size == 0 {
        return kernel;
    }

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Build a 2D kernel as the outer product of a horizontal and a vertical 1D kernel.
///
/// # Arguments
///
/// * `kernel_x` - The horizontal kernel, giving the kernel width.
/// * `kernel_y` - The vertical kernel, giving the kernel height.
///
/// # Returns
///
/// A single channel image with `kernel[y][x] = kernel_y[y] * kernel_x[x]`.
pub fn outer_kernel_2d(kernel_x: &[f32], kernel_y: &[f32]) -> Result<Image<f32, 1>, ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "kernel extents must be positive, got {}x{}",
            kernel_x.len(),
            kernel_y.len()
        )));
    }

    let data = kernel_y
        .iter()
        .flat_map(|ky| kernel_x.iter().map(move |kx| ky * kx))
        .collect();

    Image::new(
        ImageSize {
            width: kernel_x.len(),
            height: kernel_y.len(),
        },
        data,
    )
}

/// Create a normalized box kernel of the given (width, height).
///
/// # Example
///
/// ```
/// use imaug_imgproc::filter::kernels::box_kernel_2d;
///
/// let kernel = box_kernel_2d((2, 2)).unwrap();
/// assert_eq!(kernel.as_slice(), &[0.25; 4]);
/// ```
pub fn box_kernel_2d(kernel_size: (usize, usize)) -> Result<Image<f32, 1>, ImageError> {
    outer_kernel_2d(
        &box_blur_kernel_1d(kernel_size.0),
        &box_blur_kernel_1d(kernel_size.1),
    )
}

/// Create a normalized gaussian kernel of the given (width, height) and (sigma_x, sigma_y).
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] for an empty kernel or a sigma that is not positive.
pub fn gaussian_kernel_2d(
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<Image<f32, 1>, ImageError> {
    if !(sigma.0 > 0.0 && sigma.1 > 0.0) {
        return Err(ImageError::InvalidInput(format!(
            "gaussian sigma must be positive, got {sigma:?}"
        )));
    }
    outer_kernel_2d(
        &gaussian_kernel_1d(kernel_size.0, sigma.0),
        &gaussian_kernel_1d(kernel_size.1, sigma.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (i, &k) in kernel.iter().enumerate() {
            assert_eq!(k, expected[i]);
        }
    }

    #[test]
    fn test_box_blur_kernel_1d() {
        assert_eq!(box_blur_kernel_1d(4), vec![0.25; 4]);
        assert!(box_blur_kernel_1d(0).is_empty());
    }

    #[test]
    fn test_outer_kernel_2d() -> Result<(), ImageError> {
        let kernel = outer_kernel_2d(&[1.0, 2.0, 3.0], &[1.0, 10.0])?;
        assert_eq!(kernel.size(), ImageSize { width: 3, height: 2 });
        assert_eq!(kernel.as_slice(), &[1.0, 2.0, 3.0, 10.0, 20.0, 30.0]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d_sums_to_one() -> Result<(), ImageError> {
        let kernel = gaussian_kernel_2d((5, 3), (1.5, 0.8))?;
        assert_eq!(kernel.size(), ImageSize { width: 5, height: 3 });
        assert_relative_eq!(kernel.as_slice().iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        // symmetric about the center
        assert_relative_eq!(kernel.as_slice()[0], kernel.as_slice()[14]);
        Ok(())
    }

    #[test]
    fn test_invalid_kernels() {
        assert!(box_kernel_2d((0, 3)).is_err());
        assert!(gaussian_kernel_2d((3, 3), (0.0, 1.0)).is_err());
        assert!(gaussian_kernel_2d((3, 3), (1.0, f32::NAN)).is_err());
    }
}
