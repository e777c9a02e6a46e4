use crate::error::ImageError;

/// Image size in pixels.
///
/// # Examples
///
/// ```
/// use imaug_image::ImageSize;
///
/// let size = ImageSize::from([640, 480]);
///
/// assert_eq!(size.width, 640);
/// assert_eq!(size.area(), 640 * 480);
/// assert!(!size.is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether either of the dimensions is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        ImageSize { width, height }
    }
}

/// Pixel types the resamplers can read and write back.
///
/// Samples are processed as `f32`. Send and Sync are required to process rows in parallel.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 sample back to the pixel type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// An owned image.
///
/// The samples are stored row-major and interleaved, i.e. with shape (H, W, C) where H is the
/// height of the image, W the width and C the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from interleaved samples.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The samples in (H, W, C) order.
    ///
    /// # Errors
    ///
    /// If the number of samples does not match `size` and `CHANNELS`, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use imaug_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size(), ImageSize { width: 10, height: 20 });
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create an image with every sample set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, vec![val; size.area() * CHANNELS])
    }

    /// Create an image with every pixel set to `pixel`.
    ///
    /// # Examples
    ///
    /// ```
    /// use imaug_image::Image;
    ///
    /// let image = Image::<u8, 3>::from_size_pixel([2, 1].into(), [255, 0, 0]).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[255, 0, 0, 255, 0, 0]);
    /// ```
    pub fn from_size_pixel(size: ImageSize, pixel: [T; CHANNELS]) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let data = pixel.repeat(size.area());
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the samples in (H, W, C) order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the samples in (H, W, C) order as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the channel values of the pixel at column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[T] {
        let base = (y * self.size.width + x) * CHANNELS;
        &self.data[base..base + CHANNELS]
    }

    /// Get a single sample with bounds checking.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel index.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] or [`ImageError::ChannelIndexOutOfBounds`]
    /// for an index outside of the image.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(self.data[(y * self.width() + x) * CHANNELS + ch])
    }

    /// Convert every sample to another numeric type.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::CastError`] if a sample is not representable in `U`.
    ///
    /// # Examples
    ///
    /// ```
    /// use imaug_image::Image;
    ///
    /// let image = Image::<u8, 1>::new([2, 1].into(), vec![0, 200]).unwrap();
    /// let image_f32 = image.cast::<f32>().unwrap();
    ///
    /// assert_eq!(image_f32.as_slice(), &[0.0, 200.0]);
    /// ```
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, data)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageDtype, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(size.area(), 200);
        assert!(!size.is_empty());
        assert!(ImageSize::from([0, 3]).is_empty());
        assert_eq!(size.to_string(), "10x20");
    }

    #[test]
    fn image_wrong_length() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 5]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(5, 12)));
    }

    #[test]
    fn image_from_pixel() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::from_size_pixel([3, 2].into(), [7, 9])?;
        assert_eq!(image.num_channels(), 2);
        assert_eq!((image.cols(), image.rows()), (3, 2));
        assert!(image.as_slice().chunks_exact(2).all(|px| px == [7, 9]));
        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::<u8, 3>::new([1, 2].into(), vec![0, 1, 2, 3, 4, 5])?;
        let image_i32: Image<i32, 3> = image_u8.cast()?;
        assert_eq!(image_i32.get_pixel(0, 1, 2)?, 5);

        let image = Image::<f32, 1>::new([1, 1].into(), vec![-3.0])?;
        assert_eq!(image.cast::<u8>(), Err(ImageError::CastError));
        Ok(())
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        let mut image = Image::<u8, 2>::from_size_pixel([3, 2].into(), [7, 9])?;
        image.as_slice_mut()[(3 + 1) * 2] = 42;

        assert_eq!(image.pixel(1, 1), &[42, 9]);
        assert_eq!(image.get_pixel(2, 1, 1)?, 9);
        assert_eq!(
            image.get_pixel(3, 0, 0),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        assert_eq!(
            image.get_pixel(0, 0, 2),
            Err(ImageError::ChannelIndexOutOfBounds(2, 2))
        );
        Ok(())
    }

    #[test]
    fn dtype_saturates() {
        assert_eq!(<u8 as ImageDtype>::from_f32(300.0), 255);
        assert_eq!(<u8 as ImageDtype>::from_f32(-4.0), 0);
        assert_eq!(<u8 as ImageDtype>::from_f32(1.6), 2);
    }
}
