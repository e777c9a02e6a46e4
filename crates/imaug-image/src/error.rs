/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two image sizes that must agree do not.
    #[error("Invalid image size: ({0}, {1}) does not match ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a pixel value cannot be cast to the target type.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when an argument is outside of the domain of the operation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error when a geometric transform is singular or numerically degenerate.
    #[error("Degenerate transform: {0}")]
    DegenerateTransform(String),
}
