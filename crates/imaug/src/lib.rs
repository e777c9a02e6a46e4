#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use imaug_image as image;

#[doc(inline)]
pub use imaug_imgproc as imgproc;
