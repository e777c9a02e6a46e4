use imaug_image::Image;

/// A border type used when a sample falls outside of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderMode {
    /// This border type fills the border with a single, constant color value.
    ///
    /// Example: ...d c b a | v v v v...
    #[default]
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// This border type wraps the content from the opposite side.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl BorderMode {
    #[inline]
    fn reflect(i: isize, len: isize) -> isize {
        let period = 2 * len;
        let m = i.rem_euclid(period);
        if m < len {
            m
        } else {
            period - 1 - m
        }
    }

    #[inline]
    fn reflect101(i: isize, len: isize) -> isize {
        if len == 1 {
            return 0;
        }
        let period = 2 * len - 2;
        let m = i.rem_euclid(period);
        if m < len {
            m
        } else {
            period - m
        }
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the border mode.
    ///
    /// - `Constant`: `None` for any index outside the range, the fill value is used instead
    /// - `Replicate`: clamp to edge
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Wrap`: circular wrap
    ///
    /// Returns `None` as well when `len` is zero.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let ilen = len as isize;
        if (0..ilen).contains(&i) {
            return Some(i as usize);
        }
        let mapped = match self {
            BorderMode::Constant => return None,
            BorderMode::Replicate => i.clamp(0, ilen - 1),
            BorderMode::Reflect => Self::reflect(i, ilen),
            BorderMode::Reflect101 => Self::reflect101(i, ilen),
            BorderMode::Wrap => i.rem_euclid(ilen),
        };
        Some(mapped as usize)
    }
}

/// Read the pixel at integer position `(x, y)`, resolving out-of-range positions with `border`.
#[inline]
pub(crate) fn fetch_pixel<const C: usize>(
    image: &Image<f32, C>,
    x: isize,
    y: isize,
    border: BorderMode,
    border_value: &[f32; C],
) -> [f32; C] {
    match (
        border.map_index(x, image.cols()),
        border.map_index(y, image.rows()),
    ) {
        (Some(ix), Some(iy)) => {
            let mut pixel = [0.0; C];
            pixel.copy_from_slice(image.pixel(ix, iy));
            pixel
        }
        _ => *border_value,
    }
}
