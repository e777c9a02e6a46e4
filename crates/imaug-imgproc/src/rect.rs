use imaug_image::ImageSize;

/// An axis-aligned rectangle addressed in integer pixel coordinates.
///
/// The origin `(x, y)` is the top-left corner. Width and height are signed so that the clipping
/// helpers can report regions that collapsed to nothing; see [`Rect::is_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// x-coordinate of the top-left corner.
    pub x: i32,
    /// y-coordinate of the top-left corner.
    pub y: i32,
    /// Width of the rectangle in pixels.
    pub width: i32,
    /// Height of the rectangle in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole image of the given size.
    pub fn from_size(size: ImageSize) -> Self {
        Self::new(0, 0, size.width as i32, size.height as i32)
    }

    /// x-coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// y-coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Number of pixels covered, zero for empty rectangles.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }

    /// Whether the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Center of the rectangle in real coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Whether `other` lies completely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Size of the rectangle, `None` when it is empty.
    pub fn size(&self) -> Option<ImageSize> {
        (!self.is_empty()).then(|| ImageSize {
            width: self.width as usize,
            height: self.height as usize,
        })
    }
}

/// An axis-aligned rectangle with real-valued origin and extent.
///
/// Used in destination space while the rotated bounds are computed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectF {
    /// x-coordinate of the top-left corner.
    pub x: f64,
    /// y-coordinate of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl RectF {
    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Pixel grid covered by the rectangle, extents rounded to the nearest integer.
    ///
    /// Returns `None` when a rounded extent is not strictly positive or not finite.
    pub fn pixel_size(&self) -> Option<ImageSize> {
        let (w, h) = (self.width.round(), self.height.round());
        if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
            return None;
        }
        Some(ImageSize {
            width: w as usize,
            height: h as usize,
        })
    }
}

impl From<Rect> for RectF {
    fn from(rect: Rect) -> Self {
        RectF::new(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        )
    }
}

/// Expand a region so that any rotation of its content stays inside.
///
/// The result is a square whose side is the rounded diagonal of `area`, centered on the center of
/// `area` (integer arithmetic, truncating division).
///
/// # Example
///
/// ```
/// use imaug_imgproc::rect::{expand_rect_for_rotate, Rect};
///
/// let expanded = expand_rect_for_rotate(&Rect::new(10, 10, 3, 4));
/// assert_eq!(expanded, Rect::new(9, 10, 5, 5));
/// ```
pub fn expand_rect_for_rotate(area: &Rect) -> Rect {
    let (w, h) = (area.width as f64, area.height as f64);
    let side = (w * w + h * h).sqrt().round() as i32;

    Rect {
        x: area.x - (side - area.width) / 2,
        y: area.y - (side - area.height) / 2,
        width: side,
        height: side,
    }
}

/// Clip a rectangle to `[0, 0, size.width, size.height]`, anchored at its own origin.
///
/// The part sticking out on each side is cut off; the center is not preserved.
pub fn truncate_rect(rect: &Rect, size: ImageSize) -> Rect {
    let (max_w, max_h) = (size.width as i32, size.height as i32);
    let mut out = *rect;

    if rect.x < 0 {
        out.x = 0;
        out.width += rect.x;
    }
    if rect.y < 0 {
        out.y = 0;
        out.height += rect.y;
    }
    if out.right() > max_w {
        out.width = max_w - out.x;
    }
    if out.bottom() > max_h {
        out.height = max_h - out.y;
    }

    out
}

/// Clip a rectangle to `[0, 0, size.width, size.height]` moving its center as little as possible.
///
/// An overflow `o` past the left (top) edge shrinks the width (height) by `2 * o` and pins the
/// origin at zero. An overflow `d` past the right (bottom) edge shifts the origin by `d / 2`
/// (integer division) and then trims the extent so the far edge lands on the bound. The x axis is
/// processed before the y axis. The result never leaves the bounds, and a rectangle already inside
/// them is returned unchanged.
///
/// # Example
///
/// ```
/// use imaug_image::ImageSize;
/// use imaug_imgproc::rect::{truncate_rect_keep_center, Rect};
///
/// let bounds = ImageSize { width: 10, height: 10 };
/// let clipped = truncate_rect_keep_center(&Rect::new(-2, 1, 8, 4), bounds);
/// assert_eq!(clipped, Rect::new(0, 1, 4, 4));
/// ```
pub fn truncate_rect_keep_center(rect: &Rect, size: ImageSize) -> Rect {
    let (max_w, max_h) = (size.width as i32, size.height as i32);
    let mut out = *rect;

    if out.x < 0 {
        out.width += 2 * out.x;
        out.x = 0;
    }
    if out.right() > max_w {
        out.x += (out.right() - max_w) / 2;
        out.width = max_w - out.x;
    }

    if out.y < 0 {
        out.height += 2 * out.y;
        out.y = 0;
    }
    if out.bottom() > max_h {
        out.y += (out.bottom() - max_h) / 2;
        out.height = max_h - out.y;
    }

    out
}
