use imaug_image::{ImageError, ImageSize};

/// A dense grid of sub-pixel source coordinates, one value per destination pixel.
///
/// Values are stored row-major. They may lie outside of the source image; the resampler resolves
/// those with its border policy.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateMap {
    size: ImageSize,
    data: Vec<f32>,
}

impl CoordinateMap {
    /// Create a coordinate map from row-major values.
    ///
    /// # Errors
    ///
    /// If the number of values does not match the size, an error is returned.
    pub fn new(size: ImageSize, data: Vec<f32>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height,
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a coordinate map with every cell set to `val`.
    pub fn from_size_val(size: ImageSize, val: f32) -> Self {
        Self {
            size,
            data: vec![val; size.width * size.height],
        }
    }

    /// Create a coordinate map by evaluating `f(x, y)` at every cell.
    pub fn from_fn(size: ImageSize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(size.width * size.height);
        for y in 0..size.height {
            data.extend((0..size.width).map(|x| f(x, y)));
        }
        Self { size, data }
    }

    /// Size of the grid.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns of the grid.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Number of rows of the grid.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The value at column `x` and row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.data[y * self.size.width + x])
    }

    /// The row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Create a meshgrid of x and y coordinates from a function
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Computes the `(x, y)` pair stored at a grid position, given as `(col, row)`
///
/// # Returns
///
/// A tuple of coordinate maps of shape (rows, cols) containing the x and y coordinates
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    mut f: impl FnMut(usize, usize) -> Result<(f32, f32), ImageError>,
) -> Result<(CoordinateMap, CoordinateMap), ImageError> {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            let (x, y) = f(c, r)?;
            map_x.push(x);
            map_y.push(y);
        }
    }

    let size = ImageSize {
        width: cols,
        height: rows,
    };

    Ok((
        CoordinateMap::new(size, map_x)?,
        CoordinateMap::new(size, map_y)?,
    ))
}
