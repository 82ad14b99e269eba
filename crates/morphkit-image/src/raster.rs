use crate::color::Rgba64;
use crate::error::RasterError;

/// Raster size in pixels
///
/// A struct to represent the size of a raster in pixels.
///
/// # Examples
///
/// ```
/// use morphkit_image::RasterSize;
///
/// let size = RasterSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSize {
    /// Width of the raster in pixels
    pub width: usize,
    /// Height of the raster in pixels
    pub height: usize,
}

impl std::fmt::Display for RasterSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RasterSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for RasterSize {
    fn from(size: [usize; 2]) -> Self {
        RasterSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents a rectangular raster of fixed-point RGBA pixels.
///
/// Pixels are stored row-major. The raster is caller-owned; the warp
/// operations read it immutably or mutate it only within its declared bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    size: RasterSize,
    data: Vec<Rgba64>,
}

impl Raster {
    /// Create a new raster from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the raster in pixels.
    /// * `data` - The pixel data, row-major, `width * height` entries.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the raster size, an
    /// error is returned.
    pub fn new(size: RasterSize, data: Vec<Rgba64>) -> Result<Self, RasterError> {
        if data.len() != size.width * size.height {
            return Err(RasterError::InvalidLength(
                data.len(),
                size.width * size.height,
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a new raster with the given size, every pixel set to `val`.
    pub fn from_size_val(size: RasterSize, val: Rgba64) -> Self {
        Self {
            size,
            data: vec![val; size.width * size.height],
        }
    }

    /// The size of the raster in pixels.
    pub fn size(&self) -> RasterSize {
        self.size
    }

    /// The width of the raster in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the raster in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::OutOfBounds`] when the coordinate falls outside
    /// the raster.
    pub fn get(&self, x: usize, y: usize) -> Result<Rgba64, RasterError> {
        self.check_bounds(x, y)?;
        Ok(self.data[y * self.size.width + x])
    }

    /// Set the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::OutOfBounds`] when the coordinate falls outside
    /// the raster.
    pub fn set(&mut self, x: usize, y: usize, color: Rgba64) -> Result<(), RasterError> {
        self.check_bounds(x, y)?;
        self.data[y * self.size.width + x] = color;
        Ok(())
    }

    /// Tolerant pixel read over signed coordinates.
    ///
    /// Coordinates outside the raster read as transparent black, which lets
    /// resampling kernels probe fractional edge pixels without bounds
    /// bookkeeping.
    pub fn pixel(&self, x: i64, y: i64) -> Rgba64 {
        if x < 0 || y < 0 || x as usize >= self.size.width || y as usize >= self.size.height {
            return Rgba64::TRANSPARENT;
        }
        self.data[y as usize * self.size.width + x as usize]
    }

    /// Tolerant pixel write over signed coordinates; writes outside the
    /// raster are dropped.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba64) {
        if x < 0 || y < 0 || x as usize >= self.size.width || y as usize >= self.size.height {
            return;
        }
        self.data[y as usize * self.size.width + x as usize] = color;
    }

    /// Borrow one row of pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::OutOfBounds`] when `y` is not a valid row.
    pub fn row(&self, y: usize) -> Result<&[Rgba64], RasterError> {
        self.check_bounds(0, y)?;
        let start = y * self.size.width;
        Ok(&self.data[start..start + self.size.width])
    }

    /// Copy one column of pixels out of the raster.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::OutOfBounds`] when `x` is not a valid column.
    pub fn column(&self, x: usize) -> Result<Vec<Rgba64>, RasterError> {
        self.check_bounds(x, 0)?;
        Ok((0..self.size.height)
            .map(|y| self.data[y * self.size.width + x])
            .collect())
    }

    /// Write one column of pixels back into the raster.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::OutOfBounds`] when `x` is not a valid column or
    /// [`RasterError::InvalidLength`] when `column` is not `height` pixels.
    pub fn set_column(&mut self, x: usize, column: &[Rgba64]) -> Result<(), RasterError> {
        self.check_bounds(x, 0)?;
        if column.len() != self.size.height {
            return Err(RasterError::InvalidLength(column.len(), self.size.height));
        }
        for (y, &color) in column.iter().enumerate() {
            self.data[y * self.size.width + x] = color;
        }
        Ok(())
    }

    /// The raw pixel data, row-major.
    pub fn as_slice(&self) -> &[Rgba64] {
        &self.data
    }

    /// The raw pixel data, row-major and mutable.
    pub fn as_slice_mut(&mut self) -> &mut [Rgba64] {
        &mut self.data
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), RasterError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(RasterError::OutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Raster, RasterSize};
    use crate::color::Rgba64;
    use crate::error::RasterError;

    #[test]
    fn new_rejects_wrong_length() {
        let size = RasterSize {
            width: 3,
            height: 2,
        };
        let res = Raster::new(size, vec![Rgba64::TRANSPARENT; 5]);
        assert_eq!(res, Err(RasterError::InvalidLength(5, 6)));
    }

    #[test]
    fn get_set_round_trip() -> Result<(), RasterError> {
        let size = RasterSize {
            width: 4,
            height: 3,
        };
        let mut raster = Raster::from_size_val(size, Rgba64::TRANSPARENT);
        let red = Rgba64::new(0xffff, 0, 0, 0xffff);
        raster.set(2, 1, red)?;
        assert_eq!(raster.get(2, 1)?, red);
        assert_eq!(raster.get(0, 0)?, Rgba64::TRANSPARENT);
        assert!(raster.get(4, 0).is_err());
        Ok(())
    }

    #[test]
    fn tolerant_access_outside_bounds() {
        let size = RasterSize {
            width: 2,
            height: 2,
        };
        let mut raster = Raster::from_size_val(size, Rgba64::new(1, 1, 1, 1));
        assert_eq!(raster.pixel(-1, 0), Rgba64::TRANSPARENT);
        assert_eq!(raster.pixel(0, 5), Rgba64::TRANSPARENT);
        // dropped without panicking
        raster.set_pixel(-3, 7, Rgba64::new(9, 9, 9, 9));
        assert_eq!(raster.pixel(0, 0), Rgba64::new(1, 1, 1, 1));
    }

    #[test]
    fn column_round_trip() -> Result<(), RasterError> {
        let size = RasterSize {
            width: 3,
            height: 2,
        };
        let mut raster = Raster::from_size_val(size, Rgba64::TRANSPARENT);
        let col = vec![Rgba64::new(1, 2, 3, 4), Rgba64::new(5, 6, 7, 8)];
        raster.set_column(1, &col)?;
        assert_eq!(raster.column(1)?, col);
        assert_eq!(raster.row(0)?[0], Rgba64::TRANSPARENT);
        assert_eq!(raster.row(0)?[1], Rgba64::new(1, 2, 3, 4));
        Ok(())
    }
}
