/// An error type for the raster module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RasterError {
    /// Error when the pixel data length does not match the raster size.
    #[error("Data length ({0}) does not match the raster size ({1})")]
    InvalidLength(usize, usize),

    /// Error when a pixel access falls outside the raster bounds.
    #[error("Pixel ({0}, {1}) is outside the raster bounds {2}x{3}")]
    OutOfBounds(usize, usize, usize, usize),
}
