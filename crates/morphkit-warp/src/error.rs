use morphkit_image::RasterError;
use morphkit_mesh::MeshError;

/// An error type for the warp module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// Error when the original and warped spline sets differ in length.
    #[error("Spline count mismatch: {original} original vs {warped} warped")]
    SplineCountMismatch {
        /// Curves bounding the original pixel runs.
        original: usize,
        /// Curves bounding the warped pixel runs.
        warped: usize,
    },

    /// Error when a spline crosses a scanline other than exactly once; the
    /// mesh produced a warp that folds back along the scan axis.
    #[error("Spline crosses scanline {line} {crossings} times; the warp folds along the scan axis")]
    FoldedSpline {
        /// The scanline coordinate being resampled.
        line: i64,
        /// How many crossings were found.
        crossings: usize,
    },

    /// Error when rasters that must match in size do not.
    #[error("Raster sizes do not match")]
    SizeMismatch,

    /// Error when the raster and weight counts differ in a cross-dissolve.
    #[error("Got {rasters} rasters but {weights} weights")]
    WeightCountMismatch {
        /// Number of rasters provided.
        rasters: usize,
        /// Number of weights provided.
        weights: usize,
    },

    /// Error when a cross-dissolve receives fewer than two rasters.
    #[error("Cross dissolve needs at least 2 rasters, got {0}")]
    NotEnoughRasters(usize),

    /// Error from the mesh layer.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Error from the raster layer.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
