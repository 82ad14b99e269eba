/// An error type for the mesh module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MeshError {
    /// Error when a row index falls outside the materialized grid range.
    #[error("Row {0} is outside the materialized range ({1} rows)")]
    RowOutOfBounds(usize, usize),

    /// Error when a column index falls outside the materialized grid range.
    #[error("Column {0} is outside the materialized range ({1} columns)")]
    ColumnOutOfBounds(usize, usize),

    /// Error when a rank access falls outside a sorted index.
    #[error("Rank {0} is outside the index ({1} points)")]
    RankOutOfBounds(usize, usize),

    /// Error when no point with the requested primary coordinate exists.
    ///
    /// Distinct from [`MeshError::RankOutOfBounds`]: the index may well hold
    /// points at the probed rank, just none with this coordinate.
    #[error("No point with primary coordinate {0}")]
    PointNotFound(f64),

    /// Error when a line with fewer than three points is splined.
    #[error("Spline interpolation needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    /// Error when the spline tension parameter is out of range.
    #[error("Alpha must be in [0.0, 1.0], got {0}")]
    AlphaOutOfRange(f64),

    /// Error when the requested sample count is too small.
    #[error("Total steps must be 2 or greater, got {0}")]
    InvalidStepCount(usize),

    /// Error when a curve query needs at least two samples.
    #[error("Curve has fewer than 2 samples ({0})")]
    CurveTooShort(usize),

    /// Error when a curve sample access is out of range.
    #[error("Sample {0} is outside the curve ({1} samples)")]
    SampleOutOfBounds(usize, usize),

    /// Error when a curve never crosses the requested coordinate.
    #[error("Curve has no crossing at coordinate {0}")]
    NoCrossing(f64),

    /// Error when a query runs against a curve with no samples.
    #[error("Curve has no samples")]
    EmptyCurve,
}
