use num_traits::ToPrimitive;

/// Scalar types usable as grid coordinates.
pub trait GridScalar: Copy + PartialOrd + ToPrimitive + Send + Sync {
    /// View the coordinate as `f64` for curve math.
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl GridScalar for i64 {}
impl GridScalar for f64 {}

/// An immutable 2d coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point2d<T> {
    /// Horizontal coordinate.
    pub x: T,
    /// Vertical coordinate.
    pub y: T,
}

impl<T> Point2d<T> {
    /// Create a new point from its coordinates.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// An integer landmark coordinate on a keyframe raster.
pub type GridPoint = Point2d<i64>;

/// A sub-pixel coordinate produced by spline or time interpolation.
///
/// A point of `(1.25, 2.5)` addresses the location a quarter of the way
/// horizontally into and halfway down the pixel `(1, 2)`.
pub type CurvePoint = Point2d<f64>;

impl<T: GridScalar> Point2d<T> {
    /// View the point as a sub-pixel [`CurvePoint`].
    pub fn to_curve_point(self) -> CurvePoint {
        CurvePoint::new(self.x.as_f64(), self.y.as_f64())
    }
}

impl CurvePoint {
    /// Euclidean distance to another point.
    pub fn distance(self, other: Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Linear blend of two sub-pixel points, `t` measured from `self`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x * (1.0 - t) + other.x * t,
            self.y * (1.0 - t) + other.y * t,
        )
    }
}

impl From<GridPoint> for CurvePoint {
    fn from(pt: GridPoint) -> Self {
        pt.to_curve_point()
    }
}

/// Positional interpolation between a source and destination landmark.
///
/// `t` lies on `[0.0, 1.0]`; 0.0 maps to the source point and 1.0 to the
/// destination point. This is the stock interpolation function for
/// [`crate::mesh::MorphMesh::interpolated_grid`].
pub fn linear_interpolation(source: GridPoint, destination: GridPoint, t: f64) -> CurvePoint {
    source.to_curve_point().lerp(destination.to_curve_point(), t)
}

/// Sorting axis for point containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Order on the horizontal coordinate.
    X,
    /// Order on the vertical coordinate.
    Y,
}
