#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// sampled spline curves queryable by coordinate.
pub mod curve;

/// Error types for the mesh module.
pub mod error;

/// dual-indexed sparse coordinate grids.
pub mod grid;

/// paired source/destination correspondence meshes.
pub mod mesh;

/// 2d point types and positional interpolation.
pub mod point;

/// ordered point containers with binary-search lookup.
pub mod sorted;

/// centripetal Catmull-Rom spline evaluation.
pub mod spline;

pub use crate::curve::ParametricCurve;
pub use crate::error::MeshError;
pub use crate::grid::{CoordinateGrid, CurveGrid};
pub use crate::mesh::MorphMesh;
pub use crate::point::{linear_interpolation, Axis, CurvePoint, GridPoint, GridScalar, Point2d};
pub use crate::sorted::SortedPointIndex;
pub use crate::spline::{catmull_rom, catmull_rom_grid_points};
