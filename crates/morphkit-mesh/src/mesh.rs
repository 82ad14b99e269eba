use crate::curve::ParametricCurve;
use crate::error::MeshError;
use crate::grid::{CoordinateGrid, CurveGrid};
use crate::point::{CurvePoint, GridPoint};
use crate::spline::catmull_rom_grid_points;

/// A pair of coordinate grids describing matched landmarks on a source and
/// a destination keyframe.
///
/// Every correspondence write touches both grids at the same `(row, col)`,
/// so the two grids always share one row/column index space; the rest of
/// the pipeline depends on that pairing. Row and column indices are
/// arbitrary non-negative ids and need not be contiguous.
#[derive(Clone, Debug, Default)]
pub struct MorphMesh {
    source: CoordinateGrid<i64>,
    destination: CoordinateGrid<i64>,
}

impl MorphMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            source: CoordinateGrid::new(),
            destination: CoordinateGrid::new(),
        }
    }

    /// Record a correspondence: the same feature at `source_pt` on the
    /// source keyframe and `destination_pt` on the destination keyframe.
    pub fn add_correspondence(
        &mut self,
        row: usize,
        col: usize,
        source_pt: GridPoint,
        destination_pt: GridPoint,
    ) {
        self.source.add_point(row, col, source_pt);
        self.destination.add_point(row, col, destination_pt);
    }

    /// Remove the correspondence at `(row, col)` from both grids.
    ///
    /// # Errors
    ///
    /// Returns a bounds error outside the materialized range and
    /// [`MeshError::PointNotFound`] when the cell is empty.
    pub fn remove_correspondence(&mut self, row: usize, col: usize) -> Result<(), MeshError> {
        self.source.remove_point(row, col)?;
        self.destination.remove_point(row, col)
    }

    /// The matched point pair at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MorphMesh::remove_correspondence`].
    pub fn correspondence(&self, row: usize, col: usize) -> Result<(GridPoint, GridPoint), MeshError> {
        let source_pt = self.source.point(row, col)?;
        let destination_pt = self.destination.point(row, col)?;
        Ok((source_pt, destination_pt))
    }

    /// Number of non-empty rows; identical in both grids by construction.
    pub fn row_count(&self) -> usize {
        debug_assert_eq!(self.source.row_count(), self.destination.row_count());
        self.source.row_count()
    }

    /// Number of non-empty columns; identical in both grids by construction.
    pub fn column_count(&self) -> usize {
        debug_assert_eq!(self.source.column_count(), self.destination.column_count());
        self.source.column_count()
    }

    /// The source-side grid.
    pub fn source(&self) -> &CoordinateGrid<i64> {
        &self.source
    }

    /// The destination-side grid.
    pub fn destination(&self) -> &CoordinateGrid<i64> {
        &self.destination
    }

    /// The landmark polylines of one row, source and destination.
    pub fn row_line(&self, row: usize) -> (Vec<GridPoint>, Vec<GridPoint>) {
        (self.source.row_line(row), self.destination.row_line(row))
    }

    /// The landmark polylines of one column, source and destination.
    pub fn column_line(&self, col: usize) -> (Vec<GridPoint>, Vec<GridPoint>) {
        (
            self.source.column_line(col),
            self.destination.column_line(col),
        )
    }

    /// Fit Catmull-Rom splines to every mesh line along the requested axis,
    /// for both keyframes at once.
    ///
    /// Lines with fewer than three points on either side are skipped, so
    /// the two returned curve sets always pair up index by index.
    ///
    /// # Errors
    ///
    /// Propagates spline parameter errors from
    /// [`crate::spline::catmull_rom`].
    pub fn splines_for_axis(
        &self,
        vertical: bool,
        alpha: f64,
        steps: usize,
    ) -> Result<(Vec<ParametricCurve>, Vec<ParametricCurve>), MeshError> {
        let line_total = if vertical {
            self.source.column_span().max(self.destination.column_span())
        } else {
            self.source.row_span().max(self.destination.row_span())
        };
        let mut source_curves = Vec::new();
        let mut destination_curves = Vec::new();
        for line in 0..line_total {
            let (source_pts, destination_pts) = if vertical {
                self.column_line(line)
            } else {
                self.row_line(line)
            };
            if source_pts.len() < 3 || destination_pts.len() < 3 {
                continue;
            }
            source_curves.push(ParametricCurve::from_samples(catmull_rom_grid_points(
                &source_pts,
                alpha,
                steps,
            )?));
            destination_curves.push(ParametricCurve::from_samples(catmull_rom_grid_points(
                &destination_pts,
                alpha,
                steps,
            )?));
        }
        Ok((source_curves, destination_curves))
    }

    /// Build the warped coordinate space of one output frame.
    ///
    /// Visits every materialized `(row, col)` cell present in both grids and
    /// applies `interp` to the correspondence pair, writing the result into
    /// a fresh sub-pixel grid. With [`crate::point::linear_interpolation`]
    /// this realizes the morph's time axis: `t = 0.0` reproduces the source
    /// grid and `t = 1.0` the destination grid.
    pub fn interpolated_grid<F>(&self, interp: F, t: f64) -> CurveGrid
    where
        F: Fn(GridPoint, GridPoint, f64) -> CurvePoint,
    {
        let mut grid = CurveGrid::new();
        let cols = self.source.column_span().max(self.destination.column_span());
        let rows = self.source.row_span().max(self.destination.row_span());
        for col in 0..cols {
            for row in 0..rows {
                if let Ok((source_pt, destination_pt)) = self.correspondence(row, col) {
                    grid.add_point(row, col, interp(source_pt, destination_pt, t));
                }
            }
        }
        grid
    }
}
