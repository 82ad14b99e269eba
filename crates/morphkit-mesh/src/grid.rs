use crate::curve::ParametricCurve;
use crate::error::MeshError;
use crate::point::{Axis, GridScalar, Point2d};
use crate::sorted::SortedPointIndex;
use crate::spline::catmull_rom;

/// A sparse, dual-indexed grid of 2d points addressable by `(row, column)`.
///
/// Points live in per-column [`SortedPointIndex`] structures ordered on the
/// vertical axis; a mirrored row index stores `(column id, rank)` entries so
/// a `(row, column)` lookup costs two binary searches. The two structures
/// are kept consistent on every mutation: a point exists at `(row, column)`
/// iff it is present in both.
///
/// Lines materialize lazily on first insertion; [`CoordinateGrid::row_count`]
/// and [`CoordinateGrid::column_count`] track non-empty lines, not capacity.
#[derive(Clone, Debug, Default)]
pub struct CoordinateGrid<T> {
    columns: Vec<SortedPointIndex<T>>,
    rows: Vec<SortedPointIndex<i64>>,
    occupied_columns: usize,
    occupied_rows: usize,
}

/// A grid of sub-pixel points, the warped coordinate space of one frame.
pub type CurveGrid = CoordinateGrid<f64>;

impl<T: GridScalar> CoordinateGrid<T> {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            occupied_columns: 0,
            occupied_rows: 0,
        }
    }

    /// Number of non-empty rows.
    pub fn row_count(&self) -> usize {
        self.occupied_rows
    }

    /// Number of non-empty columns.
    pub fn column_count(&self) -> usize {
        self.occupied_columns
    }

    /// Number of materialized rows, empty lines included.
    pub fn row_span(&self) -> usize {
        self.rows.len()
    }

    /// Number of materialized columns, empty lines included.
    pub fn column_span(&self) -> usize {
        self.columns.len()
    }

    /// Insert a point at `(row, col)`, materializing lines up to the
    /// requested indices as needed.
    ///
    /// The point is inserted into the column's index (sorted on the vertical
    /// axis) to obtain a rank; every row-index entry of that column sitting
    /// at or above the landing rank is renumbered before the new `(col,
    /// rank)` entry is recorded, keeping the cross-references exact.
    pub fn add_point(&mut self, row: usize, col: usize, pt: Point2d<T>) {
        while self.columns.len() <= col {
            self.columns.push(SortedPointIndex::new(Axis::Y));
        }
        while self.rows.len() <= row {
            self.rows.push(SortedPointIndex::new(Axis::X));
        }
        if self.columns[col].is_empty() {
            self.occupied_columns += 1;
        }
        let rank = self.columns[col].insert(pt);
        self.shift_ranks(col, rank as i64, 1);
        if self.rows[row].is_empty() {
            self.occupied_rows += 1;
        }
        self.rows[row].insert(Point2d::new(col as i64, rank as i64));
    }

    /// Remove the point at `(row, col)`.
    ///
    /// Every row-index entry of the column whose rank exceeded the removed
    /// one is renumbered down so the row index stays consistent.
    ///
    /// # Errors
    ///
    /// Returns a bounds error outside the materialized range and
    /// [`MeshError::PointNotFound`] when the cell is empty.
    pub fn remove_point(&mut self, row: usize, col: usize) -> Result<(), MeshError> {
        self.check_bounds(row, col)?;
        let (entry, _) = self.rows[row].find_by_primary(col as i64)?;
        let rank = entry.y;
        self.columns[col].remove_at(rank as usize)?;
        if self.columns[col].is_empty() {
            self.occupied_columns -= 1;
        }
        self.rows[row].remove_by_primary(col as i64)?;
        if self.rows[row].is_empty() {
            self.occupied_rows -= 1;
        }
        self.shift_ranks(col, rank + 1, -1);
        Ok(())
    }

    /// Get the point at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns a bounds error outside the materialized range and
    /// [`MeshError::PointNotFound`] when the cell is empty.
    pub fn point(&self, row: usize, col: usize) -> Result<Point2d<T>, MeshError> {
        self.check_bounds(row, col)?;
        let (entry, _) = self.rows[row].find_by_primary(col as i64)?;
        self.columns[col].point_at(entry.y as usize)
    }

    /// All points on a row, ordered by column id.
    ///
    /// Empty cells are skipped, so the polyline is ready for spline fitting.
    pub fn row_line(&self, row: usize) -> Vec<Point2d<T>> {
        (0..self.columns.len())
            .filter_map(|col| self.point(row, col).ok())
            .collect()
    }

    /// All points on a column, ordered by row id.
    pub fn column_line(&self, col: usize) -> Vec<Point2d<T>> {
        (0..self.rows.len())
            .filter_map(|row| self.point(row, col).ok())
            .collect()
    }

    /// Fit a Catmull-Rom spline to every line along the requested axis.
    ///
    /// Lines with fewer than three points are skipped rather than errored;
    /// the returned curves keep the line order of the grid.
    ///
    /// # Errors
    ///
    /// Propagates spline parameter errors from [`catmull_rom`].
    pub fn splines_for_axis(
        &self,
        vertical: bool,
        alpha: f64,
        steps: usize,
    ) -> Result<Vec<ParametricCurve>, MeshError> {
        let line_total = if vertical {
            self.columns.len()
        } else {
            self.rows.len()
        };
        let mut curves = Vec::new();
        for line in 0..line_total {
            let pts: Vec<_> = if vertical {
                self.column_line(line)
            } else {
                self.row_line(line)
            }
            .iter()
            .map(|p| p.to_curve_point())
            .collect();
            if pts.len() < 3 {
                continue;
            }
            curves.push(ParametricCurve::from_samples(catmull_rom(
                &pts, alpha, steps,
            )?));
        }
        Ok(curves)
    }

    /// Renumber row-index ranks of `col` at or above `from_rank` by `delta`.
    fn shift_ranks(&mut self, col: usize, from_rank: i64, delta: i64) {
        for line in self.rows.iter_mut() {
            if let Ok((entry, idx)) = line.find_by_primary(col as i64) {
                if entry.y >= from_rank {
                    // remove/insert keeps the line's own order intact
                    let _ = line.remove_at(idx);
                    line.insert(Point2d::new(entry.x, entry.y + delta));
                }
            }
        }
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MeshError> {
        if row >= self.rows.len() {
            return Err(MeshError::RowOutOfBounds(row, self.rows.len()));
        }
        if col >= self.columns.len() {
            return Err(MeshError::ColumnOutOfBounds(col, self.columns.len()));
        }
        Ok(())
    }
}
