use std::cmp::Ordering;

use crate::error::MeshError;
use crate::point::{Axis, GridScalar, Point2d};

/// An ordered container of 2d points, sorted on a chosen primary axis with
/// the secondary axis as tie-break.
///
/// The container is always sorted. Insertion reports the rank where the
/// point landed so callers can cross-reference it from a second index;
/// lookups by rank or by primary coordinate are `O(log n)` via binary
/// search, insertion is `O(n)` which is acceptable for the small per-line
/// point counts a morph mesh carries.
#[derive(Clone, Debug)]
pub struct SortedPointIndex<T> {
    points: Vec<Point2d<T>>,
    primary: Axis,
}

impl<T: GridScalar> SortedPointIndex<T> {
    /// Create an empty index ordered on `primary`.
    pub fn new(primary: Axis) -> Self {
        Self {
            points: Vec::new(),
            primary,
        }
    }

    /// Number of points in the index.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sorted points.
    pub fn points(&self) -> &[Point2d<T>] {
        &self.points
    }

    /// Insert a point, keeping the order, and return the rank it landed at.
    pub fn insert(&mut self, pt: Point2d<T>) -> usize {
        let rank = self
            .points
            .partition_point(|q| cmp_points(self.primary, q, &pt) == Ordering::Less);
        self.points.insert(rank, pt);
        rank
    }

    /// Get the point at `rank`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::RankOutOfBounds`] for ranks past the end.
    pub fn point_at(&self, rank: usize) -> Result<Point2d<T>, MeshError> {
        self.points
            .get(rank)
            .copied()
            .ok_or(MeshError::RankOutOfBounds(rank, self.points.len()))
    }

    /// Remove and return the point at `rank`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::RankOutOfBounds`] for ranks past the end.
    pub fn remove_at(&mut self, rank: usize) -> Result<Point2d<T>, MeshError> {
        if rank >= self.points.len() {
            return Err(MeshError::RankOutOfBounds(rank, self.points.len()));
        }
        Ok(self.points.remove(rank))
    }

    /// Find the first point whose primary coordinate equals `value`, along
    /// with its rank.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] when no point carries the
    /// coordinate.
    pub fn find_by_primary(&self, value: T) -> Result<(Point2d<T>, usize), MeshError> {
        let rank = self
            .points
            .partition_point(|q| cmp_scalar(self.primary_coord(q), value) == Ordering::Less);
        match self.points.get(rank) {
            Some(p) if self.primary_coord(p) == value => Ok((*p, rank)),
            _ => Err(MeshError::PointNotFound(value.as_f64())),
        }
    }

    /// Remove and return the first point whose primary coordinate equals
    /// `value`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PointNotFound`] when no point carries the
    /// coordinate.
    pub fn remove_by_primary(&mut self, value: T) -> Result<Point2d<T>, MeshError> {
        let (_, rank) = self.find_by_primary(value)?;
        Ok(self.points.remove(rank))
    }

    fn primary_coord(&self, p: &Point2d<T>) -> T {
        match self.primary {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

fn cmp_scalar<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn cmp_points<T: GridScalar>(primary: Axis, a: &Point2d<T>, b: &Point2d<T>) -> Ordering {
    let (a_key, b_key) = match primary {
        Axis::X => ((a.x, a.y), (b.x, b.y)),
        Axis::Y => ((a.y, a.x), (b.y, b.x)),
    };
    cmp_scalar(a_key.0, b_key.0).then(cmp_scalar(a_key.1, b_key.1))
}

#[cfg(test)]
mod tests {
    use super::SortedPointIndex;
    use crate::error::MeshError;
    use crate::point::{Axis, Point2d};

    #[test]
    fn insert_keeps_order_and_reports_rank() {
        let mut index = SortedPointIndex::new(Axis::X);
        assert_eq!(index.insert(Point2d::new(5i64, 0)), 0);
        assert_eq!(index.insert(Point2d::new(1, 0)), 0);
        assert_eq!(index.insert(Point2d::new(3, 0)), 1);
        let xs: Vec<i64> = index.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1, 3, 5]);
    }

    #[test]
    fn ties_break_on_secondary_axis() {
        let mut index = SortedPointIndex::new(Axis::Y);
        index.insert(Point2d::new(2i64, 4));
        index.insert(Point2d::new(0, 4));
        index.insert(Point2d::new(1, 4));
        let xs: Vec<i64> = index.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 1, 2]);
    }

    #[test]
    fn find_by_primary_distinguishes_not_found_from_bounds() {
        let mut index = SortedPointIndex::new(Axis::X);
        index.insert(Point2d::new(2i64, 7));
        assert_eq!(index.find_by_primary(2).map(|(p, _)| p.y), Ok(7));
        assert_eq!(
            index.find_by_primary(3),
            Err(MeshError::PointNotFound(3.0))
        );
        assert_eq!(index.point_at(1), Err(MeshError::RankOutOfBounds(1, 1)));
    }

    #[test]
    fn remove_by_primary() {
        let mut index = SortedPointIndex::new(Axis::X);
        index.insert(Point2d::new(1i64, 0));
        index.insert(Point2d::new(2, 0));
        assert!(index.remove_by_primary(1).is_ok());
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.remove_by_primary(1),
            Err(MeshError::PointNotFound(1.0))
        );
    }

    #[test]
    fn works_for_float_coordinates() {
        let mut index = SortedPointIndex::new(Axis::Y);
        index.insert(Point2d::new(0.0, 2.5));
        index.insert(Point2d::new(0.0, 1.25));
        assert_eq!(index.point_at(0).map(|p| p.y), Ok(1.25));
        assert!(index.find_by_primary(2.5).is_ok());
    }
}
