use crate::error::MeshError;
use crate::point::{Axis, CurvePoint};

/// An ordered sequence of sub-pixel samples tracing one spline.
///
/// The sample order is the curve's parameter order, produced by
/// [`crate::spline::catmull_rom`]. Queries either pick the sample nearest a
/// target coordinate or linearly interpolate the exact crossing of a target
/// coordinate between two adjacent samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParametricCurve {
    samples: Vec<CurvePoint>,
}

impl ParametricCurve {
    /// Create an empty curve.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Create a curve from already-ordered samples.
    pub fn from_samples(samples: Vec<CurvePoint>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the curve holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The ordered samples.
    pub fn samples(&self) -> &[CurvePoint] {
        &self.samples
    }

    /// Append a sample at the end of the curve.
    pub fn push(&mut self, pt: CurvePoint) {
        self.samples.push(pt);
    }

    /// Get the sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::SampleOutOfBounds`] past the end of the curve.
    pub fn sample(&self, index: usize) -> Result<CurvePoint, MeshError> {
        self.samples
            .get(index)
            .copied()
            .ok_or(MeshError::SampleOutOfBounds(index, self.samples.len()))
    }

    /// Every point where the curve crosses the vertical line `x = value`,
    /// linearly interpolated between adjacent samples.
    ///
    /// Crossings are detected where the coordinate passes `value` in
    /// ascending order; a crossing landing exactly on a sample is reported
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::CurveTooShort`] with fewer than two samples and
    /// [`MeshError::NoCrossing`] when no adjacent sample pair brackets the
    /// coordinate.
    pub fn crossings_at_x(&self, value: f64) -> Result<Vec<CurvePoint>, MeshError> {
        self.crossings(Axis::X, value)
    }

    /// Every point where the curve crosses the horizontal line `y = value`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ParametricCurve::crossings_at_x`].
    pub fn crossings_at_y(&self, value: f64) -> Result<Vec<CurvePoint>, MeshError> {
        self.crossings(Axis::Y, value)
    }

    // Windows are half-open on the far side so a value landing exactly on a
    // sample shared by two windows counts as one crossing, not two. The final
    // sample has no half-open window of its own and is checked separately.
    fn crossings(&self, axis: Axis, value: f64) -> Result<Vec<CurvePoint>, MeshError> {
        if self.samples.len() < 2 {
            return Err(MeshError::CurveTooShort(self.samples.len()));
        }
        let coord = |p: &CurvePoint| match axis {
            Axis::X => p.x,
            Axis::Y => p.y,
        };
        let mut crossings = Vec::new();
        for pair in self.samples.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if coord(&prev) <= value && coord(&next) > value {
                let t = (value - coord(&prev)) / (coord(&next) - coord(&prev));
                crossings.push(prev.lerp(next, t));
            }
        }
        let last = self.samples[self.samples.len() - 1];
        let before = self.samples[self.samples.len() - 2];
        if coord(&last) == value && coord(&before) <= value {
            crossings.push(last);
        }
        if crossings.is_empty() {
            return Err(MeshError::NoCrossing(value));
        }
        Ok(crossings)
    }

    /// The sample whose coordinate on `axis` lies nearest to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyCurve`] when the curve has no samples.
    pub fn closest_to(&self, value: f64, axis: Axis) -> Result<CurvePoint, MeshError> {
        let coord = |p: &CurvePoint| match axis {
            Axis::X => p.x,
            Axis::Y => p.y,
        };
        let mut iter = self.samples.iter();
        let mut best = *iter.next().ok_or(MeshError::EmptyCurve)?;
        let mut best_dist = (coord(&best) - value).abs();
        for &p in iter {
            let dist = (coord(&p) - value).abs();
            if dist < best_dist {
                best = p;
                best_dist = dist;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::ParametricCurve;
    use crate::error::MeshError;
    use crate::point::{Axis, CurvePoint};
    use approx::assert_relative_eq;

    fn diagonal() -> ParametricCurve {
        ParametricCurve::from_samples(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(1.0, 2.0),
            CurvePoint::new(2.0, 4.0),
        ])
    }

    #[test]
    fn crossing_interpolates_between_samples() -> Result<(), MeshError> {
        let curve = diagonal();
        let at_y = curve.crossings_at_y(1.0)?;
        assert_eq!(at_y.len(), 1);
        assert_relative_eq!(at_y[0].x, 0.5);
        assert_relative_eq!(at_y[0].y, 1.0);

        let at_x = curve.crossings_at_x(1.5)?;
        assert_eq!(at_x.len(), 1);
        assert_relative_eq!(at_x[0].y, 3.0);
        Ok(())
    }

    #[test]
    fn crossing_at_exact_sample() -> Result<(), MeshError> {
        let curve = diagonal();
        let at_y = curve.crossings_at_y(0.0)?;
        assert_relative_eq!(at_y[0].x, 0.0);
        Ok(())
    }

    #[test]
    fn exact_interior_sample_counts_once() -> Result<(), MeshError> {
        // y = 2.0 is a sample shared by two windows
        let crossings = diagonal().crossings_at_y(2.0)?;
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0].x, 1.0);
        Ok(())
    }

    #[test]
    fn exact_final_sample_is_a_crossing() -> Result<(), MeshError> {
        let crossings = diagonal().crossings_at_y(4.0)?;
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0].x, 2.0);
        Ok(())
    }

    #[test]
    fn no_crossing_is_an_error() {
        let curve = diagonal();
        assert_eq!(
            curve.crossings_at_y(9.0),
            Err(MeshError::NoCrossing(9.0))
        );
    }

    #[test]
    fn short_curve_is_an_error() {
        let curve = ParametricCurve::from_samples(vec![CurvePoint::new(0.0, 0.0)]);
        assert_eq!(curve.crossings_at_y(0.0), Err(MeshError::CurveTooShort(1)));
    }

    #[test]
    fn multiple_crossings_are_all_reported() -> Result<(), MeshError> {
        // a curve dipping down and back up crosses y = 1 twice
        let curve = ParametricCurve::from_samples(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(1.0, 2.0),
            CurvePoint::new(2.0, 0.5),
            CurvePoint::new(3.0, 2.0),
        ]);
        let crossings = curve.crossings_at_y(1.0)?;
        assert_eq!(crossings.len(), 2);
        Ok(())
    }

    #[test]
    fn closest_sample_lookup() -> Result<(), MeshError> {
        let curve = diagonal();
        let near = curve.closest_to(3.8, Axis::Y)?;
        assert_relative_eq!(near.x, 2.0);
        assert_eq!(
            ParametricCurve::new().closest_to(0.0, Axis::X),
            Err(MeshError::EmptyCurve)
        );
        Ok(())
    }
}
