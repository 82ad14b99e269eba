use crate::error::MeshError;
use crate::point::{CurvePoint, GridPoint};

/// Sample a centripetal cubic Catmull-Rom spline through `points`.
///
/// The `alpha` parameter dictates the kind of spline generated: 0.0 yields a
/// uniform curve, 0.5 a centripetal curve (which will not form loops through
/// closely spaced points) and 1.0 a chordal curve. `steps` is the target
/// sample count, distributed across the segments proportionally to each
/// segment's Euclidean length; the first and last returned samples equal the
/// first and last input points exactly.
///
/// Virtual control points are synthesized by linear extrapolation before the
/// first and after the last real point, so the curve interpolates every
/// input point.
///
/// # Arguments
///
/// * `points` - The polyline to interpolate, at least three points.
/// * `alpha` - Knot parameterization exponent in `[0.0, 1.0]`.
/// * `steps` - Target number of samples, at least 2.
///
/// # Errors
///
/// Fails with [`MeshError::TooFewPoints`], [`MeshError::AlphaOutOfRange`] or
/// [`MeshError::InvalidStepCount`] when the inputs violate the above.
pub fn catmull_rom(
    points: &[CurvePoint],
    alpha: f64,
    steps: usize,
) -> Result<Vec<CurvePoint>, MeshError> {
    let n = points.len();
    if n < 3 {
        return Err(MeshError::TooFewPoints(n));
    }
    if !(0.0..=1.0).contains(&alpha) {
        return Err(MeshError::AlphaOutOfRange(alpha));
    }
    if steps < 2 {
        return Err(MeshError::InvalidStepCount(steps));
    }

    // distribute the samples over the segments by arc length
    let total_length: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    let segment_steps: Vec<usize> = points
        .windows(2)
        .map(|w| (steps as f64 * w[0].distance(w[1]) / total_length + 0.5).floor() as usize)
        .collect();

    let prepend = extrapolate(points[0], points[1]);
    let postpend = extrapolate(points[n - 1], points[n - 2]);

    // rolling 4-point window with incrementally updated knots
    let (mut p0, mut p1, mut p2, mut p3) = (prepend, points[0], points[1], points[2]);
    let mut t_prev = 0.0;
    let mut t_start = p0.distance(p1).powf(alpha);
    let mut t_end = t_start + p1.distance(p2).powf(alpha);
    let mut t_next = t_end + p2.distance(p3).powf(alpha);

    let mut samples = Vec::with_capacity(steps + 1);
    for (segment, &count) in segment_steps.iter().enumerate() {
        for step in 0..count {
            let t = t_start + (step as f64) * (t_end - t_start) / (count as f64);
            samples.push(blend_pyramid(
                [p0, p1, p2, p3],
                [t_prev, t_start, t_end, t_next],
                t,
            ));
        }
        p0 = p1;
        p1 = p2;
        p2 = p3;
        p3 = if segment + 3 >= n {
            postpend
        } else {
            points[segment + 3]
        };
        t_prev = t_start;
        t_start = t_end;
        t_end = t_next;
        t_next += p2.distance(p3).powf(alpha);
    }
    // the per-segment loops sample [t_start, t_end); close the curve on the
    // exact final input point
    samples.push(points[n - 1]);
    Ok(samples)
}

/// [`catmull_rom`] over integer landmark points.
///
/// # Errors
///
/// Same conditions as [`catmull_rom`].
pub fn catmull_rom_grid_points(
    points: &[GridPoint],
    alpha: f64,
    steps: usize,
) -> Result<Vec<CurvePoint>, MeshError> {
    let float_points: Vec<CurvePoint> = points.iter().map(|p| p.to_curve_point()).collect();
    catmull_rom(&float_points, alpha, steps)
}

/// Virtual control point: `anchor` pushed away from `inner` by twice their
/// separation.
fn extrapolate(anchor: CurvePoint, inner: CurvePoint) -> CurvePoint {
    CurvePoint::new(
        anchor.x + 2.0 * (anchor.x - inner.x),
        anchor.y + 2.0 * (anchor.y - inner.y),
    )
}

/// One pairwise linear blend of the Barry-Goldman pyramid.
fn blend(a: CurvePoint, b: CurvePoint, t_a: f64, t_b: f64, t: f64) -> CurvePoint {
    let span = t_b - t_a;
    CurvePoint::new(
        a.x * ((t_b - t) / span) + b.x * ((t - t_a) / span),
        a.y * ((t_b - t) / span) + b.y * ((t - t_a) / span),
    )
}

/// Evaluate the Barry-Goldman pyramid at parameter `t`: three first-level
/// blends, two second-level blends and the final blend, as a flat sequence
/// of fixed-arity steps.
fn blend_pyramid(points: [CurvePoint; 4], knots: [f64; 4], t: f64) -> CurvePoint {
    let [p0, p1, p2, p3] = points;
    let [t0, t1, t2, t3] = knots;
    let l01 = blend(p0, p1, t0, t1, t);
    let l12 = blend(p1, p2, t1, t2, t);
    let l23 = blend(p2, p3, t2, t3, t);
    let l012 = blend(l01, l12, t0, t2, t);
    let l123 = blend(l12, l23, t1, t3, t);
    blend(l012, l123, t1, t2, t)
}
