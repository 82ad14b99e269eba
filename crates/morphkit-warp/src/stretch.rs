use log::trace;
use rayon::prelude::*;

use morphkit_image::{Raster, Rgba64};
use morphkit_mesh::{CurvePoint, ParametricCurve};

use crate::error::WarpError;

/// Warp pixel runs horizontally from the positions bounded by
/// `original` splines onto the positions bounded by `warped` splines.
///
/// For every scanline `y` in `[y_start, y_end)` and every pair of adjacent
/// splines, the four curves are evaluated at `y` to obtain the original and
/// warped run boundaries, and the source pixels spanning the original run
/// are redistributed over the warped run with sub-pixel coverage weights.
/// Scanlines are processed in parallel; each writes one exclusive
/// destination row.
///
/// # Arguments
///
/// * `y_start`, `y_end` - The half-open scanline range to resample.
/// * `original` - Splines bounding the pixel runs in `src`, left to right.
/// * `warped` - Splines bounding the target positions, paired with
///   `original`.
/// * `src` - The raster the pixel mass is read from.
/// * `dst` - The raster the warped mass is written to, same size as `src`.
///
/// # Errors
///
/// Fails with [`WarpError::SplineCountMismatch`] when the sets differ in
/// length, [`WarpError::SizeMismatch`] when the rasters differ in size, and
/// [`WarpError::FoldedSpline`] when a spline crosses a scanline more than
/// once.
pub fn stretch_horizontal(
    y_start: i64,
    y_end: i64,
    original: &[ParametricCurve],
    warped: &[ParametricCurve],
    src: &Raster,
    dst: &mut Raster,
) -> Result<(), WarpError> {
    check_spline_sets(original, warped)?;
    if src.size() != dst.size() {
        return Err(WarpError::SizeMismatch);
    }
    let cells = original.len();
    let width = dst.width();
    if cells < 2 || width == 0 {
        return Ok(());
    }
    dst.as_slice_mut()
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, dst_row)| -> Result<(), WarpError> {
            let line = y as i64;
            if line < y_start || line >= y_end {
                return Ok(());
            }
            let src_row = src.row(y)?;
            for cell in 0..cells - 1 {
                let orig_start = single_crossing_at_y(&original[cell], line)?;
                let orig_end = single_crossing_at_y(&original[cell + 1], line)?;
                let warp_start = single_crossing_at_y(&warped[cell], line)?;
                let warp_end = single_crossing_at_y(&warped[cell + 1], line)?;
                merge_line(
                    cell != 0,
                    cell != cells - 2,
                    orig_start.x,
                    orig_end.x,
                    warp_start.x,
                    warp_end.x,
                    src_row,
                    dst_row,
                );
            }
            Ok(())
        })
}

/// Warp pixel runs vertically; the column-axis counterpart of
/// [`stretch_horizontal`].
///
/// Columns in `[x_start, x_end)` are resampled in parallel into per-column
/// buffers, then gathered back into `dst` once every worker has finished.
///
/// # Errors
///
/// Same conditions as [`stretch_horizontal`].
pub fn stretch_vertical(
    x_start: i64,
    x_end: i64,
    original: &[ParametricCurve],
    warped: &[ParametricCurve],
    src: &Raster,
    dst: &mut Raster,
) -> Result<(), WarpError> {
    check_spline_sets(original, warped)?;
    if src.size() != dst.size() {
        return Err(WarpError::SizeMismatch);
    }
    let cells = original.len();
    let width = dst.width();
    if cells < 2 || width == 0 {
        return Ok(());
    }
    let dst_view = &*dst;
    let columns = (0..width)
        .into_par_iter()
        .filter(|&x| (x as i64) >= x_start && (x as i64) < x_end)
        .map(|x| -> Result<(usize, Vec<Rgba64>), WarpError> {
            let line = x as i64;
            let src_col = src.column(x)?;
            let mut dst_col = dst_view.column(x)?;
            for cell in 0..cells - 1 {
                let orig_start = single_crossing_at_x(&original[cell], line)?;
                let orig_end = single_crossing_at_x(&original[cell + 1], line)?;
                let warp_start = single_crossing_at_x(&warped[cell], line)?;
                let warp_end = single_crossing_at_x(&warped[cell + 1], line)?;
                merge_line(
                    cell != 0,
                    cell != cells - 2,
                    orig_start.y,
                    orig_end.y,
                    warp_start.y,
                    warp_end.y,
                    &src_col,
                    &mut dst_col,
                );
            }
            Ok((x, dst_col))
        })
        .collect::<Result<Vec<_>, WarpError>>()?;
    for (x, column) in columns {
        dst.set_column(x, &column)?;
    }
    Ok(())
}

fn check_spline_sets(
    original: &[ParametricCurve],
    warped: &[ParametricCurve],
) -> Result<(), WarpError> {
    if original.len() != warped.len() {
        return Err(WarpError::SplineCountMismatch {
            original: original.len(),
            warped: warped.len(),
        });
    }
    Ok(())
}

fn single_crossing_at_y(curve: &ParametricCurve, line: i64) -> Result<CurvePoint, WarpError> {
    let crossings = curve.crossings_at_y(line as f64)?;
    if crossings.len() != 1 {
        return Err(WarpError::FoldedSpline {
            line,
            crossings: crossings.len(),
        });
    }
    Ok(crossings[0])
}

fn single_crossing_at_x(curve: &ParametricCurve, line: i64) -> Result<CurvePoint, WarpError> {
    let crossings = curve.crossings_at_x(line as f64)?;
    if crossings.len() != 1 {
        return Err(WarpError::FoldedSpline {
            line,
            crossings: crossings.len(),
        });
    }
    Ok(crossings[0])
}

/// Redistribute the source pixel run `[orig_start, orig_end]` onto the
/// destination run `[warp_start, warp_end]` along one scanline.
///
/// Whole source pixels carry weight 1.0; the two edge pixels carry their
/// fractional coverage of the run. Each weighted contribution maps
/// proportionally into the warped run and is spread over the destination
/// pixels it covers. A last-written cursor decides whether a destination
/// pixel is overwritten (first contribution) or accumulated onto; the
/// `fade_start`/`fade_end` flags hand edge pixels shared with the
/// neighboring cell to whichever cell owns the write.
#[allow(clippy::too_many_arguments)]
fn merge_line(
    fade_start: bool,
    fade_end: bool,
    orig_start: f64,
    orig_end: f64,
    warp_start: f64,
    warp_end: f64,
    src_line: &[Rgba64],
    dst_line: &mut [Rgba64],
) {
    let snap_start = orig_start.floor() as i64 + 1;
    let snap_end = orig_end.floor() as i64 + 1;
    let orig_span = orig_end - orig_start;
    let warp_span = warp_end - warp_start;
    let mut last_written = warp_start.floor() as i64;
    if !fade_start {
        last_written -= 1;
    }
    trace!(
        "merge run [{orig_start:.3}, {orig_end:.3}] -> [{warp_start:.3}, {warp_end:.3}], \
         fades ({fade_start}, {fade_end})"
    );
    for i_orig in snap_start..=snap_end {
        let color = pixel_at(src_line, i_orig - 1);
        // fraction of the run covered up to this pixel's right edge
        let pct = ((i_orig as f64).min(orig_end) - orig_start) / orig_span;
        let w_orig = if i_orig == snap_start {
            1.0 - (orig_start - orig_start.floor())
        } else if i_orig == snap_end {
            orig_end - orig_end.floor()
        } else {
            1.0
        };
        if w_orig <= 0.0 {
            continue;
        }
        let w_warp = w_orig / orig_span * warp_span;
        let warp_pos = pct * warp_span + warp_start;
        let dest_end = warp_pos.floor() as i64;
        let dest_start = (warp_pos - w_warp).floor() as i64;
        let mut w_frac = 1.0 - (warp_pos - w_warp - dest_start as f64);
        trace!(
            "  src pixel {} w={w_orig:.3} -> dest [{dest_start}, {dest_end}]",
            i_orig - 1
        );
        for i_dest in dest_start..=dest_end {
            if i_dest == dest_end && dest_start != dest_end {
                w_frac = warp_pos - dest_end as f64;
            }
            if w_frac > 0.0 {
                if i_dest > last_written && !(fade_end && i_orig == snap_end) {
                    write_pixel(dst_line, i_dest, color.scale(w_frac));
                    last_written = i_dest;
                } else {
                    if i_dest > last_written && fade_end && i_orig == snap_end {
                        last_written = i_dest;
                    }
                    let past = pixel_at(dst_line, i_dest);
                    write_pixel(dst_line, i_dest, past.saturating_add(color.scale(w_frac)));
                }
            }
            w_frac = 1.0;
        }
    }
}

/// Tolerant line read; indices outside the scanline read as transparent.
fn pixel_at(line: &[Rgba64], index: i64) -> Rgba64 {
    if index < 0 {
        return Rgba64::TRANSPARENT;
    }
    line.get(index as usize).copied().unwrap_or(Rgba64::TRANSPARENT)
}

/// Tolerant line write; indices outside the scanline are dropped.
fn write_pixel(line: &mut [Rgba64], index: i64, color: Rgba64) {
    if index < 0 {
        return;
    }
    if let Some(px) = line.get_mut(index as usize) {
        *px = color;
    }
}

#[cfg(test)]
mod tests {
    use super::{stretch_horizontal, stretch_vertical};
    use crate::error::WarpError;
    use morphkit_image::{Raster, RasterSize, Rgba64};
    use morphkit_mesh::{CurvePoint, ParametricCurve};

    fn vertical_line(x: f64, height: usize) -> ParametricCurve {
        ParametricCurve::from_samples(
            (0..=height).map(|y| CurvePoint::new(x, y as f64)).collect(),
        )
    }

    fn horizontal_line(y: f64, width: usize) -> ParametricCurve {
        ParametricCurve::from_samples(
            (0..=width).map(|x| CurvePoint::new(x as f64, y)).collect(),
        )
    }

    fn gradient_raster(width: usize, height: usize) -> Raster {
        let size = RasterSize { width, height };
        let data = (0..width * height)
            .map(|i| {
                let v = (i as u16 + 1) * 0x100;
                Rgba64::new(v, v / 2, v / 4, 0xfffe)
            })
            .collect();
        Raster::new(size, data).expect("fixture raster")
    }

    #[test]
    fn identity_warp_reproduces_source_horizontally() -> Result<(), WarpError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let src = gradient_raster(4, 3);
        let mut dst = Raster::from_size_val(src.size(), Rgba64::TRANSPARENT);
        let splines = vec![vertical_line(0.0, 3), vertical_line(4.0, 3)];
        stretch_horizontal(0, 3, &splines, &splines, &src, &mut dst)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn identity_warp_reproduces_source_vertically() -> Result<(), WarpError> {
        let src = gradient_raster(3, 4);
        let mut dst = Raster::from_size_val(src.size(), Rgba64::TRANSPARENT);
        let splines = vec![horizontal_line(0.0, 3), horizontal_line(4.0, 3)];
        stretch_vertical(0, 3, &splines, &splines, &src, &mut dst)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn half_pixel_shift_distributes_coverage_weights() -> Result<(), WarpError> {
        let src = gradient_raster(4, 1);
        let mut dst = Raster::from_size_val(src.size(), Rgba64::TRANSPARENT);
        let original = vec![vertical_line(0.0, 1), vertical_line(4.0, 1)];
        let warped = vec![vertical_line(0.5, 1), vertical_line(4.5, 1)];
        stretch_horizontal(0, 1, &original, &warped, &src, &mut dst)?;

        let row = src.row(0)?.to_vec();
        // first pixel holds half of the first source pixel; every later
        // pixel blends the two sources straddling it at half weight each
        assert_eq!(dst.get(0, 0)?, row[0].scale(0.5));
        for x in 1..4 {
            let expected = row[x - 1].scale(0.5).saturating_add(row[x].scale(0.5));
            assert_eq!(dst.get(x, 0)?, expected);
        }
        Ok(())
    }

    #[test]
    fn mismatched_spline_sets_are_rejected() {
        let src = gradient_raster(2, 2);
        let mut dst = Raster::from_size_val(src.size(), Rgba64::TRANSPARENT);
        let original = vec![vertical_line(0.0, 2), vertical_line(2.0, 2)];
        let warped = vec![vertical_line(0.0, 2)];
        let res = stretch_horizontal(0, 2, &original, &warped, &src, &mut dst);
        assert_eq!(
            res,
            Err(WarpError::SplineCountMismatch {
                original: 2,
                warped: 1
            })
        );
    }

    #[test]
    fn folding_spline_is_rejected() {
        let src = gradient_raster(4, 4);
        let mut dst = Raster::from_size_val(src.size(), Rgba64::TRANSPARENT);
        // this curve rises through y = 1, dips, then rises again
        let folded = ParametricCurve::from_samples(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(0.5, 2.0),
            CurvePoint::new(1.0, 0.5),
            CurvePoint::new(1.5, 4.0),
        ]);
        let straight = vertical_line(4.0, 4);
        let splines = vec![folded, straight];
        let res = stretch_horizontal(1, 2, &splines, &splines, &src, &mut dst);
        assert_eq!(
            res,
            Err(WarpError::FoldedSpline {
                line: 1,
                crossings: 2
            })
        );
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let src = gradient_raster(4, 4);
        let mut dst = Raster::from_size_val(
            RasterSize {
                width: 2,
                height: 2,
            },
            Rgba64::TRANSPARENT,
        );
        let splines = vec![vertical_line(0.0, 4), vertical_line(4.0, 4)];
        let res = stretch_horizontal(0, 4, &splines, &splines, &src, &mut dst);
        assert_eq!(res, Err(WarpError::SizeMismatch));
    }
}
