use rayon::prelude::*;

use morphkit_image::{Raster, Rgba64};

use crate::error::WarpError;

/// Weight a series of rasters on a pixel-by-pixel basis into one result.
///
/// Every output pixel is the per-channel saturating sum of the input pixels
/// scaled by their raster's weight. This realizes the morph's final
/// time-axis cross-dissolve of the two warped intermediates, but accepts any
/// number of layers from two upward.
///
/// # Arguments
///
/// * `rasters` - The layers to dissolve, all the same size.
/// * `weights` - One weight per raster.
///
/// # Errors
///
/// Fails with [`WarpError::WeightCountMismatch`] when the counts differ,
/// [`WarpError::NotEnoughRasters`] for fewer than two layers and
/// [`WarpError::SizeMismatch`] when the raster bounds do not match.
pub fn cross_dissolve(rasters: &[&Raster], weights: &[f64]) -> Result<Raster, WarpError> {
    if rasters.len() != weights.len() {
        return Err(WarpError::WeightCountMismatch {
            rasters: rasters.len(),
            weights: weights.len(),
        });
    }
    if rasters.len() < 2 {
        return Err(WarpError::NotEnoughRasters(rasters.len()));
    }
    let size = rasters[0].size();
    if rasters.iter().any(|r| r.size() != size) {
        return Err(WarpError::SizeMismatch);
    }

    let mut result = Raster::from_size_val(size, Rgba64::TRANSPARENT);
    result
        .as_slice_mut()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, px)| {
            let mut acc = rasters[0].as_slice()[i].scale(weights[0]);
            for (raster, &weight) in rasters.iter().zip(weights.iter()).skip(1) {
                acc = acc.saturating_add(raster.as_slice()[i].scale(weight));
            }
            *px = acc;
        });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::cross_dissolve;
    use crate::error::WarpError;
    use morphkit_image::{Raster, RasterSize, Rgba64};

    fn flat(size: RasterSize, color: Rgba64) -> Raster {
        Raster::from_size_val(size, color)
    }

    #[test]
    fn equal_weights_average_two_layers() -> Result<(), WarpError> {
        let size = RasterSize {
            width: 2,
            height: 2,
        };
        let a = flat(size, Rgba64::new(0x4000, 0x2000, 0, 0xfffe));
        let b = flat(size, Rgba64::new(0x2000, 0x4000, 0, 0xfffe));
        let result = cross_dissolve(&[&a, &b], &[0.5, 0.5])?;
        assert_eq!(
            result.get(0, 0)?,
            Rgba64::new(0x3000, 0x3000, 0, 0xfffe)
        );
        Ok(())
    }

    #[test]
    fn weighted_sum_saturates() -> Result<(), WarpError> {
        let size = RasterSize {
            width: 1,
            height: 1,
        };
        let a = flat(size, Rgba64::new(0xffff, 0, 0, 0xffff));
        let b = flat(size, Rgba64::new(0xffff, 0, 0, 0xffff));
        let result = cross_dissolve(&[&a, &b], &[1.0, 1.0])?;
        assert_eq!(result.get(0, 0)?, Rgba64::new(0xffff, 0, 0, 0xffff));
        Ok(())
    }

    #[test]
    fn count_and_size_validation() {
        let size = RasterSize {
            width: 2,
            height: 1,
        };
        let a = flat(size, Rgba64::TRANSPARENT);
        let b = flat(
            RasterSize {
                width: 1,
                height: 1,
            },
            Rgba64::TRANSPARENT,
        );
        assert_eq!(
            cross_dissolve(&[&a], &[1.0]),
            Err(WarpError::NotEnoughRasters(1))
        );
        assert_eq!(
            cross_dissolve(&[&a, &a], &[1.0]),
            Err(WarpError::WeightCountMismatch {
                rasters: 2,
                weights: 1
            })
        );
        assert_eq!(
            cross_dissolve(&[&a, &b], &[0.5, 0.5]),
            Err(WarpError::SizeMismatch)
        );
    }
}
