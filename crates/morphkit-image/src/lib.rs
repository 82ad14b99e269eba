#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// fixed-point color type and blending operations.
pub mod color;

/// Error types for the image module.
pub mod error;

/// raster representation for morphing purposes.
pub mod raster;

pub use crate::color::Rgba64;
pub use crate::error::RasterError;
pub use crate::raster::{Raster, RasterSize};
