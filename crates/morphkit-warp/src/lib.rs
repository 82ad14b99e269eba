#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// time-axis cross-dissolve of intermediate rasters.
pub mod dissolve;

/// Error types for the warp module.
pub mod error;

/// two-pass spline-guided pixel stretching.
pub mod stretch;

pub use crate::dissolve::cross_dissolve;
pub use crate::error::WarpError;
pub use crate::stretch::{stretch_horizontal, stretch_vertical};
