#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use morphkit_image as image;

#[doc(inline)]
pub use morphkit_mesh as mesh;

#[doc(inline)]
pub use morphkit_warp as warp;
